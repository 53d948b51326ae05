use crate::helper_model::WashlineError;
use crate::{POOL, helper_model, methods, model};
use diesel::dsl::count_star;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("stats")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |method: Method, auth: String, user_agent: String| {
            if method != Method::GET {
                return methods::standard_replies::method_not_allowed_response();
            }

            let token_and_id = auth.split("$").collect::<Vec<&str>>();
            if token_and_id.len() != 2 {
                return methods::tokens::token_invalid_return();
            }
            let user_id = match token_and_id[1].parse::<i32>() {
                Ok(int) => int,
                Err(_) => {
                    return methods::tokens::token_invalid_return();
                }
            };

            let access_token = model::RequestToken {
                user_id,
                token: String::from(token_and_id[0]),
            };
            let if_token_valid =
                methods::tokens::verify_user_token(&access_token.user_id, &access_token.token)
                    .await;
            return match if_token_valid {
                Err(err) => match err {
                    WashlineError::TokenFormatError => methods::tokens::token_not_hex_warp_return(),
                    WashlineError::InvalidToken => methods::tokens::token_invalid_return(),
                    _ => methods::standard_replies::internal_server_error_response(String::from(
                        "location/stats: token verification failed",
                    )),
                },
                Ok(valid_token) => {
                    // token is valid
                    if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                        return methods::standard_replies::internal_server_error_response(
                            String::from("location/stats: failed to extend token"),
                        );
                    }

                    use crate::schema::locations::dsl as location_q;
                    let mut pool = POOL.get().unwrap();

                    let total = location_q::locations
                        .select(count_star())
                        .get_result::<i64>(&mut pool);
                    let active = location_q::locations
                        .filter(location_q::is_active.eq(true))
                        .select(count_star())
                        .get_result::<i64>(&mut pool);
                    let by_lga = location_q::locations
                        .group_by(location_q::lga)
                        .select((location_q::lga, count_star()))
                        .order(location_q::lga.asc())
                        .get_results::<(String, i64)>(&mut pool);

                    let (Ok(total), Ok(active), Ok(by_lga)) = (total, active, by_lga) else {
                        return methods::standard_replies::internal_server_error_response(
                            String::from("location/stats: count queries failed"),
                        );
                    };

                    let stats = helper_model::LocationStats {
                        total,
                        active,
                        inactive: total - active,
                        by_lga: by_lga
                            .into_iter()
                            .map(|(lga, count)| helper_model::LgaCount { lga, count })
                            .collect(),
                    };
                    methods::standard_replies::response_with_obj(stats, StatusCode::OK)
                }
            };
        })
}
