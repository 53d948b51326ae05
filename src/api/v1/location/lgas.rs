use crate::helper_model::WashlineError;
use crate::{POOL, methods, model};
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("lgas")
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
                        "location/lgas: token verification failed",
                    )),
                },
                Ok(valid_token) => {
                    // token is valid
                    if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                        return methods::standard_replies::internal_server_error_response(
                            String::from("location/lgas: failed to extend token"),
                        );
                    }

                    use crate::schema::locations::dsl as location_q;
                    let mut pool = POOL.get().unwrap();
                    let lgas_result = location_q::locations
                        .select(location_q::lga)
                        .distinct()
                        .order(location_q::lga.asc())
                        .get_results::<String>(&mut pool);

                    match lgas_result {
                        Ok(lgas) => {
                            methods::standard_replies::response_with_obj(lgas, StatusCode::OK)
                        }
                        Err(error) => methods::standard_replies::internal_server_error_response(
                            format!("location/lgas: query failed: {:?}", error),
                        ),
                    }
                }
            };
        })
}
