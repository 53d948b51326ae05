use crate::helper_model::WashlineError;
use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use std::collections::HashMap;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("workers")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::query::<HashMap<String, String>>())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        request: HashMap<String, String>,
                        auth: String,
                        user_agent: String| {
                if method != Method::GET {
                    return methods::standard_replies::method_not_allowed_response();
                }

                let Some(location_id) = request
                    .get("location_id")
                    .and_then(|v| v.parse::<i32>().ok())
                else {
                    return methods::standard_replies::validation_error(
                        "A numeric location_id query parameter is required.",
                    );
                };

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
                        WashlineError::TokenFormatError => {
                            methods::tokens::token_not_hex_warp_return()
                        }
                        WashlineError::InvalidToken => methods::tokens::token_invalid_return(),
                        _ => methods::standard_replies::internal_server_error_response(
                            String::from("location/workers: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("location/workers: failed to extend token"),
                            );
                        }

                        use crate::schema::locations::dsl as location_q;
                        let mut pool = POOL.get().unwrap();
                        let location_exists = location_q::locations
                            .find(location_id)
                            .get_result::<model::Location>(&mut pool);
                        if location_exists.is_err() {
                            return methods::standard_replies::not_found_response("Location");
                        }

                        use crate::schema::admin_profiles::dsl as admin_q;
                        use crate::schema::users::dsl as user_q;
                        use crate::schema::washer_profiles::dsl as washer_q;

                        let admins = admin_q::admin_profiles
                            .inner_join(user_q::users)
                            .filter(admin_q::location_id.eq(location_id))
                            .select(crate::schema::users::all_columns)
                            .get_results::<model::User>(&mut pool);
                        let washers = washer_q::washer_profiles
                            .inner_join(user_q::users)
                            .filter(washer_q::location_id.eq(location_id))
                            .select(crate::schema::users::all_columns)
                            .get_results::<model::User>(&mut pool);

                        let (Ok(admins), Ok(washers)) = (admins, washers) else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("location/workers: staff queries failed"),
                            );
                        };

                        let reply = helper_model::LocationWorkers {
                            admins: admins.into_iter().map(model::PublishUser::from).collect(),
                            washers: washers.into_iter().map(model::PublishUser::from).collect(),
                        };
                        methods::standard_replies::response_with_obj(reply, StatusCode::OK)
                    }
                };
            },
        )
}
