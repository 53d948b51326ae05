use crate::helper_model::WashlineError;
use crate::{POOL, methods, model};
use diesel::prelude::*;
use std::collections::HashMap;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("get")
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

                let Some(location_id) = request.get("id").and_then(|v| v.parse::<i32>().ok())
                else {
                    return methods::standard_replies::validation_error(
                        "A numeric id query parameter is required.",
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
                            String::from("location/get: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("location/get: failed to extend token"),
                            );
                        }

                        use crate::schema::locations::dsl as location_q;
                        let mut pool = POOL.get().unwrap();
                        let location_result = location_q::locations
                            .find(location_id)
                            .get_result::<model::Location>(&mut pool);

                        match location_result {
                            Ok(location) => methods::standard_replies::response_with_obj(
                                location,
                                StatusCode::OK,
                            ),
                            Err(diesel::result::Error::NotFound) => {
                                methods::standard_replies::not_found_response("Location")
                            }
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("location/get: query failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
