use crate::helper_model::WashlineError;
use crate::{POOL, methods, model};
use diesel::prelude::*;
use std::collections::HashMap;
use std::str::FromStr;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("get-all")
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
                            String::from("service/get-all: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("service/get-all: failed to extend token"),
                            );
                        }

                        use crate::schema::services::dsl as service_q;
                        let mut query = service_q::services.into_boxed();
                        if let Some(category_filter) = request.get("category") {
                            let Ok(category) = model::ServiceCategory::from_str(category_filter)
                            else {
                                return methods::standard_replies::validation_error(
                                    "Unknown service category.",
                                );
                            };
                            query = query.filter(service_q::category.eq(category));
                        }
                        if let Some(active_filter) = request.get("is_active") {
                            let Ok(active) = active_filter.parse::<bool>() else {
                                return methods::standard_replies::validation_error(
                                    "is_active must be true or false.",
                                );
                            };
                            query = query.filter(service_q::is_active.eq(active));
                        }
                        if let Some(search) = request.get("search") {
                            let pattern = format!("%{}%", search);
                            query = query.filter(service_q::name.ilike(pattern));
                        }

                        let mut pool = POOL.get().unwrap();
                        let services_result = query
                            .order(service_q::name.asc())
                            .get_results::<model::Service>(&mut pool);

                        match services_result {
                            Ok(services) => methods::standard_replies::response_with_obj(
                                services,
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("service/get-all: query failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
