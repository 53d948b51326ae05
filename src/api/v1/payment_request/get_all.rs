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
                            String::from("payment-request/get-all: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("payment-request/get-all: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("payment-request/get-all: actor row missing"),
                            );
                        };

                        use crate::schema::payment_requests::dsl as request_q;
                        let mut query = request_q::payment_requests.into_boxed();
                        // Washers see only their own requests.
                        if actor.role == model::UserRole::CarWasher {
                            query = query.filter(request_q::washer_id.eq(actor.id));
                        } else if let Some(washer_filter) = request
                            .get("washer_id")
                            .and_then(|v| v.parse::<i32>().ok())
                        {
                            query = query.filter(request_q::washer_id.eq(washer_filter));
                        }
                        if let Some(status_filter) = request.get("status") {
                            let Ok(status) =
                                model::PaymentRequestStatus::from_str(status_filter)
                            else {
                                return methods::standard_replies::validation_error(
                                    "Unknown payment request status.",
                                );
                            };
                            query = query.filter(request_q::status.eq(status));
                        }

                        let mut pool = POOL.get().unwrap();
                        let requests_result = query
                            .order(request_q::created_at.desc())
                            .get_results::<model::PaymentRequest>(&mut pool);

                        match requests_result {
                            Ok(requests) => methods::standard_replies::response_with_obj(
                                requests,
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("payment-request/get-all: query failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
