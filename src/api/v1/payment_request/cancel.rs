use crate::helper_model::WashlineError;
use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("cancel")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::PaymentRequestIdBody,
                        auth: String,
                        user_agent: String| {
                if method != Method::DELETE {
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
                            String::from("payment-request/cancel: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("payment-request/cancel: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("payment-request/cancel: actor row missing"),
                            );
                        };
                        if !actor.is_active {
                            return methods::standard_replies::permission_denied_response();
                        }

                        use crate::schema::payment_requests::dsl as request_q;
                        let mut pool = POOL.get().unwrap();
                        let existing = request_q::payment_requests
                            .find(body.request_id)
                            .get_result::<model::PaymentRequest>(&mut pool);
                        let Ok(existing) = existing else {
                            return methods::standard_replies::not_found_response(
                                "Payment request",
                            );
                        };

                        // Only the washer who filed it withdraws it, and only
                        // before a manager has acted on it.
                        if existing.washer_id != actor.id {
                            return methods::standard_replies::permission_denied_response();
                        }
                        if existing.status != model::PaymentRequestStatus::Pending {
                            let msg = helper_model::ErrorResponse {
                                title: String::from("Transition Not Allowed"),
                                message: String::from(
                                    "Only pending payment requests can be withdrawn.",
                                ),
                            };
                            return Ok::<_, warp::Rejection>((with_status(
                                warp::reply::json(&msg),
                                StatusCode::CONFLICT,
                            )
                            .into_response(),));
                        }

                        let delete_result =
                            diesel::delete(request_q::payment_requests.find(existing.id))
                                .execute(&mut pool);

                        match delete_result {
                            Ok(_) => methods::standard_replies::response_with_obj(
                                helper_model::ErrorResponse {
                                    title: String::from("Withdrawn"),
                                    message: String::from(
                                        "The payment request has been withdrawn.",
                                    ),
                                },
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("payment-request/cancel: delete failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
