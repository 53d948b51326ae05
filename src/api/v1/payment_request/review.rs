use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("review")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::ReviewPaymentRequestBody,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                if body.action != "approve" && body.action != "reject" && body.action != "pay" {
                    return methods::standard_replies::validation_error(
                        "action must be approve, reject or pay.",
                    );
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
                            String::from("payment-request/review: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("payment-request/review: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("payment-request/review: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(
                                &actor.role,
                                Action::ReviewPaymentRequest,
                            )
                        {
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

                        // approve and reject act on pending requests, pay on
                        // approved ones.
                        let target_status = match body.action.as_str() {
                            "approve" => model::PaymentRequestStatus::Approved,
                            "reject" => model::PaymentRequestStatus::Rejected,
                            _ => model::PaymentRequestStatus::Paid,
                        };
                        let allowed = match target_status {
                            model::PaymentRequestStatus::Approved
                            | model::PaymentRequestStatus::Rejected => {
                                existing.status == model::PaymentRequestStatus::Pending
                            }
                            model::PaymentRequestStatus::Paid => {
                                existing.status == model::PaymentRequestStatus::Approved
                            }
                            model::PaymentRequestStatus::Pending => false,
                        };
                        if !allowed {
                            let msg = helper_model::ErrorResponse {
                                title: String::from("Transition Not Allowed"),
                                message: format!(
                                    "A {:?} request cannot become {:?}.",
                                    existing.status, target_status
                                ),
                            };
                            return Ok::<_, warp::Rejection>((with_status(
                                warp::reply::json(&msg),
                                StatusCode::CONFLICT,
                            )
                            .into_response(),));
                        }

                        let approval_date =
                            if target_status == model::PaymentRequestStatus::Approved {
                                Some(Utc::now())
                            } else {
                                existing.approval_date
                            };
                        let update_result =
                            diesel::update(request_q::payment_requests.find(existing.id))
                                .set((
                                    request_q::status.eq(target_status),
                                    request_q::admin_id.eq(Some(actor.id)),
                                    request_q::approval_date.eq(approval_date),
                                    request_q::admin_notes
                                        .eq(body.notes.clone().or(existing.admin_notes)),
                                    request_q::updated_at.eq(Utc::now()),
                                ))
                                .get_result::<model::PaymentRequest>(&mut pool);

                        match update_result {
                            Ok(updated) => methods::standard_replies::response_with_obj(
                                updated,
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("payment-request/review: update failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
