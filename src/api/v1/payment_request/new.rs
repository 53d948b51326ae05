use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("new")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::NewPaymentRequestBody,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
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
                            String::from("payment-request/new: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("payment-request/new: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("payment-request/new: actor row missing"),
                            );
                        };
                        // Only washers request their own earnings.
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::RequestPayment)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        let Ok(profile) =
                            methods::user::get_washer_profile(&actor.id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("payment-request/new: washer profile missing"),
                            );
                        };

                        // Deductions are recomputed now, never taken from the
                        // figures a client submitted.
                        let state =
                            match methods::earnings::washer_deduction_state(actor.id).await {
                                Ok(state) => state,
                                Err(error) => {
                                    return methods::standard_replies::internal_server_error_response(
                                        format!(
                                            "payment-request/new: deduction query failed: {:?}",
                                            error
                                        ),
                                    );
                                }
                            };

                        match methods::earnings::validate_payment_request(
                            body.requested_amount,
                            &state.deductions,
                            state.available_earnings,
                            state.has_unreturned_tools,
                        ) {
                            Ok(()) => {}
                            Err(WashlineError::NotAllowed) => {
                                return methods::standard_replies::unreturned_tools_response();
                            }
                            Err(WashlineError::Validation(msg)) => {
                                return methods::standard_replies::validation_error(&msg);
                            }
                            Err(_) => {
                                return methods::standard_replies::internal_server_error_response(
                                    String::from("payment-request/new: validation failed"),
                                );
                            }
                        }

                        let now = Utc::now();
                        let new_request = model::NewPaymentRequest {
                            washer_id: actor.id,
                            total_earnings: profile.total_earnings,
                            material_deductions: state.deductions.material_deductions,
                            tool_deductions: state.deductions.tool_deductions,
                            amount: body.requested_amount,
                            status: model::PaymentRequestStatus::Pending,
                            admin_notes: body.notes.clone(),
                            created_at: now,
                            updated_at: now,
                        };

                        use crate::schema::payment_requests::dsl as request_q;
                        let mut pool = POOL.get().unwrap();
                        let insert_result = diesel::insert_into(request_q::payment_requests)
                            .values(&new_request)
                            .get_result::<model::PaymentRequest>(&mut pool);

                        match insert_result {
                            Ok(request) => methods::standard_replies::response_with_obj(
                                request,
                                StatusCode::CREATED,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("payment-request/new: insert failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
