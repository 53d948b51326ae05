use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
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
                        body: helper_model::CancelCheckInRequest,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                if body.reason.trim().is_empty() {
                    return methods::standard_replies::validation_error(
                        "A cancellation reason is required.",
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
                            String::from("check-in/cancel: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/cancel: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/cancel: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::CancelCheckIn)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        use crate::schema::check_ins::dsl as check_in_q;
                        let mut pool = POOL.get().unwrap();
                        let check_in = check_in_q::check_ins
                            .find(body.check_in_id)
                            .get_result::<model::CheckIn>(&mut pool);
                        let Ok(check_in) = check_in else {
                            return methods::standard_replies::not_found_response("Check-in");
                        };
                        if !methods::check_in::transition_allowed(
                            &check_in.status,
                            &model::CheckInStatus::Cancelled,
                        ) {
                            return methods::standard_replies::transition_not_allowed_response(
                                &check_in.status,
                                &model::CheckInStatus::Cancelled,
                            );
                        }

                        let update_result = diesel::update(check_in_q::check_ins.find(check_in.id))
                            .set((
                                check_in_q::status.eq(model::CheckInStatus::Cancelled),
                                check_in_q::reason.eq(Some(body.reason.trim().to_string())),
                            ))
                            .get_result::<model::CheckIn>(&mut pool);

                        match update_result {
                            Ok(updated) => methods::standard_replies::response_with_obj(
                                model::PublishCheckIn::from(updated),
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("check-in/cancel: update failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
