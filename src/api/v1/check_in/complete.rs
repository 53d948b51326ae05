use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("complete")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::CompleteCheckInRequest,
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
                            String::from("check-in/complete: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/complete: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/complete: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::CompleteCheckIn)
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

                        if actor.role == model::UserRole::CarWasher
                            && check_in.assigned_washer_id != Some(actor.id)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }
                        if !methods::check_in::transition_allowed(
                            &check_in.status,
                            &model::CheckInStatus::Completed,
                        ) {
                            return methods::standard_replies::transition_not_allowed_response(
                                &check_in.status,
                                &model::CheckInStatus::Completed,
                            );
                        }
                        if methods::check_in::verify_completion_passcode(
                            &check_in,
                            body.passcode.as_deref(),
                        )
                        .is_err()
                        {
                            return methods::standard_replies::passcode_mismatch_response();
                        }

                        let now = Utc::now();
                        let actual_duration =
                            (now - check_in.check_in_time).num_minutes() as i32;
                        let update_result = diesel::update(check_in_q::check_ins.find(check_in.id))
                            .set((
                                check_in_q::status.eq(model::CheckInStatus::Completed),
                                check_in_q::completed_time.eq(Some(now)),
                                check_in_q::actual_duration.eq(Some(actual_duration)),
                            ))
                            .get_result::<model::CheckIn>(&mut pool);

                        match update_result {
                            Ok(updated) => methods::standard_replies::response_with_obj(
                                model::PublishCheckIn::from(updated),
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("check-in/complete: update failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
