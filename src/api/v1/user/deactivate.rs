use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("deactivate")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::DeactivateUserRequest,
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
                            String::from("user/deactivate: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("user/deactivate: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("user/deactivate: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::DeactivateUser)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }
                        if actor.id == body.user_id {
                            return methods::standard_replies::validation_error(
                                "You cannot deactivate your own account.",
                            );
                        }

                        use crate::schema::users::dsl as user_q;
                        let mut pool = POOL.get().unwrap();
                        let target = user_q::users
                            .find(body.user_id)
                            .get_result::<model::User>(&mut pool);
                        let Ok(target) = target else {
                            return methods::standard_replies::not_found_response("User");
                        };

                        let update_result = diesel::update(user_q::users.find(target.id))
                            .set((
                                user_q::is_active.eq(false),
                                user_q::updated_at.eq(Utc::now()),
                            ))
                            .get_result::<model::User>(&mut pool);

                        match update_result {
                            Ok(updated) => {
                                // Deactivated accounts lose their open sessions.
                                use crate::schema::access_tokens::dsl as token_q;
                                let _ = diesel::delete(
                                    token_q::access_tokens
                                        .filter(token_q::user_id.eq(updated.id)),
                                )
                                .execute(&mut pool);

                                let pub_user: model::PublishUser = updated.into();
                                methods::standard_replies::response_with_obj(
                                    pub_user,
                                    StatusCode::OK,
                                )
                            }
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("user/deactivate: update failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
