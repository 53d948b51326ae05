use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("claim")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::ClaimRewardRequest,
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
                            String::from("milestone/claim: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("milestone/claim: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("milestone/claim: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::ClaimReward)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        use crate::schema::milestone_achievements::dsl as achievement_q;
                        let mut pool = POOL.get().unwrap();
                        let existing = achievement_q::milestone_achievements
                            .find(body.achievement_id)
                            .get_result::<model::MilestoneAchievement>(&mut pool);
                        let Ok(existing) = existing else {
                            return methods::standard_replies::not_found_response("Achievement");
                        };

                        // A reward is claimed once.
                        if existing.reward_claimed {
                            let msg = helper_model::ErrorResponse {
                                title: String::from("Already Claimed"),
                                message: String::from(
                                    "This reward has already been claimed.",
                                ),
                            };
                            return Ok::<_, warp::Rejection>((with_status(
                                warp::reply::json(&msg),
                                StatusCode::CONFLICT,
                            )
                            .into_response(),));
                        }

                        let update_result = diesel::update(
                            achievement_q::milestone_achievements.find(existing.id),
                        )
                        .set((
                            achievement_q::reward_claimed.eq(true),
                            achievement_q::claimed_at.eq(Some(Utc::now())),
                            achievement_q::claimed_by.eq(Some(actor.id)),
                        ))
                        .get_result::<model::MilestoneAchievement>(&mut pool);

                        match update_result {
                            Ok(updated) => methods::standard_replies::response_with_obj(
                                updated,
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("milestone/claim: update failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
