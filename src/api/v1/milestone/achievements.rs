use crate::helper_model::WashlineError;
use crate::{POOL, methods, model};
use diesel::prelude::*;
use std::collections::HashMap;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

/// The permanent achievement ledger. Rows stay even if the customer later
/// drops below the threshold; the live view is the qualifying endpoint.
pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("achievements")
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
                            String::from("milestone/achievements: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("milestone/achievements: failed to extend token"),
                            );
                        }

                        use crate::schema::milestone_achievements::dsl as achievement_q;
                        let mut query = achievement_q::milestone_achievements.into_boxed();
                        if let Some(milestone_filter) = request
                            .get("milestone_id")
                            .and_then(|v| v.parse::<i32>().ok())
                        {
                            query =
                                query.filter(achievement_q::milestone_id.eq(milestone_filter));
                        }
                        if let Some(customer_filter) = request
                            .get("customer_id")
                            .and_then(|v| v.parse::<i32>().ok())
                        {
                            query = query.filter(achievement_q::customer_id.eq(customer_filter));
                        }
                        if let Some(claimed_filter) = request.get("reward_claimed") {
                            let Ok(claimed) = claimed_filter.parse::<bool>() else {
                                return methods::standard_replies::validation_error(
                                    "reward_claimed must be true or false.",
                                );
                            };
                            query = query.filter(achievement_q::reward_claimed.eq(claimed));
                        }

                        let mut pool = POOL.get().unwrap();
                        let achievements_result = query
                            .order(achievement_q::achieved_at.desc())
                            .get_results::<model::MilestoneAchievement>(&mut pool);

                        match achievements_result {
                            Ok(achievements) => methods::standard_replies::response_with_obj(
                                achievements,
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("milestone/achievements: query failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
