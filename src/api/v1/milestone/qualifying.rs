use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use std::collections::HashMap;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

/// Live recomputation of who currently satisfies a milestone. First-time
/// qualifiers get an achievement row minted as a side effect, so the ledger
/// catches up with reality whenever somebody looks.
pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("qualifying")
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

                let Some(milestone_id) = request
                    .get("milestone_id")
                    .and_then(|v| v.parse::<i32>().ok())
                else {
                    return methods::standard_replies::validation_error(
                        "A numeric milestone_id query parameter is required.",
                    );
                };

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
                            String::from("milestone/qualifying: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("milestone/qualifying: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("milestone/qualifying: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::ManageMilestones)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        use crate::schema::milestones::dsl as milestone_q;
                        let mut pool = POOL.get().unwrap();
                        let milestone = milestone_q::milestones
                            .find(milestone_id)
                            .get_result::<model::Milestone>(&mut pool);
                        let Ok(milestone) = milestone else {
                            return methods::standard_replies::not_found_response("Milestone");
                        };

                        use crate::schema::customers::dsl as customer_q;
                        let customers = customer_q::customers
                            .get_results::<model::Customer>(&mut pool);
                        let Ok(customers) = customers else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("milestone/qualifying: customer query failed"),
                            );
                        };

                        use crate::schema::milestone_achievements::dsl as achievement_q;
                        let mut qualifying = Vec::new();
                        for customer in customers {
                            let Some(actual_value) =
                                methods::milestone::customer_qualifies(&milestone, &customer)
                            else {
                                continue;
                            };

                            let already_recorded = diesel::select(diesel::dsl::exists(
                                achievement_q::milestone_achievements
                                    .filter(achievement_q::customer_id.eq(customer.id))
                                    .filter(achievement_q::milestone_id.eq(milestone.id)),
                            ))
                            .get_result::<bool>(&mut pool)
                            .unwrap_or(true);
                            if !already_recorded {
                                let minted = diesel::insert_into(
                                    achievement_q::milestone_achievements,
                                )
                                .values(&model::NewMilestoneAchievement {
                                    customer_id: customer.id,
                                    milestone_id: milestone.id,
                                    achieved_at: Utc::now(),
                                    achieved_value: actual_value,
                                    reward_claimed: false,
                                })
                                .execute(&mut pool);
                                if let Err(error) = minted {
                                    eprintln!(
                                        "milestone/qualifying: achievement insert failed: {:?}",
                                        error
                                    );
                                }
                            }

                            qualifying.push(helper_model::QualifyingCustomer {
                                customer,
                                actual_value,
                            });
                        }

                        methods::standard_replies::response_with_obj(qualifying, StatusCode::OK)
                    }
                };
            },
        )
}
