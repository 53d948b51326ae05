use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

const OPERATORS: [&str; 5] = [">=", "<=", "=", ">", "<"];

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("new")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::NewMilestoneRequest,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                if body.name.trim().is_empty() {
                    return methods::standard_replies::validation_error(
                        "Milestone name is required.",
                    );
                }
                if !OPERATORS.contains(&body.condition_operator.as_str()) {
                    return methods::standard_replies::validation_error(
                        "condition_operator must be one of >=, <=, =, >, <.",
                    );
                }
                if body.condition_value < 0.0 || body.reward.unwrap_or(0.0) < 0.0 {
                    return methods::standard_replies::validation_error(
                        "Condition value and reward cannot be negative.",
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
                            String::from("milestone/new: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("milestone/new: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("milestone/new: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::ManageMilestones)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        let new_milestone = model::NewMilestone {
                            name: body.name.trim().to_string(),
                            description: body.description.clone(),
                            milestone_type: body.milestone_type,
                            condition_operator: body.condition_operator.clone(),
                            condition_value: body.condition_value,
                            reward: body.reward,
                            is_active: true,
                        };

                        use crate::schema::milestones::dsl as milestone_q;
                        let mut pool = POOL.get().unwrap();
                        let insert_result = diesel::insert_into(milestone_q::milestones)
                            .values(&new_milestone)
                            .get_result::<model::Milestone>(&mut pool);

                        match insert_result {
                            Ok(milestone) => methods::standard_replies::response_with_obj(
                                milestone,
                                StatusCode::CREATED,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("milestone/new: insert failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
