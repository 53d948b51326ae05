use crate::helper_model::WashlineError;
use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use std::collections::HashMap;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("top-performers")
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
                            String::from("dashboard/top-performers: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("dashboard/top-performers: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("dashboard/top-performers: actor row missing"),
                            );
                        };
                        if actor.role == model::UserRole::CarWasher {
                            return methods::standard_replies::permission_denied_response();
                        }

                        let limit = request
                            .get("limit")
                            .and_then(|v| v.parse::<i64>().ok())
                            .filter(|v| *v > 0)
                            .unwrap_or(5);

                        use crate::schema::users::dsl as user_q;
                        use crate::schema::washer_profiles::dsl as washer_q;
                        let mut pool = POOL.get().unwrap();
                        let rows_result = washer_q::washer_profiles
                            .inner_join(user_q::users)
                            .filter(user_q::is_active.eq(true))
                            .order(washer_q::total_earnings.desc())
                            .limit(limit)
                            .select((
                                crate::schema::users::all_columns,
                                washer_q::total_earnings,
                            ))
                            .get_results::<(model::User, f64)>(&mut pool);

                        match rows_result {
                            Ok(rows) => {
                                let performers = rows
                                    .into_iter()
                                    .map(|(user, total_earnings)| helper_model::TopPerformer {
                                        user: user.into(),
                                        total_earnings,
                                    })
                                    .collect::<Vec<helper_model::TopPerformer>>();
                                methods::standard_replies::response_with_obj(
                                    performers,
                                    StatusCode::OK,
                                )
                            }
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("dashboard/top-performers: query failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
