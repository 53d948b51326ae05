use crate::helper_model::WashlineError;
use crate::{POOL, methods, model};
use diesel::prelude::*;
use std::collections::HashMap;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("bonuses")
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
                            String::from("milestone/bonuses: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("milestone/bonuses: failed to extend token"),
                            );
                        }

                        use crate::schema::bonuses::dsl as bonus_q;
                        let mut query = bonus_q::bonuses.into_boxed();
                        if let Some(type_filter) = request.get("bonus_type") {
                            let bonus_type = match type_filter.as_str() {
                                "customer" => model::BonusType::Customer,
                                "washer" => model::BonusType::Washer,
                                _ => {
                                    return methods::standard_replies::validation_error(
                                        "bonus_type must be customer or washer.",
                                    );
                                }
                            };
                            query = query.filter(bonus_q::bonus_type.eq(bonus_type));
                        }
                        if let Some(status_filter) = request.get("status") {
                            let status = match status_filter.as_str() {
                                "pending" => model::BonusStatus::Pending,
                                "approved" => model::BonusStatus::Approved,
                                "paid" => model::BonusStatus::Paid,
                                _ => {
                                    return methods::standard_replies::validation_error(
                                        "status must be pending, approved or paid.",
                                    );
                                }
                            };
                            query = query.filter(bonus_q::status.eq(status));
                        }
                        if let Some(recipient_filter) = request
                            .get("recipient_id")
                            .and_then(|v| v.parse::<i32>().ok())
                        {
                            query = query.filter(bonus_q::recipient_id.eq(recipient_filter));
                        }

                        let mut pool = POOL.get().unwrap();
                        let bonuses_result = query
                            .order(bonus_q::created_at.desc())
                            .get_results::<model::Bonus>(&mut pool);

                        match bonuses_result {
                            Ok(bonuses) => methods::standard_replies::response_with_obj(
                                bonuses,
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("milestone/bonuses: query failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
