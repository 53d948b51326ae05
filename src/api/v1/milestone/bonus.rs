use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::Connection;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("bonus")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::GrantBonusRequest,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                if body.amount <= 0.0 {
                    return methods::standard_replies::validation_error(
                        "Bonus amount must be greater than zero.",
                    );
                }
                if body.reason.trim().is_empty() {
                    return methods::standard_replies::validation_error(
                        "A reason is required.",
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
                            String::from("milestone/bonus: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("milestone/bonus: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("milestone/bonus: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::GrantBonus)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        // Recipient must exist on the side the type names.
                        match body.bonus_type {
                            model::BonusType::Washer => {
                                if methods::user::get_washer_profile(&body.recipient_id)
                                    .await
                                    .is_err()
                                {
                                    return methods::standard_replies::not_found_response(
                                        "Washer",
                                    );
                                }
                            }
                            model::BonusType::Customer => {
                                use crate::schema::customers::dsl as customer_q;
                                let mut pool = POOL.get().unwrap();
                                if customer_q::customers
                                    .find(body.recipient_id)
                                    .get_result::<model::Customer>(&mut pool)
                                    .is_err()
                                {
                                    return methods::standard_replies::not_found_response(
                                        "Customer",
                                    );
                                }
                            }
                        }

                        let now = Utc::now();
                        let bonus_type = body.bonus_type;
                        let new_bonus = model::NewBonus {
                            bonus_type,
                            recipient_id: body.recipient_id,
                            amount: body.amount,
                            reason: body.reason.trim().to_string(),
                            milestone_id: body.milestone_id,
                            status: model::BonusStatus::Pending,
                            created_at: now,
                        };

                        // Customer bonuses cost the business real money, so
                        // the expense row is written in the same transaction.
                        let mut pool = POOL.get().unwrap();
                        let grant_result = pool.transaction::<model::Bonus, diesel::result::Error, _>(
                            |conn| {
                                use crate::schema::bonuses::dsl as bonus_q;
                                let bonus = diesel::insert_into(bonus_q::bonuses)
                                    .values(&new_bonus)
                                    .get_result::<model::Bonus>(conn)?;

                                if bonus.bonus_type == model::BonusType::Customer {
                                    use crate::schema::expenses::dsl as expense_q;
                                    diesel::insert_into(expense_q::expenses)
                                        .values(&model::NewExpense {
                                            description: format!(
                                                "Customer bonus: {}",
                                                bonus.reason
                                            ),
                                            amount: bonus.amount,
                                            category: String::from("customer_bonus"),
                                            bonus_id: Some(bonus.id),
                                            incurred_at: now,
                                        })
                                        .execute(conn)?;
                                }
                                Ok(bonus)
                            },
                        );

                        match grant_result {
                            Ok(bonus) => methods::standard_replies::response_with_obj(
                                bonus,
                                StatusCode::CREATED,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("milestone/bonus: transaction failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
