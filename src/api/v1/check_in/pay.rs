use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::Connection;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("pay")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::PayCheckInRequest,
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
                            String::from("check-in/pay: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/pay: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/pay: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::RecordPayment)
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
                            &model::CheckInStatus::Paid,
                        ) {
                            return methods::standard_replies::transition_not_allowed_response(
                                &check_in.status,
                                &model::CheckInStatus::Paid,
                            );
                        }

                        // Status stamp, customer accumulators and washer
                        // commission credits all land in one transaction.
                        let payment_method = body.payment_method;
                        let pay_result = pool.transaction::<model::CheckIn, diesel::result::Error, _>(
                            |conn| {
                                let now = Utc::now();
                                let paid = diesel::update(
                                    check_in_q::check_ins.find(check_in.id),
                                )
                                .set((
                                    check_in_q::status.eq(model::CheckInStatus::Paid),
                                    check_in_q::paid_time.eq(Some(now)),
                                    check_in_q::payment_status.eq(model::PaymentStatus::Paid),
                                    check_in_q::payment_method.eq(Some(payment_method)),
                                ))
                                .get_result::<model::CheckIn>(conn)?;

                                if let Some(customer_id) = paid.customer_id {
                                    use crate::schema::customers::dsl as customer_q;
                                    diesel::update(customer_q::customers.find(customer_id))
                                        .set((
                                            customer_q::total_visits
                                                .eq(customer_q::total_visits + 1),
                                            customer_q::total_spent
                                                .eq(customer_q::total_spent + paid.total_price),
                                        ))
                                        .execute(conn)?;
                                }

                                use crate::schema::check_in_services::dsl as line_q;
                                use crate::schema::services::dsl as service_q;
                                let lines = line_q::check_in_services
                                    .filter(line_q::check_in_id.eq(paid.id))
                                    .get_results::<model::CheckInService>(conn)?;
                                for line in lines {
                                    let service = service_q::services
                                        .find(line.service_id)
                                        .get_result::<model::Service>(conn)?;
                                    let price = line.custom_price.unwrap_or(service.price);
                                    let share = methods::check_in::washer_share(
                                        price,
                                        service.washer_commission_percentage,
                                    );
                                    use crate::schema::washer_profiles::dsl as washer_q;
                                    diesel::update(
                                        washer_q::washer_profiles
                                            .filter(washer_q::user_id.eq(line.washer_id)),
                                    )
                                    .set(
                                        washer_q::total_earnings
                                            .eq(washer_q::total_earnings + share),
                                    )
                                    .execute(conn)?;
                                }
                                Ok(paid)
                            },
                        );

                        match pay_result {
                            Ok(paid) => methods::standard_replies::response_with_obj(
                                model::PublishCheckIn::from(paid),
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("check-in/pay: transaction failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
