use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::Connection;
use diesel::prelude::*;
use std::collections::HashMap;
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("new")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::NewCheckInRequest,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                if body.customer_name.trim().is_empty() {
                    return methods::standard_replies::validation_error(
                        "Customer name is required.",
                    );
                }
                if !crate::api::v1::user::is_valid_phone_number(&body.customer_phone) {
                    return methods::standard_replies::validation_error(
                        "Please check the customer phone number format.",
                    );
                }
                let plate = methods::check_in::normalize_plate(&body.license_plate);
                if plate.is_empty() {
                    return methods::standard_replies::validation_error(
                        "License plate is required.",
                    );
                }
                if body.services.is_empty() {
                    return methods::standard_replies::validation_error(
                        "At least one service must be selected.",
                    );
                }
                if body.valuable_items.trim().is_empty() {
                    return methods::standard_replies::validation_error(
                        "Valuable items must be documented for every check-in.",
                    );
                }
                if body.wash_type == model::WashType::Delayed {
                    let delayed_fields = [
                        body.security_code.as_deref(),
                        body.user_code.as_deref(),
                        body.check_in_process.as_deref(),
                    ];
                    if delayed_fields
                        .iter()
                        .any(|field| field.map_or(true, |v| v.trim().is_empty()))
                    {
                        return methods::standard_replies::validation_error(
                            "Delayed washes need a security code, a passcode, and a check-in process.",
                        );
                    }
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
                            String::from("check-in/new: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/new: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/new: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::CreateCheckIn)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        let mut pool = POOL.get().unwrap();

                        // Resolve every selected service and price the lines.
                        use crate::schema::services::dsl as service_q;
                        let mut lines: Vec<(helper_model::CheckInServiceInput, model::Service)> =
                            Vec::with_capacity(body.services.len());
                        let mut per_service_count: HashMap<i32, i32> = HashMap::new();
                        for input in &body.services {
                            let service_result = service_q::services
                                .find(input.service_id)
                                .get_result::<model::Service>(&mut pool);
                            let Ok(service) = service_result else {
                                return methods::standard_replies::not_found_response("Service");
                            };
                            if !service.is_active {
                                return methods::standard_replies::validation_error(&format!(
                                    "Service is no longer offered: {}",
                                    service.name
                                ));
                            }
                            let count =
                                per_service_count.entry(service.id).or_insert(0);
                            *count += 1;
                            if *count > service.max_washers_per_service {
                                return methods::standard_replies::validation_error(&format!(
                                    "Too many washers assigned to service: {}",
                                    service.name
                                ));
                            }
                            if methods::user::get_washer_profile(&input.washer_id)
                                .await
                                .is_err()
                            {
                                return methods::standard_replies::not_found_response("Washer");
                            }
                            lines.push((input.clone(), service));
                        }
                        let (total_price, estimated_duration) =
                            match methods::check_in::price_and_duration(&lines) {
                                Ok(totals) => totals,
                                Err(WashlineError::Validation(msg)) => {
                                    return methods::standard_replies::validation_error(&msg);
                                }
                                Err(_) => {
                                    return methods::standard_replies::internal_server_error_response(
                                        String::from("check-in/new: pricing failed"),
                                    );
                                }
                            };

                        // Same plate, same business day, still alive. The
                        // operator must acknowledge before we create another.
                        let now = Utc::now();
                        let (day_start, day_end) = methods::check_in::business_day_bounds(now);
                        use crate::schema::check_ins::dsl as check_in_q;
                        let duplicates = check_in_q::check_ins
                            .filter(check_in_q::license_plate.eq(&plate))
                            .filter(check_in_q::check_in_time.ge(day_start))
                            .filter(check_in_q::check_in_time.lt(day_end))
                            .filter(check_in_q::status.ne(model::CheckInStatus::Cancelled))
                            .get_results::<model::CheckIn>(&mut pool);
                        let Ok(duplicates) = duplicates else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/new: duplicate lookup failed"),
                            );
                        };
                        if !duplicates.is_empty() && !body.acknowledge_duplicates {
                            let reply = helper_model::DuplicatePlateReply {
                                title: String::from("Duplicate Plate"),
                                message: String::from(
                                    "This plate was already checked in today. Resubmit with acknowledge_duplicates to continue.",
                                ),
                                existing_check_ins: duplicates
                                    .into_iter()
                                    .map(model::PublishCheckIn::from)
                                    .collect(),
                            };
                            return Ok::<_, warp::Rejection>((with_status(
                                warp::reply::json(&reply),
                                StatusCode::CONFLICT,
                            )
                            .into_response(),));
                        }

                        let primary_washer_id = body.services[0].washer_id;
                        let confirmation = tokio::task::spawn_blocking(
                            methods::confirmation::generate_unique_check_in_confirmation,
                        )
                        .await
                        .unwrap_or_default();
                        if confirmation.is_empty() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/new: confirmation generation failed"),
                            );
                        }

                        let body_for_tx = body.clone();
                        let insert_result = pool.transaction::<
                            (model::CheckIn, Vec<model::CheckInService>),
                            diesel::result::Error,
                            _,
                        >(|conn| {
                            // Customers are keyed by phone number. A walk-in
                            // becomes a row the first time they are seen.
                            use crate::schema::customers::dsl as customer_q;
                            let customer = match customer_q::customers
                                .filter(customer_q::phone.eq(&body_for_tx.customer_phone))
                                .get_result::<model::Customer>(conn)
                            {
                                Ok(found) => found,
                                Err(diesel::result::Error::NotFound) => {
                                    diesel::insert_into(customer_q::customers)
                                        .values(&model::NewCustomer {
                                            name: body_for_tx.customer_name.trim().to_string(),
                                            email: body_for_tx.customer_email.clone(),
                                            phone: body_for_tx.customer_phone.clone(),
                                            is_registered: false,
                                            total_visits: 0,
                                            total_spent: 0.0,
                                        })
                                        .get_result::<model::Customer>(conn)?
                                }
                                Err(other) => return Err(other),
                            };

                            use crate::schema::customer_vehicles::dsl as vehicle_q;
                            let vehicle_known = vehicle_q::customer_vehicles
                                .filter(vehicle_q::customer_id.eq(customer.id))
                                .filter(vehicle_q::license_plate.eq(&plate))
                                .get_result::<model::CustomerVehicle>(conn);
                            if matches!(vehicle_known, Err(diesel::result::Error::NotFound)) {
                                diesel::insert_into(vehicle_q::customer_vehicles)
                                    .values(&model::NewCustomerVehicle {
                                        customer_id: customer.id,
                                        license_plate: plate.clone(),
                                        vehicle_type: body_for_tx.vehicle_type.clone(),
                                        model: body_for_tx.vehicle_model.clone(),
                                        color: body_for_tx.vehicle_color.clone(),
                                        is_primary: false,
                                    })
                                    .execute(conn)?;
                            }

                            let check_in = diesel::insert_into(check_in_q::check_ins)
                                .values(&model::NewCheckIn {
                                    confirmation: confirmation.clone(),
                                    customer_id: Some(customer.id),
                                    license_plate: plate.clone(),
                                    vehicle_type: body_for_tx.vehicle_type.clone(),
                                    vehicle_color: body_for_tx.vehicle_color.clone(),
                                    vehicle_model: body_for_tx.vehicle_model.clone(),
                                    status: model::CheckInStatus::Pending,
                                    wash_type: body_for_tx.wash_type,
                                    valuable_items: body_for_tx.valuable_items.clone(),
                                    security_code: body_for_tx.security_code.clone(),
                                    user_code: body_for_tx.user_code.clone(),
                                    check_in_process: body_for_tx.check_in_process.clone(),
                                    check_in_time: now,
                                    assigned_washer_id: Some(primary_washer_id),
                                    assigned_admin_id: actor.id,
                                    estimated_duration,
                                    total_price,
                                    payment_status: model::PaymentStatus::Pending,
                                })
                                .get_result::<model::CheckIn>(conn)?;

                            use crate::schema::check_in_services::dsl as line_q;
                            let mut saved_lines = Vec::with_capacity(body_for_tx.services.len());
                            for input in &body_for_tx.services {
                                let line = diesel::insert_into(line_q::check_in_services)
                                    .values(&model::NewCheckInService {
                                        check_in_id: check_in.id,
                                        service_id: input.service_id,
                                        washer_id: input.washer_id,
                                        custom_price: input.custom_price,
                                    })
                                    .get_result::<model::CheckInService>(conn)?;
                                saved_lines.push(line);
                            }
                            Ok((check_in, saved_lines))
                        });

                        match insert_result {
                            Ok((check_in, services)) => {
                                let detail = helper_model::CheckInDetail {
                                    check_in: check_in.into(),
                                    services,
                                    materials: Vec::new(),
                                };
                                methods::standard_replies::response_with_obj(
                                    detail,
                                    StatusCode::CREATED,
                                )
                            }
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("check-in/new: insert failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
