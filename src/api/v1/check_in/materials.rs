use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::Connection;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("materials")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::LogMaterialsRequest,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                if body.materials.is_empty() {
                    return methods::standard_replies::validation_error(
                        "At least one material line is required.",
                    );
                }
                if body.materials.iter().any(|m| m.quantity_used <= 0) {
                    return methods::standard_replies::validation_error(
                        "Quantities must be greater than zero.",
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
                            String::from("check-in/materials: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/materials: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/materials: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::LogMaterials)
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
                        if check_in.assigned_washer_id != Some(actor.id) {
                            return methods::standard_replies::permission_denied_response();
                        }
                        if check_in.status != model::CheckInStatus::InProgress
                            && check_in.status != model::CheckInStatus::Completed
                        {
                            return methods::standard_replies::transition_not_allowed_response(
                                &check_in.status,
                                &model::CheckInStatus::InProgress,
                            );
                        }

                        // Usage only comes out of the washer's own unreturned
                        // stock. The name is snapshotted onto the usage row.
                        let washer_id = actor.id;
                        let check_in_id = check_in.id;
                        let material_inputs = body.materials.clone();
                        let log_result = pool.transaction::<
                            Vec<model::CheckInMaterial>,
                            diesel::result::Error,
                            _,
                        >(|conn| {
                            use crate::schema::check_in_materials::dsl as usage_q;
                            use crate::schema::washer_materials::dsl as stock_q;
                            let mut saved = Vec::with_capacity(material_inputs.len());
                            for input in &material_inputs {
                                let stock = stock_q::washer_materials
                                    .find(input.material_id)
                                    .filter(stock_q::washer_id.eq(washer_id))
                                    .filter(stock_q::is_returned.eq(false))
                                    .get_result::<model::WasherMaterial>(conn)?;
                                // Stock is consumed across every wash it was
                                // used on, so prior usage rows count too.
                                let already_used = usage_q::check_in_materials
                                    .filter(usage_q::material_id.eq(stock.id))
                                    .select(diesel::dsl::sum(usage_q::quantity_used))
                                    .get_result::<Option<i64>>(conn)?
                                    .unwrap_or(0);
                                if !methods::check_in::stock_covers(
                                    stock.quantity,
                                    already_used,
                                    input.quantity_used,
                                ) {
                                    return Err(diesel::result::Error::RollbackTransaction);
                                }
                                let usage = diesel::insert_into(usage_q::check_in_materials)
                                    .values(&model::NewCheckInMaterial {
                                        check_in_id,
                                        washer_id,
                                        material_id: stock.id,
                                        material_name: stock.material_name.clone(),
                                        quantity_used: input.quantity_used,
                                        usage_date: Utc::now(),
                                    })
                                    .get_result::<model::CheckInMaterial>(conn)?;
                                saved.push(usage);
                            }
                            Ok(saved)
                        });

                        match log_result {
                            Ok(saved) => methods::standard_replies::response_with_obj(
                                saved,
                                StatusCode::CREATED,
                            ),
                            Err(diesel::result::Error::NotFound) => {
                                methods::standard_replies::not_found_response(
                                    "Assigned material",
                                )
                            }
                            Err(diesel::result::Error::RollbackTransaction) => {
                                methods::standard_replies::validation_error(
                                    "Quantity used exceeds the assigned stock.",
                                )
                            }
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("check-in/materials: transaction failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
