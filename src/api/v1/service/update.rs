use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("update")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::UpdateServiceRequest,
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
                            String::from("service/update: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("service/update: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("service/update: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::ManageServices)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        use crate::schema::services::dsl as service_q;
                        let mut pool = POOL.get().unwrap();
                        let existing = service_q::services
                            .find(body.service_id)
                            .get_result::<model::Service>(&mut pool);
                        let Ok(existing) = existing else {
                            return methods::standard_replies::not_found_response("Service");
                        };

                        // Merge the patch over the stored row, then re-check
                        // the full invariants on the merged values.
                        let name = body.name.unwrap_or(existing.name);
                        let duration_minutes =
                            body.duration_minutes.unwrap_or(existing.duration_minutes);
                        let max_washers = body
                            .max_washers_per_service
                            .unwrap_or(existing.max_washers_per_service);
                        let washer_pct = body
                            .washer_commission_percentage
                            .unwrap_or(existing.washer_commission_percentage);
                        let company_pct = body
                            .company_commission_percentage
                            .unwrap_or(existing.company_commission_percentage);
                        let price = body.price.unwrap_or(existing.price);

                        if let Err(WashlineError::Validation(msg)) =
                            methods::service::validate_service_fields(
                                &name,
                                duration_minutes,
                                max_washers,
                            )
                        {
                            return methods::standard_replies::validation_error(&msg);
                        }
                        if let Err(WashlineError::Validation(msg)) =
                            methods::service::validate_commission_split(washer_pct, company_pct)
                        {
                            return methods::standard_replies::validation_error(&msg);
                        }
                        if price < 0.0 {
                            return methods::standard_replies::validation_error(
                                "Price cannot be negative.",
                            );
                        }

                        let update_result = diesel::update(service_q::services.find(existing.id))
                            .set((
                                service_q::name.eq(name),
                                service_q::description
                                    .eq(body.description.or(existing.description)),
                                service_q::price.eq(price),
                                service_q::duration_minutes.eq(duration_minutes),
                                service_q::category.eq(body.category.unwrap_or(existing.category)),
                                service_q::washer_commission_percentage.eq(washer_pct),
                                service_q::company_commission_percentage.eq(company_pct),
                                service_q::max_washers_per_service.eq(max_washers),
                                service_q::commission_notes
                                    .eq(body.commission_notes.or(existing.commission_notes)),
                                service_q::is_active
                                    .eq(body.is_active.unwrap_or(existing.is_active)),
                            ))
                            .get_result::<model::Service>(&mut pool);

                        match update_result {
                            Ok(service) => methods::standard_replies::response_with_obj(
                                service,
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("service/update: update failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
