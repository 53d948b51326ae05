use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
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
                        body: helper_model::NewServiceRequest,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                let max_washers = body.max_washers_per_service.unwrap_or(1);
                if let Err(WashlineError::Validation(msg)) = methods::service::validate_service_fields(
                    &body.name,
                    body.duration_minutes,
                    max_washers,
                ) {
                    return methods::standard_replies::validation_error(&msg);
                }
                if let Err(WashlineError::Validation(msg)) = methods::service::validate_commission_split(
                    body.washer_commission_percentage,
                    body.company_commission_percentage,
                ) {
                    return methods::standard_replies::validation_error(&msg);
                }
                if body.price < 0.0 {
                    return methods::standard_replies::validation_error(
                        "Price cannot be negative.",
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
                            String::from("service/new: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("service/new: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("service/new: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::ManageServices)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        let new_service = model::NewService {
                            name: body.name.trim().to_string(),
                            description: body.description.clone(),
                            price: body.price,
                            duration_minutes: body.duration_minutes,
                            category: body.category,
                            washer_commission_percentage: body.washer_commission_percentage,
                            company_commission_percentage: body.company_commission_percentage,
                            max_washers_per_service: max_washers,
                            commission_notes: body.commission_notes.clone(),
                            is_active: true,
                        };

                        use crate::schema::services::dsl as service_q;
                        let mut pool = POOL.get().unwrap();
                        let insert_result = diesel::insert_into(service_q::services)
                            .values(&new_service)
                            .get_result::<model::Service>(&mut pool);

                        match insert_result {
                            Ok(service) => methods::standard_replies::response_with_obj(
                                service,
                                StatusCode::CREATED,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("service/new: insert failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
