use crate::helper_model::WashlineError;
use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use std::collections::HashMap;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("get")
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

                let id_param = request.get("id").and_then(|v| v.parse::<i32>().ok());
                let confirmation_param = request.get("confirmation").cloned();
                if id_param.is_none() && confirmation_param.is_none() {
                    return methods::standard_replies::validation_error(
                        "Provide an id or a confirmation query parameter.",
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
                            String::from("check-in/get: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/get: failed to extend token"),
                            );
                        }

                        use crate::schema::check_ins::dsl as check_in_q;
                        let mut pool = POOL.get().unwrap();
                        let check_in_result = if let Some(check_in_id) = id_param {
                            check_in_q::check_ins
                                .find(check_in_id)
                                .get_result::<model::CheckIn>(&mut pool)
                        } else {
                            check_in_q::check_ins
                                .filter(
                                    check_in_q::confirmation
                                        .eq(confirmation_param.unwrap_or_default()),
                                )
                                .get_result::<model::CheckIn>(&mut pool)
                        };
                        let Ok(check_in) = check_in_result else {
                            return methods::standard_replies::not_found_response("Check-in");
                        };

                        use crate::schema::check_in_materials::dsl as material_q;
                        use crate::schema::check_in_services::dsl as line_q;
                        let services = line_q::check_in_services
                            .filter(line_q::check_in_id.eq(check_in.id))
                            .get_results::<model::CheckInService>(&mut pool);
                        let materials = material_q::check_in_materials
                            .filter(material_q::check_in_id.eq(check_in.id))
                            .get_results::<model::CheckInMaterial>(&mut pool);
                        let (Ok(services), Ok(materials)) = (services, materials) else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/get: detail queries failed"),
                            );
                        };

                        let detail = helper_model::CheckInDetail {
                            check_in: check_in.into(),
                            services,
                            materials,
                        };
                        methods::standard_replies::response_with_obj(detail, StatusCode::OK)
                    }
                };
            },
        )
}
