use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("assign-material")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::AssignMaterialRequest,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                if body.material_name.trim().is_empty()
                    || body.quantity <= 0
                    || body.unit_value < 0.0
                {
                    return methods::standard_replies::validation_error(
                        "Material name, a positive quantity and a non-negative unit value are required.",
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
                            String::from("inventory/assign-material: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("inventory/assign-material: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("inventory/assign-material: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::ManageInventory)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        if methods::user::get_washer_profile(&body.washer_id)
                            .await
                            .is_err()
                        {
                            return methods::standard_replies::not_found_response("Washer");
                        }

                        use crate::schema::washer_materials::dsl as material_q;
                        let mut pool = POOL.get().unwrap();
                        let insert_result = diesel::insert_into(material_q::washer_materials)
                            .values(&model::NewWasherMaterial {
                                washer_id: body.washer_id,
                                material_name: body.material_name.trim().to_string(),
                                material_type: body.material_type.clone(),
                                quantity: body.quantity,
                                unit_value: body.unit_value,
                                assigned_date: Utc::now(),
                                is_returned: false,
                            })
                            .get_result::<model::WasherMaterial>(&mut pool);

                        match insert_result {
                            Ok(material) => methods::standard_replies::response_with_obj(
                                material,
                                StatusCode::CREATED,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("inventory/assign-material: insert failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
