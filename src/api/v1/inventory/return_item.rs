use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("return-item")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::ReturnItemRequest,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                if body.kind != "tool" && body.kind != "material" {
                    return methods::standard_replies::validation_error(
                        "kind must be tool or material.",
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
                            String::from("inventory/return-item: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("inventory/return-item: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("inventory/return-item: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::ManageInventory)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        let mut pool = POOL.get().unwrap();
                        let now = Utc::now();
                        if body.kind == "tool" {
                            use crate::schema::washer_tools::dsl as tool_q;
                            let update_result = diesel::update(
                                tool_q::washer_tools
                                    .find(body.item_id)
                                    .filter(tool_q::is_returned.eq(false)),
                            )
                            .set((
                                tool_q::is_returned.eq(true),
                                tool_q::returned_date.eq(Some(now)),
                            ))
                            .get_result::<model::WasherTool>(&mut pool);
                            match update_result {
                                Ok(tool) => methods::standard_replies::response_with_obj(
                                    tool,
                                    StatusCode::OK,
                                ),
                                Err(diesel::result::Error::NotFound) => {
                                    methods::standard_replies::not_found_response(
                                        "Unreturned tool",
                                    )
                                }
                                Err(error) => {
                                    methods::standard_replies::internal_server_error_response(
                                        format!(
                                            "inventory/return-item: tool update failed: {:?}",
                                            error
                                        ),
                                    )
                                }
                            }
                        } else {
                            use crate::schema::washer_materials::dsl as material_q;
                            let update_result = diesel::update(
                                material_q::washer_materials
                                    .find(body.item_id)
                                    .filter(material_q::is_returned.eq(false)),
                            )
                            .set((
                                material_q::is_returned.eq(true),
                                material_q::returned_date.eq(Some(now)),
                            ))
                            .get_result::<model::WasherMaterial>(&mut pool);
                            match update_result {
                                Ok(material) => methods::standard_replies::response_with_obj(
                                    material,
                                    StatusCode::OK,
                                ),
                                Err(diesel::result::Error::NotFound) => {
                                    methods::standard_replies::not_found_response(
                                        "Unreturned material",
                                    )
                                }
                                Err(error) => {
                                    methods::standard_replies::internal_server_error_response(
                                        format!(
                                            "inventory/return-item: material update failed: {:?}",
                                            error
                                        ),
                                    )
                                }
                            }
                        }
                    }
                };
            },
        )
}
