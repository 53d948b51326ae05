use crate::helper_model::WashlineError;
use crate::{POOL, helper_model, methods, model};
use diesel::prelude::*;
use std::collections::HashMap;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("washer-items")
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
                            String::from("inventory/washer-items: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("inventory/washer-items: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("inventory/washer-items: actor row missing"),
                            );
                        };

                        // Washers see their own kit; managers pass washer_id.
                        let washer_id = if actor.role == model::UserRole::CarWasher {
                            actor.id
                        } else {
                            match request
                                .get("washer_id")
                                .and_then(|v| v.parse::<i32>().ok())
                            {
                                Some(id) => id,
                                None => {
                                    return methods::standard_replies::validation_error(
                                        "A numeric washer_id query parameter is required.",
                                    );
                                }
                            }
                        };

                        use crate::schema::washer_materials::dsl as material_q;
                        use crate::schema::washer_tools::dsl as tool_q;
                        let mut pool = POOL.get().unwrap();
                        let tools = tool_q::washer_tools
                            .filter(tool_q::washer_id.eq(washer_id))
                            .order(tool_q::assigned_date.desc())
                            .get_results::<model::WasherTool>(&mut pool);
                        let materials = material_q::washer_materials
                            .filter(material_q::washer_id.eq(washer_id))
                            .order(material_q::assigned_date.desc())
                            .get_results::<model::WasherMaterial>(&mut pool);

                        let (Ok(tools), Ok(materials)) = (tools, materials) else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("inventory/washer-items: queries failed"),
                            );
                        };

                        let reply = helper_model::WasherItems { tools, materials };
                        methods::standard_replies::response_with_obj(reply, StatusCode::OK)
                    }
                };
            },
        )
}
