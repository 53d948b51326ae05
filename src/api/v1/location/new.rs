use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
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
                        body: helper_model::NewLocationRequest,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                if body.address.trim().is_empty() || body.lga.trim().is_empty() {
                    return methods::standard_replies::validation_error(
                        "Address and LGA are required.",
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
                            String::from("location/new: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("location/new: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("location/new: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::ManageLocations)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        let now = Utc::now();
                        let new_location = model::NewLocation {
                            address: body.address.trim().to_string(),
                            lga: body.lga.trim().to_string(),
                            is_active: true,
                            created_at: now,
                            updated_at: now,
                        };

                        use crate::schema::locations::dsl as location_q;
                        let mut pool = POOL.get().unwrap();
                        let insert_result = diesel::insert_into(location_q::locations)
                            .values(&new_location)
                            .get_result::<model::Location>(&mut pool);

                        match insert_result {
                            Ok(location) => methods::standard_replies::response_with_obj(
                                location,
                                StatusCode::CREATED,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("location/new: insert failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
