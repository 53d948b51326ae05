use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("remove")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::LocationIdBody,
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
                            String::from("location/remove: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("location/remove: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("location/remove: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::ManageLocations)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        // Locations are never hard-deleted. Historic check-ins
                        // and staff rows keep pointing at the row.
                        use crate::schema::locations::dsl as location_q;
                        let mut pool = POOL.get().unwrap();
                        let update_result =
                            diesel::update(location_q::locations.find(body.location_id))
                                .set((
                                    location_q::is_active.eq(false),
                                    location_q::updated_at.eq(Utc::now()),
                                ))
                                .get_result::<model::Location>(&mut pool);

                        match update_result {
                            Ok(location) => methods::standard_replies::response_with_obj(
                                location,
                                StatusCode::OK,
                            ),
                            Err(diesel::result::Error::NotFound) => {
                                methods::standard_replies::not_found_response("Location")
                            }
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("location/remove: update failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
