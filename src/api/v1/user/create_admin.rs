use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{POOL, helper_model, methods, model};
use bcrypt::{DEFAULT_COST, hash};
use chrono::Utc;
use diesel::Connection;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("create-admin")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: helper_model::CreateAdminRequest,
                        auth: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                if body.name.trim().is_empty() || body.password.len() < 6 {
                    return methods::standard_replies::validation_error(
                        "Name is required and password must be at least 6 characters.",
                    );
                }
                if !super::is_valid_email(&body.email) || !super::is_valid_phone_number(&body.phone)
                {
                    return methods::standard_replies::validation_error(
                        "Please check the email and phone number format.",
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
                            String::from("user/create-admin: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("user/create-admin: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("user/create-admin: actor row missing"),
                            );
                        };
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::CreateAdmin)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        use crate::schema::users::dsl as user_q;
                        let mut pool = POOL.get().unwrap();
                        let existing = user_q::users
                            .filter(
                                user_q::email
                                    .eq(&body.email)
                                    .or(user_q::phone.eq(&body.phone)),
                            )
                            .get_result::<model::User>(&mut pool);
                        if existing.is_ok() {
                            let error_msg = helper_model::ErrorResponse {
                                title: String::from("Conflict"),
                                message: String::from("Email or phone number already exists."),
                            };
                            return Ok::<_, warp::Rejection>((with_status(
                                warp::reply::json(&error_msg),
                                StatusCode::CONFLICT,
                            )
                            .into_response(),));
                        }

                        let Ok(hashed_pass) = hash(&body.password, DEFAULT_COST) else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("user/create-admin: bcrypt failure"),
                            );
                        };

                        let now = Utc::now();
                        let new_user = model::NewUser {
                            name: body.name.clone(),
                            email: body.email.clone(),
                            phone: body.phone.clone(),
                            password: hashed_pass,
                            role: model::UserRole::Admin,
                            is_active: true,
                            created_at: now,
                            updated_at: now,
                        };

                        // User, profile and next-of-kin rows land as one unit
                        // or not at all.
                        let insert_result = pool.transaction::<model::User, diesel::result::Error, _>(
                            |conn| {
                                let user = diesel::insert_into(user_q::users)
                                    .values(&new_user)
                                    .get_result::<model::User>(conn)?;

                                use crate::schema::admin_profiles::dsl as profile_q;
                                let new_profile = model::NewAdminProfile {
                                    user_id: user.id,
                                    location_id: body.location_id,
                                    address: body.address.clone(),
                                    cv_path: body.cv_path.clone(),
                                    picture_path: body.picture_path.clone(),
                                };
                                diesel::insert_into(profile_q::admin_profiles)
                                    .values(&new_profile)
                                    .execute(conn)?;

                                use crate::schema::next_of_kins::dsl as kin_q;
                                for kin in &body.next_of_kin {
                                    let new_kin = model::NewNextOfKin {
                                        user_id: user.id,
                                        name: kin.name.clone(),
                                        phone: kin.phone.clone(),
                                        relationship: kin.relationship.clone(),
                                        address: kin.address.clone(),
                                    };
                                    diesel::insert_into(kin_q::next_of_kins)
                                        .values(&new_kin)
                                        .execute(conn)?;
                                }
                                Ok(user)
                            },
                        );

                        match insert_result {
                            Ok(user) => {
                                let pub_user: model::PublishUser = user.into();
                                methods::standard_replies::response_with_obj(
                                    pub_user,
                                    StatusCode::CREATED,
                                )
                            }
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("user/create-admin: insert failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
