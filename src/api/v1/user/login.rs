use crate::{POOL, helper_model, methods, model};
use bcrypt::verify;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("login")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method, body: helper_model::LoginRequest, user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                use crate::schema::users::dsl::*;
                let mut pool = POOL.get().unwrap();
                let user_result = users
                    .filter(email.eq(&body.email))
                    .get_result::<model::User>(&mut pool);

                let Ok(user) = user_result else {
                    let error_msg = helper_model::ErrorResponse {
                        title: String::from("Login Failed"),
                        message: String::from("Email or password is incorrect."),
                    };
                    return Ok::<_, warp::Rejection>((with_status(
                        warp::reply::json(&error_msg),
                        StatusCode::UNAUTHORIZED,
                    )
                    .into_response(),));
                };

                let password_matches = verify(&body.password, &user.password).unwrap_or(false);
                if !password_matches {
                    let error_msg = helper_model::ErrorResponse {
                        title: String::from("Login Failed"),
                        message: String::from("Email or password is incorrect."),
                    };
                    return Ok::<_, warp::Rejection>((with_status(
                        warp::reply::json(&error_msg),
                        StatusCode::UNAUTHORIZED,
                    )
                    .into_response(),));
                }

                if !user.is_active {
                    let error_msg = helper_model::ErrorResponse {
                        title: String::from("Account Deactivated"),
                        message: String::from("This account has been deactivated. Contact your manager."),
                    };
                    return Ok::<_, warp::Rejection>((with_status(
                        warp::reply::json(&error_msg),
                        StatusCode::FORBIDDEN,
                    )
                    .into_response(),));
                }

                let new_access_token =
                    methods::tokens::gen_token_object(&user.id, &user_agent).await;
                use crate::schema::access_tokens::dsl::*;
                let insert_token_result = diesel::insert_into(access_tokens)
                    .values(&new_access_token)
                    .get_result::<model::AccessToken>(&mut pool);

                let Ok(token_row) = insert_token_result else {
                    return methods::standard_replies::internal_server_error_response(
                        String::from("user/login: failed to insert access token"),
                    );
                };

                let pub_token: model::PublishAccessToken = token_row.into();
                let pub_user: model::PublishUser = user.into();
                methods::standard_replies::auth_user_reply(&pub_user, &pub_token, false)
            },
        )
}
