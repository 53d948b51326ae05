use crate::{methods, model};
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply, reply};

/// Logout. Deleting the token is best effort; the reply is 200 either way so
/// a client with a stale token can still clear its session.
pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("remove-token")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::header::<String>("auth"))
        .and_then(async move |method: Method, auth: String| {
            if method != Method::DELETE {
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
            if let Ok(valid_token) = if_token_valid {
                let _ = methods::tokens::rm_token_by_binary(valid_token.token).await;
            }
            let msg = serde_json::json!({});
            Ok((with_status(reply::json(&msg), StatusCode::OK).into_response(),))
        })
}
