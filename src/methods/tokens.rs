use crate::POOL;
use crate::helper_model::WashlineError;
use crate::model::{AccessToken, NewAccessToken, PublishAccessToken};
use crate::schema::access_tokens::dsl::*;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use secrets::Secret;
use std::ops::Add;
use tokio::task;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

async fn generate_unique_token() -> Vec<u8> {
    loop {
        // Generate a secure random 32-byte token
        let token_vec = Secret::<[u8; 32]>::random(|s| s.to_vec());

        let token_to_return = token_vec.clone();

        let token_exists_result = task::spawn_blocking(move || {
            let mut pool = POOL.clone().get().unwrap();
            diesel::select(diesel::dsl::exists(
                crate::schema::access_tokens::table
                    .filter(crate::schema::access_tokens::token.eq(token_vec)),
            ))
            .get_result::<bool>(&mut pool)
        })
        .await;

        let token_exists = match token_exists_result {
            Ok(result) => match result {
                Ok(v) => v,
                Err(e) => {
                    // Treat a DB error as if the token exists, to force a retry.
                    eprintln!("Database error: {:?}", e);
                    true
                }
            },
            Err(join_err) => {
                eprintln!("Error joining blocking task: {:?}", join_err);
                true
            }
        };

        if !token_exists {
            return token_to_return;
        }
    }
}

pub async fn gen_token_object(_user_id: &i32, user_agent: &String) -> NewAccessToken {
    // The dashboard app keeps a long-lived session; everything else gets 10 minutes.
    let mut _exp: DateTime<Utc> = Utc::now().add(chrono::Duration::seconds(600));
    if user_agent.contains("washline-app") {
        _exp = Utc::now().add(chrono::Duration::days(28));
    }
    NewAccessToken {
        user_id: *_user_id,
        token: generate_unique_token().await,
        exp: _exp,
    }
}

pub async fn verify_user_token(
    _user_id: &i32,
    token_data: &String,
) -> Result<AccessToken, WashlineError> {
    let binary_token = hex::decode(token_data).map_err(|_| WashlineError::TokenFormatError)?;
    let uid = *_user_id;
    let mut pool = POOL.clone().get().unwrap();
    let token_in_db = task::spawn_blocking(move || {
        access_tokens
            .filter(user_id.eq(uid))
            .filter(token.eq(binary_token))
            .first::<AccessToken>(&mut pool)
    })
    .await
    .map_err(|_| WashlineError::Internal)?;

    match token_in_db {
        Ok(token_row) => {
            if token_row.exp >= Utc::now() {
                Ok(token_row)
            } else {
                Err(WashlineError::InvalidToken)
            }
        }
        Err(_) => Err(WashlineError::InvalidToken),
    }
}

pub fn extend_token(token_row: AccessToken, user_agent: &String) -> QueryResult<PublishAccessToken> {
    let mut _exp: DateTime<Utc> = Utc::now().add(chrono::Duration::seconds(600));
    if user_agent.contains("washline-app") {
        _exp = Utc::now().add(chrono::Duration::days(28));
    }
    let mut pool = POOL.clone().get().unwrap();
    let extended = diesel::update(access_tokens.filter(id.eq(token_row.id)))
        .set(exp.eq(_exp))
        .get_result::<AccessToken>(&mut pool)?;
    Ok(extended.into())
}

pub async fn rm_token_by_binary(token_bit: Vec<u8>) -> QueryResult<AccessToken> {
    let mut pool = POOL.clone().get().unwrap();
    task::spawn_blocking(move || {
        diesel::delete(access_tokens.filter(token.eq(token_bit))).get_result::<AccessToken>(&mut pool)
    })
    .await
    .unwrap()
}

pub fn token_not_hex_warp_return() -> Result<(warp::reply::Response,), Rejection> {
    let error_msg = serde_json::json!({"error": "Token not in hex format"});
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&error_msg),
        StatusCode::BAD_REQUEST,
    )
    .into_response(),))
}

pub fn token_invalid_return() -> Result<(warp::reply::Response,), Rejection> {
    let error_msg = serde_json::json!({"error": "Token not valid"});
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&error_msg),
        StatusCode::UNAUTHORIZED,
    )
    .into_response(),))
}
