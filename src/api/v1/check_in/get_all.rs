use crate::helper_model::WashlineError;
use crate::{POOL, methods, model};
use chrono::Utc;
use diesel::prelude::*;
use std::collections::HashMap;
use std::str::FromStr;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("get-all")
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
                            String::from("check-in/get-all: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/get-all: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("check-in/get-all: actor row missing"),
                            );
                        };

                        // One filtered query. Washers only ever see their own
                        // assignments regardless of what they ask for.
                        use crate::schema::check_ins::dsl as check_in_q;
                        let mut query = check_in_q::check_ins.into_boxed();
                        if actor.role == model::UserRole::CarWasher {
                            query = query.filter(check_in_q::assigned_washer_id.eq(actor.id));
                        } else if let Some(washer_filter) = request
                            .get("washer_id")
                            .and_then(|v| v.parse::<i32>().ok())
                        {
                            query = query.filter(check_in_q::assigned_washer_id.eq(washer_filter));
                        }
                        if let Some(status_filter) = request.get("status") {
                            let Ok(status) = model::CheckInStatus::from_str(status_filter) else {
                                return methods::standard_replies::validation_error(
                                    "Unknown check-in status.",
                                );
                            };
                            query = query.filter(check_in_q::status.eq(status));
                        }
                        if let Some(plate_filter) = request.get("license_plate") {
                            // Plates are stored normalized, so a partial search
                            // goes through the same normalization first.
                            let plate = methods::check_in::normalize_plate(plate_filter);
                            query = query
                                .filter(check_in_q::license_plate.ilike(format!("%{}%", plate)));
                        }
                        if request.get("today").map(String::as_str) == Some("true") {
                            let (day_start, day_end) =
                                methods::check_in::business_day_bounds(Utc::now());
                            query = query
                                .filter(check_in_q::check_in_time.ge(day_start))
                                .filter(check_in_q::check_in_time.lt(day_end));
                        }

                        let mut pool = POOL.get().unwrap();
                        let check_ins_result = query
                            .order(check_in_q::check_in_time.desc())
                            .get_results::<model::CheckIn>(&mut pool);

                        match check_ins_result {
                            Ok(check_ins) => methods::standard_replies::response_with_obj(
                                check_ins
                                    .into_iter()
                                    .map(model::PublishCheckIn::from)
                                    .collect::<Vec<_>>(),
                                StatusCode::OK,
                            ),
                            Err(error) => methods::standard_replies::internal_server_error_response(
                                format!("check-in/get-all: query failed: {:?}", error),
                            ),
                        }
                    }
                };
            },
        )
}
