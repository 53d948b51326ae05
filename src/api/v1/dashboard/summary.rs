use crate::helper_model::WashlineError;
use crate::{POOL, helper_model, methods, model};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use chrono_tz::Africa::Lagos;
use diesel::dsl::{count_star, sum};
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let local_date = now.with_timezone(&Lagos).date_naive();
    let monday = local_date - Duration::days(local_date.weekday().num_days_from_monday() as i64);
    Lagos
        .from_local_datetime(&monday.and_hms_opt(0, 0, 0).unwrap())
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let local_date = now.with_timezone(&Lagos).date_naive();
    let first = local_date.with_day(1).unwrap();
    Lagos
        .from_local_datetime(&first.and_hms_opt(0, 0, 0).unwrap())
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("summary")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("user-agent"))
        .and_then(async move |method: Method, auth: String, user_agent: String| {
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
                    WashlineError::TokenFormatError => methods::tokens::token_not_hex_warp_return(),
                    WashlineError::InvalidToken => methods::tokens::token_invalid_return(),
                    _ => methods::standard_replies::internal_server_error_response(String::from(
                        "dashboard/summary: token verification failed",
                    )),
                },
                Ok(valid_token) => {
                    // token is valid
                    if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                        return methods::standard_replies::internal_server_error_response(
                            String::from("dashboard/summary: failed to extend token"),
                        );
                    }

                    let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                    else {
                        return methods::standard_replies::internal_server_error_response(
                            String::from("dashboard/summary: actor row missing"),
                        );
                    };
                    if actor.role == model::UserRole::CarWasher {
                        return methods::standard_replies::permission_denied_response();
                    }

                    use crate::schema::check_ins::dsl as check_in_q;
                    let mut pool = POOL.get().unwrap();
                    let now = Utc::now();
                    let (today_start, _) = methods::check_in::business_day_bounds(now);

                    let mut income_since = |since: DateTime<Utc>| -> QueryResult<
                        helper_model::IncomeSlice,
                    > {
                        let (amount, check_ins) = check_in_q::check_ins
                            .filter(check_in_q::status.eq(model::CheckInStatus::Paid))
                            .filter(check_in_q::paid_time.ge(Some(since)))
                            .select((sum(check_in_q::total_price), count_star()))
                            .get_result::<(Option<f64>, i64)>(&mut pool)?;
                        Ok(helper_model::IncomeSlice {
                            amount: amount.unwrap_or(0.0),
                            check_ins,
                        })
                    };

                    let today = income_since(today_start);
                    let this_week = income_since(week_start(now));
                    let this_month = income_since(month_start(now));
                    let (Ok(today), Ok(this_week), Ok(this_month)) =
                        (today, this_week, this_month)
                    else {
                        return methods::standard_replies::internal_server_error_response(
                            String::from("dashboard/summary: income queries failed"),
                        );
                    };

                    let mut status_count = |status: model::CheckInStatus| -> QueryResult<i64> {
                        check_in_q::check_ins
                            .filter(check_in_q::status.eq(status))
                            .select(count_star())
                            .get_result::<i64>(&mut pool)
                    };
                    let pending = status_count(model::CheckInStatus::Pending);
                    let in_progress = status_count(model::CheckInStatus::InProgress);
                    let completed_unpaid = status_count(model::CheckInStatus::Completed);
                    let (Ok(pending), Ok(in_progress), Ok(completed_unpaid)) =
                        (pending, in_progress, completed_unpaid)
                    else {
                        return methods::standard_replies::internal_server_error_response(
                            String::from("dashboard/summary: status counts failed"),
                        );
                    };

                    use crate::schema::payment_requests::dsl as request_q;
                    let pending_request_total = request_q::payment_requests
                        .filter(request_q::status.eq(model::PaymentRequestStatus::Pending))
                        .select(sum(request_q::amount))
                        .get_result::<Option<f64>>(&mut pool);
                    let Ok(pending_request_total) = pending_request_total else {
                        return methods::standard_replies::internal_server_error_response(
                            String::from("dashboard/summary: payment request sum failed"),
                        );
                    };

                    let summary = helper_model::DashboardSummary {
                        today,
                        this_week,
                        this_month,
                        pending_check_ins: pending,
                        in_progress_check_ins: in_progress,
                        completed_unpaid_check_ins: completed_unpaid,
                        pending_payment_request_total: pending_request_total.unwrap_or(0.0),
                    };
                    methods::standard_replies::response_with_obj(summary, StatusCode::OK)
                }
            };
        })
}
