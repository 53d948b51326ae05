mod check_in;
mod dashboard;
mod inventory;
mod location;
mod milestone;
mod payment_request;
mod service;
mod user;

use warp::Filter;

pub fn api_v1() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("v1")
        .and(
            user::api_v1_user()
                .or(location::api_v1_location())
                .or(service::api_v1_service())
                .or(check_in::api_v1_check_in())
                .or(inventory::api_v1_inventory())
                .or(payment_request::api_v1_payment_request())
                .or(milestone::api_v1_milestone())
                .or(dashboard::api_v1_dashboard()),
        )
        .and(warp::path::end())
}
