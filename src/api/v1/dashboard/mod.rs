pub mod summary;
pub mod top_performers;

use warp::Filter;

pub fn api_v1_dashboard()
-> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("dashboard")
        .and(summary::main().or(top_performers::main()))
        .and(warp::path::end())
}
