pub mod get_all;
pub mod new;
pub mod remove;
pub mod toggle;
pub mod update;

use warp::Filter;

pub fn api_v1_service()
-> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("service")
        .and(
            new::main()
                .or(get_all::main())
                .or(update::main())
                .or(toggle::main())
                .or(remove::main()),
        )
        .and(warp::path::end())
}
