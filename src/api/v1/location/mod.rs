pub mod get;
pub mod get_all;
pub mod lgas;
pub mod new;
pub mod remove;
pub mod stats;
pub mod update;
pub mod workers;

use warp::Filter;

pub fn api_v1_location()
-> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("location")
        .and(
            new::main()
                .or(get_all::main())
                .or(get::main())
                .or(update::main())
                .or(remove::main())
                .or(stats::main())
                .or(lgas::main())
                .or(workers::main()),
        )
        .and(warp::path::end())
}
