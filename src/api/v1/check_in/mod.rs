pub mod assign_and_start;
pub mod cancel;
pub mod complete;
pub mod get;
pub mod get_all;
pub mod materials;
pub mod new;
pub mod pay;
pub mod reassign;
pub mod start;

use warp::Filter;

pub fn api_v1_check_in()
-> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("check-in")
        .and(
            new::main()
                .or(get_all::main())
                .or(get::main())
                .or(start::main())
                .or(complete::main())
                .or(pay::main())
                .or(cancel::main())
                .or(assign_and_start::main())
                .or(reassign::main())
                .or(materials::main()),
        )
        .and(warp::path::end())
}
