pub mod cancel;
pub mod deductions;
pub mod get_all;
pub mod new;
pub mod review;

use warp::Filter;

pub fn api_v1_payment_request()
-> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("payment-request")
        .and(
            new::main()
                .or(deductions::main())
                .or(get_all::main())
                .or(review::main())
                .or(cancel::main()),
        )
        .and(warp::path::end())
}
