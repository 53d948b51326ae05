pub mod achievements;
pub mod bonus;
pub mod bonuses;
pub mod claim;
pub mod new;
pub mod qualifying;

use warp::Filter;

pub fn api_v1_milestone()
-> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("milestone")
        .and(
            new::main()
                .or(achievements::main())
                .or(qualifying::main())
                .or(claim::main())
                .or(bonus::main())
                .or(bonuses::main()),
        )
        .and(warp::path::end())
}
