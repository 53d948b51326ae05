pub mod assign_material;
pub mod assign_tool;
pub mod return_item;
pub mod washer_items;

use warp::Filter;

pub fn api_v1_inventory()
-> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("inventory")
        .and(
            assign_tool::main()
                .or(assign_material::main())
                .or(return_item::main())
                .or(washer_items::main()),
        )
        .and(warp::path::end())
}
