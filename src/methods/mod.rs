pub mod check_in;
pub mod confirmation;
pub mod earnings;
pub mod milestone;
pub mod service;
pub mod standard_replies;
pub mod tokens;
pub mod user;
