pub mod create_admin;
pub mod create_carwasher;
pub mod deactivate;
pub mod login;
pub mod remove_token;
pub mod retrieve;
pub mod upload_file;

use regex::Regex;
use warp::Filter;

pub fn api_v1_user() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
{
    warp::path("user")
        .and(
            login::main()
                .or(retrieve::main())
                .or(create_admin::main())
                .or(create_carwasher::main())
                .or(upload_file::main())
                .or(deactivate::main())
                .or(remove_token::main()),
        )
        .and(warp::path::end())
}

pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 {
        return false;
    }
    lazy_static::lazy_static! {
        static ref EMAIL_REGEX: Regex = Regex::new(
            r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+(?:\.[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+)+$"
        ).expect("Invalid regex");
    }
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_phone_number(phone: &str) -> bool {
    lazy_static::lazy_static! {
        static ref PHONE_REGEX: Regex = Regex::new(
            r"^\d{10,11}$"  // Nigerian numbers, with or without the leading zero
        ).expect("Invalid phone number regex");
    }
    PHONE_REGEX.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        assert!(is_valid_email("ops@washline.app"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn phone_format() {
        assert!(is_valid_phone_number("08012345678"));
        assert!(is_valid_phone_number("8012345678"));
        assert!(!is_valid_phone_number("080-1234-5678"));
        assert!(!is_valid_phone_number("12345"));
    }
}
