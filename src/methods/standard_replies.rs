use crate::{helper_model, integration, model};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

pub fn validation_error(err_msg: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Validation Error"),
        message: err_msg.to_string(),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::BAD_REQUEST,
    )
    .into_response(),))
}

pub fn internal_server_error_response(msg: String) -> Result<(warp::reply::Response,), Rejection> {
    let _ = tokio::task::spawn(async move {
        let dev = integration::sendgrid_washline::make_email_obj("dev@washline.app", "Washline Dev Team");
        let _ = integration::sendgrid_washline::send_email(
            Option::from("Washline Server"),
            dev,
            "Internal Server Error",
            &msg,
            None,
        )
        .await;
    });
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Internal Server Error"),
        message: String::from("Please try again later. If issue present, contact us at dev@washline.app "),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .into_response(),))
}

pub fn method_not_allowed_response() -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Method Not Allowed"),
        message: String::from("Using third party applications is not encouraged. And Washline will not guarantee the product. "),
    };
    Ok((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::METHOD_NOT_ALLOWED,
    )
    .into_response(),))
}

pub fn permission_denied_response() -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Permission Denied"),
        message: String::from("Your role does not allow this operation."),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::FORBIDDEN).into_response(),))
}

pub fn not_found_response(what: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Not Found"),
        message: what.to_owned() + " does not exist.",
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::NOT_FOUND).into_response(),))
}

pub fn transition_not_allowed_response(
    from: &model::CheckInStatus,
    to: &model::CheckInStatus,
) -> Result<(warp::reply::Response,), Rejection> {
    let msg_txt = format!("Check-in cannot move from {:?} to {:?}.", from, to);
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Transition Not Allowed"),
        message: msg_txt,
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::CONFLICT).into_response(),))
}

pub fn passcode_mismatch_response() -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Passcode Required"),
        message: String::from("The passcode does not match this check-in. Please try again."),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::FORBIDDEN).into_response(),))
}

pub fn unreturned_tools_response() -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Payment Request Not Allowed"),
        message: String::from("Please return all assigned tools and materials before requesting payment."),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::FORBIDDEN).into_response(),))
}

pub fn upload_failed_response() -> Result<(warp::reply::Response,), Rejection> {
    let msg: helper_model::ErrorResponse = helper_model::ErrorResponse {
        title: String::from("Upload Failed"),
        message: String::from("The file could not be stored. Nothing was created."),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::BAD_GATEWAY).into_response(),))
}

pub fn response_with_obj<T>(
    obj: T,
    status_code: StatusCode,
) -> Result<(warp::reply::Response,), Rejection>
where
    T: serde::Serialize,
{
    Ok((warp::reply::with_status(warp::reply::json(&obj), status_code).into_response(),))
}

pub fn auth_user_reply(
    user: &model::PublishUser,
    token_data: &model::PublishAccessToken,
    is_created: bool,
) -> Result<(warp::reply::Response,), Rejection> {
    let reply = warp::reply::json(&user);
    let reply = warp::reply::with_header(reply, "token", token_data.clone().token);
    let status_code = if is_created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((warp::reply::with_status(reply, status_code).into_response(),))
}
