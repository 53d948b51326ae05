use crate::helper_model::WashlineError;
use crate::methods::user::Action;
use crate::{helper_model, integration, methods, model};
use bytes::Bytes;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("upload-file")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::bytes())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("file-kind"))
        .and(warp::header::<String>("file-name"))
        .and(warp::header::<String>("user-agent"))
        .and_then(
            async move |method: Method,
                        body: Bytes,
                        auth: String,
                        file_kind: String,
                        file_name: String,
                        user_agent: String| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }

                let object_prefix = match file_kind.as_str() {
                    "admin-cv" => integration::gcloud_storage_washline::ADMIN_CV_PREFIX,
                    "admin-picture" => integration::gcloud_storage_washline::ADMIN_PICTURE_PREFIX,
                    "worker-picture" => integration::gcloud_storage_washline::WORKER_PICTURE_PREFIX,
                    _ => {
                        return methods::standard_replies::validation_error(
                            "file-kind must be one of admin-cv, admin-picture, worker-picture.",
                        );
                    }
                };
                if body.is_empty() {
                    return methods::standard_replies::validation_error(
                        "The request body is empty.",
                    );
                }

                let token_and_id = auth.split("$").collect::<Vec<&str>>();
                if token_and_id.len() != 2 {
                    return methods::tokens::token_invalid_return();
                }
                let user_id = match token_and_id[1].parse::<i32>() {
                    Ok(int) => int,
                    Err(_) => {
                        return methods::tokens::token_invalid_return();
                    }
                };

                let access_token = model::RequestToken {
                    user_id,
                    token: String::from(token_and_id[0]),
                };
                let if_token_valid =
                    methods::tokens::verify_user_token(&access_token.user_id, &access_token.token)
                        .await;
                return match if_token_valid {
                    Err(err) => match err {
                        WashlineError::TokenFormatError => {
                            methods::tokens::token_not_hex_warp_return()
                        }
                        WashlineError::InvalidToken => methods::tokens::token_invalid_return(),
                        _ => methods::standard_replies::internal_server_error_response(
                            String::from("user/upload-file: token verification failed"),
                        ),
                    },
                    Ok(valid_token) => {
                        // token is valid
                        if methods::tokens::extend_token(valid_token, &user_agent).is_err() {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("user/upload-file: failed to extend token"),
                            );
                        }

                        let Ok(actor) = methods::user::get_user_by_id(&access_token.user_id).await
                        else {
                            return methods::standard_replies::internal_server_error_response(
                                String::from("user/upload-file: actor row missing"),
                            );
                        };
                        // Uploads back the provisioning forms, so the same
                        // roles that create staff may store files.
                        if !actor.is_active
                            || !methods::user::role_allows(&actor.role, Action::CreateWasher)
                        {
                            return methods::standard_replies::permission_denied_response();
                        }

                        let upload_result =
                            integration::gcloud_storage_washline::upload_file(
                                object_prefix,
                                file_name,
                                body.to_vec(),
                            )
                            .await;
                        match upload_result {
                            Ok(file_path) => {
                                let msg = helper_model::FilePath { file_path };
                                methods::standard_replies::response_with_obj(msg, StatusCode::OK)
                            }
                            Err(error) => {
                                eprintln!("user/upload-file: {:?}", error);
                                methods::standard_replies::upload_failed_response()
                            }
                        }
                    }
                };
            },
        )
}
