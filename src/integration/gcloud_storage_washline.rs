use anyhow::{Context, anyhow};
use gcloud_storage::client::google_cloud_auth::credentials::CredentialsFile;
use gcloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
use std::borrow::Cow;
use std::env;
use std::path::Path;
use uuid;

const BUCKET: &str = "washline-store";

/// Object path prefixes per upload kind. One bucket, prefix per document
/// class, mirrors how the dashboard groups files.
pub const ADMIN_CV_PREFIX: &str = "admin_cvs/";
pub const ADMIN_PICTURE_PREFIX: &str = "admin_pictures/";
pub const WORKER_PICTURE_PREFIX: &str = "worker_pictures/";

async fn storage_client() -> anyhow::Result<gcloud_storage::client::Client> {
    use gcloud_storage::client::{Client, ClientConfig};
    let credentials_path = env::var("GCLOUD_CREDENTIALS_FILE")
        .unwrap_or_else(|_| String::from("/app/cert/gcloud/washline-server.json"));
    let config = ClientConfig::default()
        .with_credentials(
            CredentialsFile::new_from_file(credentials_path)
                .await
                .context("loading gcloud credentials")?,
        )
        .await
        .context("building gcloud client config")?;
    Ok(Client::new(config))
}

/// Stores the bytes under a fresh UUID key inside the given prefix and
/// returns the object path. The UUID key means concurrent creations can
/// never collide on a timestamp-derived name.
pub async fn upload_file(
    object_prefix: &str,
    file_name: String,
    data: Vec<u8>,
) -> anyhow::Result<String> {
    let path = Path::new(&file_name);
    let ext = path
        .extension()
        .unwrap_or("".as_ref())
        .to_str()
        .unwrap_or("")
        .to_uppercase();
    let content_type = match ext.as_str() {
        "PDF" => Some("application/pdf"),
        "JPG" => Some("image/jpeg"),
        "JPEG" => Some("image/jpeg"),
        "PNG" => Some("image/png"),
        _ => None,
    }
    .ok_or_else(|| anyhow!("unsupported file extension: {}", ext))?;

    let u = uuid::Uuid::new_v4().to_string().to_uppercase();
    let file_name_with_uuid = u + "." + ext.as_str();
    let client = storage_client().await?;
    let stored_file_abs_path = format!("{}{}", object_prefix, file_name_with_uuid);
    let upload_type = UploadType::Simple(Media {
        name: Cow::from(stored_file_abs_path.clone()),
        content_type: Cow::from(content_type),
        content_length: None,
    });
    client
        .upload_object(
            &UploadObjectRequest {
                bucket: BUCKET.to_string(),
                ..Default::default()
            },
            data,
            &upload_type,
        )
        .await
        .context("uploading object")?;
    Ok(stored_file_abs_path)
}
