pub mod gcloud_storage_washline;
pub mod sendgrid_washline;
