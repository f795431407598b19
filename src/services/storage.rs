//! S3 storage service for artwork images.
//!
//! Works against AWS S3 or any path-style-compatible store such as MinIO.

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::operation::put_object::PutObjectOutput;
use aws_sdk_s3::Client;
use tracing::info;
use uuid::Uuid;

use crate::config::S3Config;
use crate::error::{AppError, AppResult};

/// Logical folder all artwork images live under.
const ARTWORK_PREFIX: &str = "artworks/";

/// Handle to the artwork image bucket.
#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
}

impl Storage {
    /// Build a client from the resolved S3 settings.
    ///
    /// Construction is purely local; call [`ensure_bucket`](Self::ensure_bucket)
    /// at startup to verify the bucket is reachable. Automatic retries are
    /// disabled: a failed upload surfaces immediately and is never retried.
    pub fn new(config: &S3Config) -> Self {
        let credentials =
            Credentials::new(&config.access_key, &config.secret_key, None, None, "gallery");

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .force_path_style(true); // Required for MinIO
        builder.set_endpoint_url(config.endpoint.clone());
        let s3_config = builder.build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }

    /// Verify the bucket is reachable, creating it when it does not exist yet.
    pub async fn ensure_bucket(&self) -> AppResult<()> {
        let probe = self.client.head_bucket().bucket(&self.bucket).send().await;

        let Err(e) = probe else {
            info!("Storage bucket '{}' is reachable", self.bucket);
            return Ok(());
        };

        let service_error = e.into_service_error();
        if !service_error.is_not_found() {
            return Err(AppError::Storage(format!(
                "Failed to access bucket '{}': {}",
                self.bucket, service_error
            )));
        }

        info!("Storage bucket '{}' missing, creating it", self.bucket);
        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Failed to create bucket '{}': {}",
                    self.bucket, e
                ))
            })?;

        Ok(())
    }

    /// Get the content type for an image based on its file extension.
    pub fn content_type_for_extension(ext: &str) -> &'static str {
        match ext.to_lowercase().as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        }
    }

    /// Upload an object.
    ///
    /// The declared content type is stored verbatim when present. Returns the
    /// raw S3 response so callers can echo it in debug mode.
    pub async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> AppResult<PutObjectOutput> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from(data))
            .set_content_type(content_type.map(String::from))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload file to S3: {}", e)))
    }

    /// Fetch an object: its bytes plus the content type it was stored with.
    pub async fn get(&self, key: &str) -> AppResult<(Vec<u8>, Option<String>)> {
        let response = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let service_error = e.into_service_error();
                return Err(if service_error.is_no_such_key() {
                    AppError::NotFound(format!("Image {}", key))
                } else {
                    AppError::Storage(format!(
                        "Failed to get file from S3: {}",
                        service_error
                    ))
                });
            }
        };

        let content_type = response.content_type().map(String::from);
        let data = response
            .body
            .collect()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to read S3 response body: {}", e)))?
            .into_bytes()
            .to_vec();

        Ok((data, content_type))
    }

    /// Prefix under which artwork images are stored.
    pub fn artwork_key_prefix() -> &'static str {
        ARTWORK_PREFIX
    }

    /// Build the S3 key for a submitted image.
    ///
    /// # Arguments
    /// * `id` - Freshly generated identifier, unique per attempt
    /// * `filename` - Original filename as declared by the client
    ///
    /// # Returns
    /// S3 key in format: artworks/{id}_{filename}
    pub fn artwork_key(id: &Uuid, filename: &str) -> String {
        format!("{}{}_{}", ARTWORK_PREFIX, id, filename)
    }
}
