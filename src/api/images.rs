//! Image serving API handlers.
//!
//! Proxies stored artwork images from S3, for moderation tooling that has no
//! storage credentials of its own.

use actix_web::{web, HttpResponse};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::Storage;

/// Serve a stored artwork image.
///
/// Proxies the object from S3 and returns it with its stored content type,
/// falling back to extension inference.
#[utoipa::path(
    get,
    path = "/api/v1/images/{key}",
    tag = "Images",
    params(
        ("key" = String, Path, description = "Storage key, must begin with artworks/")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 400, description = "Key outside the artworks prefix", body = crate::error::ErrorResponse),
        (status = 404, description = "No such image", body = crate::error::ErrorResponse),
    )
)]
pub async fn serve_image(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let key = path.into_inner();

    // Only artwork keys are exposed through this proxy
    if !key.starts_with(Storage::artwork_key_prefix()) {
        return Err(AppError::InvalidInput("Invalid image key".to_string()));
    }

    debug!("Serving image from S3: {}", key);

    let (data, content_type) = storage.get(&key).await?;

    let content_type = content_type.unwrap_or_else(|| {
        // Infer from extension
        let ext = key.rsplit('.').next().unwrap_or("");
        Storage::content_type_for_extension(ext).to_string()
    });

    Ok(HttpResponse::Ok().content_type(content_type).body(data))
}

/// Configure image routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Serve stored images from S3: /images/{s3_key:.*}
    cfg.service(web::resource("/images/{key:.*}").route(web::get().to(serve_image)));
}
