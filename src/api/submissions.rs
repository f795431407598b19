//! JSON submission endpoint.
//!
//! Programmatic counterpart to the HTML form: same multipart body, same
//! validate-upload-insert flow, JSON in the answer instead of a rendered
//! page.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use tracing::info;

use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::ArtworkResponse;
use crate::services::submission::{parse_submission, submit_artwork};
use crate::services::Storage;

/// Submit an artwork.
///
/// Accepts multipart form data with the text fields, the date selects and an
/// `image` file field. The stored row is returned on success; failures map
/// onto the shared error body.
#[utoipa::path(
    post,
    path = "/api/v1/submissions",
    tag = "Submissions",
    responses(
        (status = 201, description = "Artwork stored, pending moderation", body = ArtworkResponse),
        (status = 400, description = "Missing required fields or malformed body", body = crate::error::ErrorResponse),
        (status = 500, description = "Upload or insert failed", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_submission(
    config: web::Data<Config>,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let submission = parse_submission(&mut payload, config.max_upload_size).await?;
    submission.validate()?;

    // Debug echo is a form-page concern; the API returns the row itself
    let receipt = submit_artwork(&storage, &pool, submission, false).await?;

    info!("Artwork {} submitted via API", receipt.artwork.id);

    Ok(HttpResponse::Created().json(ArtworkResponse::from(receipt.artwork)))
}

/// Configure submission routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/submissions").route(web::post().to(create_submission)));
}
