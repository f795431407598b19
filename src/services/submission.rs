//! Artwork submission flow.
//!
//! Parses the multipart form body into an [`ArtworkSubmission`] and, once the
//! handler has validated it, runs the two remote steps in order: upload the
//! image to storage, then insert the row. The steps are strictly sequential,
//! never retried, and not compensated: a failed insert after a successful
//! upload leaves the uploaded object in place.

use actix_multipart::{Field, Multipart};
use futures_util::StreamExt;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use crate::db::artworks::NewArtwork;
use crate::db::DbPool;
use crate::entity::artwork;
use crate::error::{AppError, AppResult};
use crate::models::{ArtworkSubmission, ImageUpload, ProductionDate, REQUIRED_FIELDS_MESSAGE};
use crate::services::storage::Storage;

/// Multipart field name the image arrives under.
pub const IMAGE_FIELD: &str = "image";

/// Outcome of a stored submission.
#[derive(Debug)]
pub struct SubmissionReceipt {
    /// The inserted row
    pub artwork: artwork::Model,
    /// Raw storage response, captured when debug echo is on
    pub upload_echo: Option<String>,
    /// Record payload that was inserted, captured when debug echo is on
    pub record_echo: Option<String>,
    /// Inserted row as returned by the database, captured when debug echo is on
    pub insert_echo: Option<String>,
}

/// Parse one submission attempt out of a multipart form body.
///
/// Text fields arrive as regular form fields, the image as a file field
/// named `image`. Unknown fields are drained and ignored; a file field with
/// no filename counts as "no image selected". The image is buffered fully in
/// memory, capped at `max_upload_size`.
pub async fn parse_submission(
    payload: &mut Multipart,
    max_upload_size: usize,
) -> AppResult<ArtworkSubmission> {
    let mut artist_name = String::new();
    let mut title = String::new();
    let mut description = String::new();
    let mut additional_message = String::new();
    let mut year: Option<i32> = None;
    let mut month: Option<u32> = None;
    let mut day: Option<u32> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        let name = match field.content_disposition().and_then(|cd| cd.get_name()) {
            Some(name) => name.to_string(),
            None => {
                drain_field(&mut field).await;
                continue;
            }
        };

        if name == IMAGE_FIELD {
            // Browsers send the file field with an empty filename when
            // nothing was picked
            let filename = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(|f| f.replace('\\', "/"))
                .unwrap_or_default();

            if filename.is_empty() {
                drain_field(&mut field).await;
                continue;
            }

            if filename.contains("..") || filename.starts_with('/') {
                return Err(AppError::InvalidInput(
                    "Invalid image filename".to_string(),
                ));
            }

            let content_type = field.content_type().map(|mime| mime.to_string());
            let bytes = read_field_bytes(&mut field, max_upload_size, "Image").await?;

            image = Some(ImageUpload {
                filename,
                content_type,
                bytes,
            });
            continue;
        }

        let value = read_text_field(&mut field, max_upload_size).await?;
        match name.as_str() {
            "artist_name" => artist_name = value,
            "title" => title = value,
            "description" => description = value,
            "additional_message" => additional_message = value,
            "year" => year = Some(parse_component(&value, "year")?),
            "month" => month = Some(parse_component(&value, "month")?),
            "day" => day = Some(parse_component(&value, "day")?),
            _ => {} // ignore unknown fields
        }
    }

    let (Some(year), Some(month), Some(day)) = (year, month, day) else {
        return Err(AppError::InvalidInput(
            "Missing production date selection".to_string(),
        ));
    };

    let production_date = ProductionDate::new(year, month, day)
        .map_err(|e| AppError::InvalidInput(format!("Invalid production date: {}", e)))?;

    Ok(ArtworkSubmission {
        artist_name,
        title,
        description,
        additional_message,
        production_date,
        image,
    })
}

/// Store a validated submission: upload the image, then insert the row.
///
/// Callers are expected to run [`ArtworkSubmission::validate`] first; this
/// function performs no network call for a submission without an image.
/// Upload failures propagate before the insert is attempted. An insert that
/// returns no row surfaces as [`AppError::EmptyInsert`].
pub async fn submit_artwork(
    storage: &Storage,
    pool: &DbPool,
    submission: ArtworkSubmission,
    debug_echo: bool,
) -> AppResult<SubmissionReceipt> {
    let Some(image) = submission.image else {
        return Err(AppError::InvalidInput(REQUIRED_FIELDS_MESSAGE.to_string()));
    };

    // Fresh identifier per attempt; identical resubmissions never collide
    let key = Storage::artwork_key(&Uuid::new_v4(), &image.filename);

    let content_type = match image.content_type {
        Some(ct) => ct,
        None => {
            let ext = image.filename.rsplit('.').next().unwrap_or("");
            Storage::content_type_for_extension(ext).to_string()
        }
    };

    info!("Uploading image to '{}'", key);
    let output = storage.put(&key, image.bytes, Some(&content_type)).await?;

    let upload_echo = if debug_echo {
        Some(format!("{:?}", output))
    } else {
        None
    };

    let entry = NewArtwork {
        artist_name: submission.artist_name,
        title: submission.title,
        description: submission.description,
        additional_message: submission.additional_message,
        production_date: submission.production_date.to_iso(),
        image_path: key,
    };

    let record_echo = if debug_echo {
        Some(pretty_json(&entry))
    } else {
        None
    };

    let artwork = pool.insert_artwork(entry).await?;

    info!("Artwork {} stored under '{}'", artwork.id, artwork.image_path);

    let insert_echo = if debug_echo {
        Some(pretty_json(&artwork))
    } else {
        None
    };

    Ok(SubmissionReceipt {
        artwork,
        upload_echo,
        record_echo,
        insert_echo,
    })
}

/// Read a field's bytes fully into memory, bounded by `max_size`.
async fn read_field_bytes(field: &mut Field, max_size: usize, what: &str) -> AppResult<Vec<u8>> {
    let mut data = Vec::new();

    while let Some(chunk) = field.next().await {
        let chunk_data = chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;

        if data.len() + chunk_data.len() > max_size {
            drain_field(field).await;
            return Err(AppError::InvalidInput(format!(
                "{} exceeds the maximum upload size of {} bytes",
                what, max_size
            )));
        }

        data.extend_from_slice(&chunk_data);
    }

    Ok(data)
}

/// Read a text form field as UTF-8.
async fn read_text_field(field: &mut Field, max_size: usize) -> AppResult<String> {
    let data = read_field_bytes(field, max_size, "Field").await?;

    String::from_utf8(data)
        .map_err(|_| AppError::InvalidInput("Form fields must be valid UTF-8".to_string()))
}

/// Parse a date component submitted by one of the selects.
fn parse_component<T: FromStr>(raw: &str, what: &str) -> AppResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::InvalidInput(format!("Invalid {} selection", what)))
}

/// Drain a multipart field without saving.
async fn drain_field(field: &mut Field) {
    while let Some(chunk) = field.next().await {
        let _ = chunk;
    }
}

/// Render a value as pretty JSON for the debug echo block.
fn pretty_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}
