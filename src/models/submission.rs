//! Form-facing types for artwork submissions.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::artwork;
use crate::error::{AppError, AppResult};

/// Earliest selectable production year.
pub const MIN_PRODUCTION_YEAR: i32 = 2024;

/// Message shown when any of the four required fields is missing.
pub const REQUIRED_FIELDS_MESSAGE: &str =
    "Please fill in all required fields and select an image.";

/// Production date assembled from three independent form selects.
///
/// Components are bounded to the ranges the selects offer, but the day is
/// never checked against the month: February 31st is representable and
/// accepted all the way into the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl ProductionDate {
    /// Build a date from raw components, bounds-checked against the ranges
    /// the form offers. No calendar validation beyond that.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, String> {
        let current_year = Utc::now().year();
        if year < MIN_PRODUCTION_YEAR || year > current_year {
            return Err(format!(
                "year must be between {} and {}",
                MIN_PRODUCTION_YEAR, current_year
            ));
        }
        if !(1..=12).contains(&month) {
            return Err("month must be between 1 and 12".to_string());
        }
        if !(1..=31).contains(&day) {
            return Err("day must be between 1 and 31".to_string());
        }

        Ok(ProductionDate { year, month, day })
    }

    /// Today's components, used for the form defaults.
    pub fn today() -> Self {
        let now = Utc::now();
        ProductionDate {
            year: now.year(),
            month: now.month(),
            day: now.day(),
        }
    }

    /// ISO-8601 `YYYY-MM-DD`, zero-padded.
    pub fn to_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// An image file received with a submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original filename as declared by the client
    pub filename: String,
    /// Declared MIME type, if the client sent one
    pub content_type: Option<String>,
    /// Full file contents
    pub bytes: Vec<u8>,
}

/// One submission attempt, parsed from the multipart form body.
///
/// Built fresh per request and discarded once a row exists (or the attempt
/// failed).
#[derive(Debug, Clone)]
pub struct ArtworkSubmission {
    pub artist_name: String,
    pub title: String,
    pub description: String,
    pub additional_message: String,
    pub production_date: ProductionDate,
    pub image: Option<ImageUpload>,
}

impl ArtworkSubmission {
    /// Check the four required fields: artist name, title, description and
    /// the image. Values are tested exactly as submitted, without trimming,
    /// and no network call happens before this passes.
    pub fn validate(&self) -> AppResult<()> {
        if self.artist_name.is_empty()
            || self.title.is_empty()
            || self.description.is_empty()
            || self.image.is_none()
        {
            return Err(AppError::InvalidInput(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        Ok(())
    }
}

/// Stored artwork as returned by the JSON API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArtworkResponse {
    pub id: Uuid,
    pub artist_name: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub additional_message: String,
    /// ISO-8601 date string as submitted (may be a non-calendar date)
    pub production_date: String,
    /// Storage key of the uploaded image
    pub image_path: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<artwork::Model> for ArtworkResponse {
    fn from(model: artwork::Model) -> Self {
        ArtworkResponse {
            id: model.id,
            artist_name: model.artist_name,
            title: model.title,
            description: model.description,
            additional_message: model.additional_message,
            production_date: model.production_date,
            image_path: model.image_path,
            is_approved: model.is_approved,
            created_at: model.created_at,
        }
    }
}
