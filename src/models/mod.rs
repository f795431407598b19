//! Domain models for the gallery submission service.

pub mod submission;

// Re-export commonly used types
pub use submission::{
    ArtworkResponse, ArtworkSubmission, ImageUpload, ProductionDate, MIN_PRODUCTION_YEAR,
    REQUIRED_FIELDS_MESSAGE,
};
