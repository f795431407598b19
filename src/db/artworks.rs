//! Database queries for artwork submissions.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DbErr, Set};
use uuid::Uuid;

use crate::entity::artwork::{self, ActiveModel};
use crate::error::{AppError, AppResult};

use super::DbPool;

/// Artwork row to insert into the database.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NewArtwork {
    pub artist_name: String,
    pub title: String,
    pub description: String,
    pub additional_message: String,
    pub production_date: String,
    pub image_path: String,
}

impl DbPool {
    /// Insert one artwork submission, unapproved.
    ///
    /// An insert that executes without error but yields no row maps to
    /// `AppError::EmptyInsert`, distinct from a failed statement.
    pub async fn insert_artwork(&self, entry: NewArtwork) -> AppResult<artwork::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            artist_name: Set(entry.artist_name),
            title: Set(entry.title),
            description: Set(entry.description),
            additional_message: Set(entry.additional_message),
            production_date: Set(entry.production_date),
            image_path: Set(entry.image_path),
            is_approved: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(self.connection()).await.map_err(|e| match e {
            DbErr::RecordNotInserted => AppError::EmptyInsert,
            other => AppError::Database(format!("Failed to insert artwork: {}", other)),
        })?;

        Ok(inserted)
    }
}
