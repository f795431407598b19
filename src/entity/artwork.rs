//! Artwork entity for SeaORM.
//!
//! One row per submitted artwork, flagged `is_approved = false` until an
//! external moderation pass flips it.

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "artworks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    // Submitted fields
    pub artist_name: String,
    pub title: String,
    pub description: String,
    pub additional_message: String,
    // ISO-8601 string, not a DATE column: the form never checks the day
    // against the month, so values like 2025-02-31 must stay representable
    pub production_date: String,

    // Storage key of the uploaded image (artworks/{uuid}_{filename})
    pub image_path: String,

    // Moderation flag, always false on insert
    pub is_approved: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
