//! Migration: Create artworks table and shared trigger function.
//!
//! One row per submitted artwork. Also creates the shared updated_at
//! trigger function.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                -- Shared trigger function for updated_at
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = NOW();
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;

                -- Artwork submissions table
                CREATE TABLE artworks (
                    id UUID PRIMARY KEY,
                    artist_name TEXT NOT NULL,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    additional_message TEXT NOT NULL DEFAULT '',

                    -- ISO-8601 YYYY-MM-DD, kept as text: the form allows
                    -- non-calendar selections (e.g. day 31 in February) and
                    -- a DATE column would reject them
                    production_date VARCHAR(10) NOT NULL,

                    -- Storage key of the uploaded image
                    image_path TEXT NOT NULL,

                    -- Moderation flag, flipped by an external process
                    is_approved BOOLEAN NOT NULL DEFAULT FALSE,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Index for listing submissions by arrival
                CREATE INDEX idx_artworks_created_at ON artworks(created_at DESC);

                -- Index for the moderation queue
                CREATE INDEX idx_artworks_pending ON artworks(created_at)
                    WHERE is_approved = FALSE;

                -- Trigger to update updated_at
                CREATE TRIGGER update_artworks_updated_at
                    BEFORE UPDATE ON artworks
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS update_artworks_updated_at ON artworks;
                DROP TABLE IF EXISTS artworks CASCADE;
                DROP FUNCTION IF EXISTS update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }
}
