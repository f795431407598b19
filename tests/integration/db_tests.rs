//! Database tests for the artworks table, against a mock connection.

use sea_orm::{DatabaseBackend, MockDatabase};

use gallery_submit_lib::db::artworks::NewArtwork;
use gallery_submit_lib::db::DbPool;
use gallery_submit_lib::error::AppError;

use super::test_helpers::stored_artwork;

fn sample_entry() -> NewArtwork {
    NewArtwork {
        artist_name: "Alice".to_string(),
        title: "Sunset Over Water".to_string(),
        description: "Oil on canvas.".to_string(),
        additional_message: String::new(),
        production_date: "2025-02-31".to_string(),
        image_path: "artworks/abc_sunset.png".to_string(),
    }
}

#[actix_rt::test]
async fn test_insert_artwork_returns_inserted_row() {
    let stored = stored_artwork();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored.clone()]])
        .into_connection();
    let pool = DbPool::from_connection(db);

    let model = pool.insert_artwork(sample_entry()).await.unwrap();

    assert_eq!(model.id, stored.id);
    assert_eq!(model.artist_name, "Alice");
    assert!(!model.is_approved);
}

#[actix_rt::test]
async fn test_insert_without_returned_row_is_empty_insert() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<gallery_submit_lib::entity::artwork::Model>::new()])
        .into_connection();
    let pool = DbPool::from_connection(db);

    let err = pool.insert_artwork(sample_entry()).await.unwrap_err();
    assert!(
        matches!(err, AppError::EmptyInsert),
        "expected EmptyInsert, got: {:?}",
        err
    );
}

#[actix_rt::test]
async fn test_insert_statement_carries_date_and_approval_flag() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored_artwork()]])
        .into_connection();
    let pool = DbPool::from_connection(db.clone());

    pool.insert_artwork(sample_entry()).await.unwrap();

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1, "exactly one statement, no retries");

    let logged = format!("{:?}", log);
    assert!(logged.contains("INSERT INTO"));
    assert!(logged.contains("artworks"));
    // The non-calendar date goes through as the text it was assembled from
    assert!(logged.contains("2025-02-31"));
    // New rows always start unapproved
    assert!(logged.contains("Bool(Some(false))"));
}

#[actix_rt::test]
async fn test_insert_failure_maps_to_database_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([sea_orm::DbErr::Custom("connection refused".to_string())])
        .into_connection();
    let pool = DbPool::from_connection(db);

    let err = pool.insert_artwork(sample_entry()).await.unwrap_err();
    match err {
        AppError::Database(msg) => {
            assert!(msg.contains("Failed to insert artwork"), "got: {}", msg)
        }
        other => panic!("expected Database error, got: {:?}", other),
    }
}
