//! Form tests: page rendering and the four submission outcomes.

use actix_web::http::StatusCode;
use actix_web::test;

use gallery_submit_lib::api::form::{EMPTY_INSERT_MESSAGE, SUCCESS_MESSAGE};
use gallery_submit_lib::models::REQUIRED_FIELDS_MESSAGE;
use gallery_submit_lib::services::Storage;

use super::mock_s3::MockS3;
use super::test_helpers::*;

#[actix_rt::test]
async fn test_form_page_renders_all_fields() {
    let mock = MockS3::start().await;
    let config = test_config(&mock.endpoint_url);
    let storage = Storage::new(&config.s3);
    let pool = untouched_pool();
    let app = create_test_app(config, &pool, &storage).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_body_string(resp).await;
    assert!(html.contains("Artist name (required)"));
    assert!(html.contains("Title (required)"));
    assert!(html.contains("Description (required)"));
    assert!(html.contains("(optional)"));
    assert!(html.contains("name=\"year\""));
    assert!(html.contains("name=\"month\""));
    assert!(html.contains("name=\"day\""));
    assert!(html.contains("accept=\".jpg,.jpeg,.png\""));
    // A fresh page carries no status message
    assert!(!html.contains("class=\"status"));
}

#[actix_rt::test]
async fn test_missing_text_field_shows_message_and_skips_remote_calls() {
    let mock = MockS3::start().await;
    let config = test_config(&mock.endpoint_url);
    let storage = Storage::new(&config.s3);
    let pool = untouched_pool();
    let app = create_test_app(config, &pool, &storage).await;

    let mut fields = valid_fields();
    fields[1].1 = String::new(); // blank title
    let body = multipart_body(&fields, Some(("sunset.png", "image/png", PNG_BYTES)));

    let resp = test::call_service(&app, multipart_request("/submit", body)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_body_string(resp).await;
    assert!(html.contains(REQUIRED_FIELDS_MESSAGE));
    assert!(!html.contains(SUCCESS_MESSAGE));
    // Entered values survive the re-render
    assert!(html.contains("value=\"Alice\""));
    assert!(html.contains(">Oil on canvas.</textarea>"));
    // Nothing was uploaded
    assert_eq!(mock.put_count(), 0, "invalid input must not reach storage");
}

#[actix_rt::test]
async fn test_missing_image_shows_required_fields_message() {
    let mock = MockS3::start().await;
    let config = test_config(&mock.endpoint_url);
    let storage = Storage::new(&config.s3);
    let pool = untouched_pool();
    let app = create_test_app(config, &pool, &storage).await;

    let body = multipart_body(&valid_fields(), None);

    let resp = test::call_service(&app, multipart_request("/submit", body)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_body_string(resp).await;
    assert!(html.contains(REQUIRED_FIELDS_MESSAGE));
    assert_eq!(mock.put_count(), 0);
}

#[actix_rt::test]
async fn test_whitespace_only_field_passes_presence_check() {
    // Values are checked exactly as submitted: a lone space counts as filled
    let mock = MockS3::start().await;
    let config = test_config(&mock.endpoint_url);
    let storage = Storage::new(&config.s3);
    let pool = mock_pool(vec![stored_artwork()]);
    let app = create_test_app(config, &pool, &storage).await;

    let mut fields = valid_fields();
    fields[0].1 = " ".to_string(); // artist_name is a single space
    let body = multipart_body(&fields, Some(("sunset.png", "image/png", PNG_BYTES)));

    let resp = test::call_service(&app, multipart_request("/submit", body)).await;
    let html = read_body_string(resp).await;
    assert!(html.contains(SUCCESS_MESSAGE));
    assert_eq!(mock.put_count(), 1);
}

#[actix_rt::test]
async fn test_successful_submission_stores_image_and_renders_success() {
    let mock = MockS3::start().await;
    let config = test_config(&mock.endpoint_url);
    let storage = Storage::new(&config.s3);
    let pool = mock_pool(vec![stored_artwork()]);
    let app = create_test_app(config, &pool, &storage).await;

    let body = multipart_body(&valid_fields(), Some(("sunset.png", "image/png", PNG_BYTES)));

    let resp = test::call_service(&app, multipart_request("/submit", body)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_body_string(resp).await;
    assert!(html.contains(SUCCESS_MESSAGE), "expected success message in: {}", html);

    // Exactly one upload, keyed under the artworks prefix with the original
    // filename preserved after the generated identifier
    assert_eq!(mock.put_count(), 1);
    let keys = mock.object_keys();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].starts_with("artworks/"), "unexpected key: {}", keys[0]);
    assert!(keys[0].ends_with("_sunset.png"), "unexpected key: {}", keys[0]);

    let object = mock.object(&keys[0]).unwrap();
    assert_eq!(object.bytes, PNG_BYTES);
    assert_eq!(object.content_type.as_deref(), Some("image/png"));
}

#[actix_rt::test]
async fn test_resubmission_gets_a_fresh_storage_key() {
    // Identical field values twice in a row: the generated identifier
    // differs per attempt, so the second upload never lands on the first key
    let mock = MockS3::start().await;
    let config = test_config(&mock.endpoint_url);
    let storage = Storage::new(&config.s3);
    let db = sea_orm::MockDatabase::new(sea_orm::DatabaseBackend::Postgres)
        .append_query_results([vec![stored_artwork()], vec![stored_artwork()]])
        .into_connection();
    let pool = gallery_submit_lib::db::DbPool::from_connection(db);
    let app = create_test_app(config, &pool, &storage).await;

    for _ in 0..2 {
        let body = multipart_body(&valid_fields(), Some(("sunset.png", "image/png", PNG_BYTES)));
        let resp = test::call_service(&app, multipart_request("/submit", body)).await;
        let html = read_body_string(resp).await;
        assert!(html.contains(SUCCESS_MESSAGE));
    }

    let keys = mock.object_keys();
    assert_eq!(keys.len(), 2, "each attempt stores under its own key");
    assert_ne!(keys[0], keys[1]);
    assert!(keys.iter().all(|k| k.ends_with("_sunset.png")));
}

#[actix_rt::test]
async fn test_insert_without_rows_renders_empty_insert_message() {
    let mock = MockS3::start().await;
    let config = test_config(&mock.endpoint_url);
    let storage = Storage::new(&config.s3);
    let pool = mock_pool(Vec::new());
    let app = create_test_app(config, &pool, &storage).await;

    let body = multipart_body(&valid_fields(), Some(("sunset.png", "image/png", PNG_BYTES)));

    let resp = test::call_service(&app, multipart_request("/submit", body)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_body_string(resp).await;
    assert!(html.contains(EMPTY_INSERT_MESSAGE));
    assert!(!html.contains(SUCCESS_MESSAGE));
    // The upload had already happened; nothing cleans it up
    assert_eq!(mock.put_count(), 1);
}

#[actix_rt::test]
async fn test_upload_failure_renders_generic_error_with_cause() {
    let mock = MockS3::start().await;
    mock.fail_uploads();
    let config = test_config(&mock.endpoint_url);
    let storage = Storage::new(&config.s3);
    let pool = untouched_pool();
    let app = create_test_app(config, &pool, &storage).await;

    let body = multipart_body(&valid_fields(), Some(("sunset.png", "image/png", PNG_BYTES)));

    let resp = test::call_service(&app, multipart_request("/submit", body)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_body_string(resp).await;
    assert!(html.contains("An error occurred:"), "expected error banner in: {}", html);
    assert!(html.contains("Failed to upload file to S3"));
    // Values stay on the page so the visitor can retry
    assert!(html.contains("value=\"Alice\""));
}

#[actix_rt::test]
async fn test_nonexistent_calendar_day_is_accepted() {
    // February 31st is selectable and must go through unchanged
    let mock = MockS3::start().await;
    let config = test_config(&mock.endpoint_url);
    let storage = Storage::new(&config.s3);
    let pool = mock_pool(vec![stored_artwork()]);
    let app = create_test_app(config, &pool, &storage).await;

    let mut fields = valid_fields();
    fields[4].1 = "2025".to_string();
    fields[5].1 = "2".to_string();
    fields[6].1 = "31".to_string();
    let body = multipart_body(&fields, Some(("sunset.png", "image/png", PNG_BYTES)));

    let resp = test::call_service(&app, multipart_request("/submit", body)).await;
    let html = read_body_string(resp).await;
    assert!(html.contains(SUCCESS_MESSAGE));
}

#[actix_rt::test]
async fn test_out_of_range_date_component_renders_error() {
    let mock = MockS3::start().await;
    let config = test_config(&mock.endpoint_url);
    let storage = Storage::new(&config.s3);
    let pool = untouched_pool();
    let app = create_test_app(config, &pool, &storage).await;

    let mut fields = valid_fields();
    fields[5].1 = "13".to_string(); // month outside the select's range
    let body = multipart_body(&fields, Some(("sunset.png", "image/png", PNG_BYTES)));

    let resp = test::call_service(&app, multipart_request("/submit", body)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = read_body_string(resp).await;
    assert!(html.contains("An error occurred:"));
    assert_eq!(mock.put_count(), 0);
}

#[actix_rt::test]
async fn test_debug_echo_rendered_when_enabled() {
    let mock = MockS3::start().await;
    let mut config = test_config(&mock.endpoint_url);
    config.debug_echo = true;
    let storage = Storage::new(&config.s3);
    let pool = mock_pool(vec![stored_artwork()]);
    let app = create_test_app(config, &pool, &storage).await;

    let body = multipart_body(&valid_fields(), Some(("sunset.png", "image/png", PNG_BYTES)));

    let resp = test::call_service(&app, multipart_request("/submit", body)).await;
    let html = read_body_string(resp).await;

    assert!(html.contains(SUCCESS_MESSAGE));
    assert!(html.contains("<summary>Debug output</summary>"));
    assert!(html.contains("Storage upload response"));
    assert!(html.contains("Record payload"));
    assert!(html.contains("Insert response"));
}

#[actix_rt::test]
async fn test_debug_echo_absent_by_default() {
    let mock = MockS3::start().await;
    let config = test_config(&mock.endpoint_url);
    let storage = Storage::new(&config.s3);
    let pool = mock_pool(vec![stored_artwork()]);
    let app = create_test_app(config, &pool, &storage).await;

    let body = multipart_body(&valid_fields(), Some(("sunset.png", "image/png", PNG_BYTES)));

    let resp = test::call_service(&app, multipart_request("/submit", body)).await;
    let html = read_body_string(resp).await;

    assert!(html.contains(SUCCESS_MESSAGE));
    assert!(!html.contains("Debug output"));
}
