//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gallery Submit Server",
        version = "0.1.0",
        description = "Web server for collecting artwork submissions: uploads images to S3-compatible storage and records unapproved gallery entries in PostgreSQL"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Submission endpoints
        api::submissions::create_submission,
        // Image endpoints
        api::images::serve_image,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Submissions
            models::ArtworkResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Submissions", description = "Programmatic artwork submission"),
        (name = "Images", description = "Stored artwork image proxy")
    )
)]
pub struct ApiDoc;
