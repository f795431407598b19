//! API endpoint modules.

pub mod form;
pub mod health;
pub mod images;
pub mod openapi;
pub mod submissions;

pub use form::configure_routes as configure_form_routes;
pub use health::configure_health_routes;
pub use images::configure_routes as configure_image_routes;
pub use openapi::ApiDoc;
pub use submissions::configure_routes as configure_submission_routes;
