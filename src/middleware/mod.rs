//! Middleware for the gallery submission server.

pub mod request_logger;

pub use request_logger::RequestLogger;
