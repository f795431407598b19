//! Integration test suite.
//!
//! Exercises the submission form, the JSON API, the database layer and the
//! storage layer against a mock S3 server and a mock database connection.
//! No external services are required.
//!
//! Run with: cargo test --test integration


mod db_tests;
mod form_tests;
