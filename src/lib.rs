//! Gallery Submit Server library.
//!
//! This library provides the core functionality for the submission server,
//! including database operations, object storage, and the artwork form.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
