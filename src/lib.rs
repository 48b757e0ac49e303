//! Catalog Client Library
//!
//! A Rust library for reading published content catalogs: it caches the
//! catalog index in memory, answers search and listing queries against it,
//! and fetches content bodies together with whatever translations exist.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, CatalogError, Result};
