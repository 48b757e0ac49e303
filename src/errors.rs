//! Error types for the catalog client
//!
//! This module defines the error taxonomy for catalog loading, content fetching,
//! and configuration. Errors carry enough context (URLs, ids, statuses) to be
//! rendered directly to a user.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Catalog, content, and transport errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A request URL could not be constructed or parsed
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Server answered with a non-success status
    #[error("Invalid response from server: HTTP {status} for {url}")]
    InvalidResponse { url: String, status: u16 },

    /// Connection-level transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body does not match the expected JSON schema
    #[error("Failed to decode data from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Operation requires a loaded catalog index and none exists
    #[error("Content index not loaded")]
    NoCatalogLoaded,

    /// Requested id is absent from the catalog
    #[error("Content not found: {id}")]
    ContentNotFound { id: String },
}

impl CatalogError {
    /// Whether retrying the same request later might succeed
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogError::Http(_) => true,
            CatalogError::InvalidResponse { status, .. } => *status == 429 || *status >= 500,
            CatalogError::InvalidUrl { .. }
            | CatalogError::DecodeFailed { .. }
            | CatalogError::NoCatalogLoaded
            | CatalogError::ContentNotFound { .. } => false,
        }
    }

    /// Error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            CatalogError::NoCatalogLoaded | CatalogError::ContentNotFound { .. } => "catalog",
            CatalogError::DecodeFailed { .. } => "decode",
            CatalogError::InvalidUrl { .. }
            | CatalogError::InvalidResponse { .. }
            | CatalogError::Http(_) => "transport",
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read or written
    #[error("Configuration file I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// No platform configuration directory available
    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Catalog or content error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Catalog index could not be loaded; shared with the cache state
    #[error("Failed to load content index: {0}")]
    Load(#[source] Arc<CatalogError>),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON output error
    #[error("Failed to render JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Check if the error is recoverable (transient)
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Catalog(e) => e.is_transient(),
            AppError::Load(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Catalog(e) => e.category(),
            AppError::Load(e) => e.category(),
            AppError::Config(_) => "config",
            AppError::Json(_) => "output",
            AppError::Io(_) => "io",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Catalog result type alias
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
