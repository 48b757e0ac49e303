//! Application constants for the catalog client
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names for configuration overrides
pub mod env {
    /// Overrides the catalog base URL
    pub const BASE_URL: &str = "CATALOG_BASE_URL";

    /// Overrides the configured log level
    pub const LOG_LEVEL: &str = "CATALOG_LOG_LEVEL";
}

/// Remote catalog layout, fixed by convention
pub mod layout {
    /// Default catalog base URL
    pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/catalog/content/main";

    /// Directory holding the index and content bodies
    pub const CONTENT_DIR: &str = "content";

    /// Index file name inside the content directory
    pub const INDEX_FILE: &str = "index.json";

    /// Directory holding per-language translations
    pub const TRANSLATIONS_DIR: &str = "translations";

    /// Extension of translation documents
    pub const TRANSLATION_EXTENSION: &str = "json";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("Catalog-Client/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 8;
}

/// Rate limiting and fan-out limits
pub mod limits {
    /// Default rate limit for catalog requests (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 10;

    /// Default number of translation fetches in flight in concurrent mode
    pub const DEFAULT_MAX_CONCURRENT_TRANSLATIONS: usize = 4;

    /// Capacity of the catalog event broadcast channel
    pub const EVENT_CHANNEL_CAPACITY: usize = 32;
}

/// Configuration file locations
pub mod config {
    /// Application directory name under the platform config dir
    pub const APP_DIR: &str = "catalog-client";

    /// Config file name inside the application directory
    pub const FILE_NAME: &str = "config.toml";

    /// Project-local config file names, searched in order
    pub const LOCAL_FILES: &[&str] = &["./catalog-client.toml", "./config.toml"];
}

// Convenience re-exports
pub use http::USER_AGENT;
pub use limits::DEFAULT_RATE_LIMIT_RPS;
