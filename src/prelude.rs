//! Prelude module for the catalog client library
//!
//! Re-exports the items needed for typical usage with a single
//! `use catalog_client::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use catalog_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None).await?;
//!     let service = CatalogService::new(&config.to_service_config())?;
//!
//!     let items = service.load_all_content().await;
//!     println!("{} items", items.len());
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, CatalogError, CatalogResult, Result};

// Service and its building blocks
pub use crate::app::{
    CatalogCache, CatalogEvent, CatalogService, ContentAggregator, FetchMode, HttpTransport,
    LoadOutcome, ServiceConfig, Transport, TransportConfig, UrlLayout,
};

// Data types
pub use crate::app::{
    ContentIndex, ContentItem, ContentListItem, ContentTranslation, ContentWithTranslations,
};

// Configuration
pub use crate::config::AppConfig;

pub use std::sync::Arc;

pub use tokio;
