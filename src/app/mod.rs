//! Core application logic for the catalog client
//!
//! This module contains the catalog data model, the in-memory catalog cache,
//! the query functions over it, content/translation aggregation, and the
//! transport seam they all fetch through.
//!
//! # Examples
//!
//! ```rust,no_run
//! use catalog_client::app::{CatalogService, ServiceConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = CatalogService::new(&ServiceConfig {
//!     base_url: "https://cdn.example.org/library".to_string(),
//!     ..Default::default()
//! })?;
//!
//! if let Some(error) = service.load().await.error() {
//!     eprintln!("Catalog unavailable: {}", error);
//! }
//!
//! for item in service.search("yoga") {
//!     println!("{} by {}", item.title, item.author);
//! }
//!
//! let bundle = service.fetch_content_with_translations("sun-salutation").await?;
//! println!("{} translations", bundle.translations.len());
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod cache;
pub mod models;
pub mod partial;
pub mod query;
pub mod service;
pub mod transport;
pub mod urls;

// Re-export main public API
pub use aggregator::ContentAggregator;
pub use cache::{CacheSnapshot, CatalogCache, CatalogEvent, LoadOutcome};
pub use models::{
    CategoryInfo, ContentIndex, ContentItem, ContentListItem, ContentMetadata,
    ContentTranslation, ContentWithTranslations, TranslationFailure,
};
pub use partial::{collect_partial, FetchMode, PartialResults};
pub use service::{CatalogService, ServiceConfig};
pub use transport::{fetch_json, HttpTransport, MemoryTransport, Transport, TransportConfig};
pub use urls::UrlLayout;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        let config = ServiceConfig::default();
        assert!(config.transport.tcp_nodelay);
        assert_eq!(config.translation_mode, FetchMode::Sequential);
    }
}
