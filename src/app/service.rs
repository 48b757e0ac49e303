//! Catalog service facade
//!
//! Wires the transport, URL layout, cache, and aggregator together. Create
//! one per catalog and pass it to whatever needs it; there is no global
//! instance.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use crate::app::aggregator::ContentAggregator;
use crate::app::cache::{CacheSnapshot, CatalogCache, CatalogEvent, LoadOutcome};
use crate::app::models::{
    ContentIndex, ContentItem, ContentListItem, ContentTranslation, ContentWithTranslations,
};
use crate::app::partial::FetchMode;
use crate::app::transport::{HttpTransport, Transport, TransportConfig};
use crate::app::urls::UrlLayout;
use crate::errors::CatalogResult;

/// Settings needed to build a [`CatalogService`]
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Catalog base URL
    pub base_url: String,
    /// HTTP transport settings
    pub transport: TransportConfig,
    /// Scheduling of translation fetches
    pub translation_mode: FetchMode,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: crate::constants::layout::DEFAULT_BASE_URL.to_string(),
            transport: TransportConfig::default(),
            translation_mode: FetchMode::default(),
        }
    }
}

/// Client for one published catalog
#[derive(Clone)]
pub struct CatalogService {
    cache: Arc<CatalogCache>,
    aggregator: Arc<ContentAggregator>,
}

impl CatalogService {
    /// Builds a service talking HTTP to the configured catalog
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` for a bad base URL, or `Http` if the HTTP client
    /// cannot be built
    pub fn new(config: &ServiceConfig) -> CatalogResult<Self> {
        let urls = UrlLayout::new(&config.base_url)?;
        let transport = Arc::new(HttpTransport::new(&config.transport)?);
        info!("Created catalog client for {}", urls.base());
        Ok(Self::with_transport(transport, urls, config.translation_mode))
    }

    /// Builds a service over any transport
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        urls: UrlLayout,
        translation_mode: FetchMode,
    ) -> Self {
        let cache = Arc::new(CatalogCache::new(Arc::clone(&transport), urls));
        let aggregator = ContentAggregator::new(Arc::clone(&cache), transport)
            .with_translation_mode(translation_mode);
        Self {
            cache,
            aggregator: Arc::new(aggregator),
        }
    }

    /// The underlying cache, for queries and state observation
    pub fn cache(&self) -> &Arc<CatalogCache> {
        &self.cache
    }

    /// The underlying aggregator
    pub fn aggregator(&self) -> &ContentAggregator {
        &self.aggregator
    }

    pub async fn load(&self) -> LoadOutcome {
        self.cache.load().await
    }

    /// Loads the index and returns its full item list
    ///
    /// Falls back to the previously cached list when the load fails, and to
    /// an empty list when nothing was ever loaded.
    pub async fn load_all_content(&self) -> Vec<ContentListItem> {
        match self.cache.load().await {
            LoadOutcome::Loaded(index) => index.content_list.clone(),
            LoadOutcome::Failed(_) => self
                .cache
                .current()
                .map(|index| index.content_list.clone())
                .unwrap_or_default(),
        }
    }

    pub fn current(&self) -> Option<Arc<ContentIndex>> {
        self.cache.current()
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        self.cache.snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.cache.subscribe()
    }

    pub fn search(&self, query: &str) -> Vec<ContentListItem> {
        self.cache.search(query)
    }

    pub fn by_category(&self, name: &str) -> Vec<ContentListItem> {
        self.cache.by_category(name)
    }

    pub fn featured(&self) -> Vec<ContentListItem> {
        self.cache.featured()
    }

    pub fn popular(&self) -> Vec<ContentListItem> {
        self.cache.popular()
    }

    pub fn recent(&self) -> Vec<ContentListItem> {
        self.cache.recent()
    }

    pub async fn fetch_content(&self, id: &str) -> CatalogResult<ContentItem> {
        self.aggregator.fetch_content(id).await
    }

    pub async fn fetch_translation(
        &self,
        content_id: &str,
        language: &str,
    ) -> CatalogResult<ContentTranslation> {
        self.aggregator.fetch_translation(content_id, language).await
    }

    pub async fn fetch_content_with_translations(
        &self,
        id: &str,
    ) -> CatalogResult<ContentWithTranslations> {
        self.aggregator.fetch_content_with_translations(id).await
    }
}
