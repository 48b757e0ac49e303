//! Content and translation fetching
//!
//! Content bodies are resolved through the cached catalog (id to file path)
//! and fetched on every call; nothing is cached here. Translations are fetched
//! per language without consulting the catalog, so a missing translation is
//! only discovered when its fetch fails.

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::cache::CatalogCache;
use crate::app::models::{
    ContentItem, ContentTranslation, ContentWithTranslations, TranslationFailure,
};
use crate::app::partial::{collect_partial, FetchMode};
use crate::app::query;
use crate::app::transport::{fetch_json, Transport};
use crate::errors::{CatalogError, CatalogResult};

/// Fetches content bodies and assembles them with their translations
pub struct ContentAggregator {
    cache: Arc<CatalogCache>,
    transport: Arc<dyn Transport>,
    translation_mode: FetchMode,
}

impl ContentAggregator {
    /// Creates an aggregator resolving ids through `cache`
    ///
    /// Translations are fetched one language at a time; see
    /// [`ContentAggregator::with_translation_mode`].
    pub fn new(cache: Arc<CatalogCache>, transport: Arc<dyn Transport>) -> Self {
        Self {
            cache,
            transport,
            translation_mode: FetchMode::Sequential,
        }
    }

    /// Changes how translation fetches are scheduled
    pub fn with_translation_mode(mut self, mode: FetchMode) -> Self {
        self.translation_mode = mode;
        self
    }

    pub fn translation_mode(&self) -> FetchMode {
        self.translation_mode
    }

    /// Fetches the full body of catalog item `id`
    ///
    /// # Errors
    ///
    /// - `NoCatalogLoaded` if the cache holds no index
    /// - `ContentNotFound` if `id` is not in the catalog (no request is made)
    /// - transport and decode errors from the fetch itself
    pub async fn fetch_content(&self, id: &str) -> CatalogResult<ContentItem> {
        let index = self.cache.current().ok_or(CatalogError::NoCatalogLoaded)?;
        let item = query::find_item(&index, id).ok_or_else(|| CatalogError::ContentNotFound {
            id: id.to_string(),
        })?;

        let url = self.cache.urls().content_url(&item.file_path)?;
        debug!("Fetching content '{}' from {}", id, url);
        fetch_json(self.transport.as_ref(), &url).await
    }

    /// Fetches the translation of `content_id` into `language`
    ///
    /// # Errors
    ///
    /// Transport and decode errors from the fetch
    pub async fn fetch_translation(
        &self,
        content_id: &str,
        language: &str,
    ) -> CatalogResult<ContentTranslation> {
        let url = self.cache.urls().translation_url(language, content_id)?;
        debug!("Fetching '{}' translation of '{}' from {}", language, content_id, url);
        fetch_json(self.transport.as_ref(), &url).await
    }

    /// Fetches a content body and every translation that is available
    ///
    /// Languages come from the catalog's `languages` list, not from the
    /// item's own `languages_available`. A language whose translation cannot
    /// be fetched is left out of the result and noted in `failures`.
    ///
    /// # Errors
    ///
    /// Only errors from fetching the content body itself, as in
    /// [`ContentAggregator::fetch_content`]
    pub async fn fetch_content_with_translations(
        &self,
        id: &str,
    ) -> CatalogResult<ContentWithTranslations> {
        let content = self.fetch_content(id).await?;
        let languages = self.cache.languages();

        let results = collect_partial(languages, self.translation_mode, |language| async move {
            self.fetch_translation(id, &language).await
        })
        .await;

        info!(
            "Fetched '{}' with {} of {} translations",
            id,
            results.successes.len(),
            results.successes.len() + results.failures.len()
        );

        let failures = results
            .failures
            .into_iter()
            .map(|(language, error)| TranslationFailure {
                language,
                reason: error.to_string(),
            })
            .collect();

        Ok(ContentWithTranslations {
            content,
            translations: results.successes,
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::transport::MemoryTransport;
    use crate::app::urls::UrlLayout;

    const INDEX: &str = r#"{
        "version": "1", "last_updated": "2024-01-01", "total_content": 1,
        "categories": {}, "featured": [], "recent": [], "popular": [],
        "languages": ["hi", "es", "fr"], "authors": [],
        "content_list": [{
            "id": "sun", "title": "Sun Salutation", "category": "yoga", "author": "A",
            "pages": 2, "difficulty": "easy", "duration": 10, "is_featured": true,
            "download_count": 5, "rating": 4.8, "languages_available": ["hi"],
            "file_path": "yoga/sun.json"
        }]
    }"#;

    const CONTENT: &str = r#"{
        "id": "sun", "title": "Sun Salutation", "description": "Morning sequence",
        "content": "Stand tall...", "pages": 2, "category": "yoga", "author": "A",
        "language": "en", "difficulty": "easy", "duration": 10, "tags": ["morning"],
        "created_at": "2024-01-01", "updated_at": "2024-01-02", "version": "1.0",
        "is_featured": true, "download_count": 5, "rating": 4.8,
        "metadata": {
            "original_source": "Tradition", "transliteration": "Surya Namaskar",
            "meaning": "Salute to the sun", "benefits": ["energy"],
            "when_to_use": ["morning"], "prerequisites": []
        }
    }"#;

    fn translation(language: &str) -> String {
        format!(
            r#"{{"content_id":"sun","language":"{language}","title":"t-{language}","content":"...",
            "pages":2,"translator":"T","translation_quality":"good",
            "created_at":"2024-01-01","updated_at":"2024-01-01"}}"#
        )
    }

    fn setup() -> (Arc<MemoryTransport>, Arc<CatalogCache>, ContentAggregator) {
        let transport = Arc::new(MemoryTransport::new());
        let cache = Arc::new(CatalogCache::new(
            transport.clone(),
            UrlLayout::new("https://catalog.test").unwrap(),
        ));
        let aggregator = ContentAggregator::new(cache.clone(), transport.clone());
        (transport, cache, aggregator)
    }

    async fn loaded() -> (Arc<MemoryTransport>, Arc<CatalogCache>, ContentAggregator) {
        let (transport, cache, aggregator) = setup();
        let urls = cache.urls().clone();
        transport.insert(urls.index_url().unwrap(), INDEX);
        transport.insert(urls.content_url("yoga/sun.json").unwrap(), CONTENT);
        assert!(cache.load().await.is_loaded());
        (transport, cache, aggregator)
    }

    #[tokio::test]
    async fn test_fetch_content_without_catalog() {
        let (transport, _, aggregator) = setup();
        let result = aggregator.fetch_content("sun").await;
        assert!(matches!(result, Err(CatalogError::NoCatalogLoaded)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_content_unknown_id_makes_no_request() {
        let (transport, _, aggregator) = loaded().await;
        let before = transport.request_count();

        match aggregator.fetch_content("moon").await {
            Err(CatalogError::ContentNotFound { id }) => assert_eq!(id, "moon"),
            other => panic!("Expected ContentNotFound, got {:?}", other),
        }
        assert_eq!(transport.request_count(), before);
    }

    #[tokio::test]
    async fn test_fetch_content_is_never_cached() {
        let (transport, _, aggregator) = loaded().await;
        let before = transport.request_count();

        let first = aggregator.fetch_content("sun").await.unwrap();
        let second = aggregator.fetch_content("sun").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.metadata.transliteration, "Surya Namaskar");
        assert_eq!(transport.request_count(), before + 2);
    }

    #[tokio::test]
    async fn test_fetch_translation_has_no_catalog_precheck() {
        let (transport, _, aggregator) = setup();
        let url = UrlLayout::new("https://catalog.test")
            .unwrap()
            .translation_url("de", "anything")
            .unwrap();
        transport.insert(url, translation("de"));

        let translated = aggregator.fetch_translation("anything", "de").await.unwrap();
        assert_eq!(translated.language, "de");
    }

    #[tokio::test]
    async fn test_two_of_three_translations_fail() {
        let (transport, cache, aggregator) = loaded().await;
        let urls = cache.urls().clone();
        transport.insert(urls.translation_url("es", "sun").unwrap(), translation("es"));
        transport.fail_with_status(urls.translation_url("fr", "sun").unwrap(), 500);

        let bundle = aggregator.fetch_content_with_translations("sun").await.unwrap();

        assert_eq!(bundle.content.id, "sun");
        assert_eq!(bundle.translations.len(), 1);
        assert_eq!(bundle.translations["es"].title, "t-es");
        let failed: Vec<&str> = bundle.failures.iter().map(|f| f.language.as_str()).collect();
        assert_eq!(failed, vec!["hi", "fr"]);
    }

    #[tokio::test]
    async fn test_body_failure_fails_whole_operation() {
        let (transport, cache, aggregator) = loaded().await;
        transport.remove(&cache.urls().content_url("yoga/sun.json").unwrap());

        let result = aggregator.fetch_content_with_translations("sun").await;
        assert!(matches!(
            result,
            Err(CatalogError::InvalidResponse { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_mode_same_result() {
        let (transport, cache, aggregator) = loaded().await;
        let aggregator = aggregator.with_translation_mode(FetchMode::Concurrent { limit: 2 });
        let urls = cache.urls().clone();
        for language in ["hi", "fr"] {
            transport.insert(
                urls.translation_url(language, "sun").unwrap(),
                translation(language),
            );
        }

        let bundle = aggregator.fetch_content_with_translations("sun").await.unwrap();
        let languages: Vec<&str> = bundle.languages().collect();
        assert_eq!(languages, vec!["fr", "hi"]);
        assert_eq!(bundle.failures.len(), 1);
        assert_eq!(bundle.failures[0].language, "es");
    }
}
