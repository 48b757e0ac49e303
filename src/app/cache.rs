//! In-memory catalog cache
//!
//! Holds the most recently loaded [`ContentIndex`] together with loading and
//! error state. Loads replace the whole index atomically; a failed load keeps
//! the previous index available (stale-but-available) and records the error.
//!
//! Concurrent [`CatalogCache::load`] calls are not coordinated: each one runs
//! its own fetch and the last one to complete wins. Callers that need a single
//! load in flight must de-duplicate on their side.
//!
//! State changes are published as [`CatalogEvent`]s on a broadcast channel so
//! a presentation layer can observe the cache without polling.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use catalog_client::app::{CatalogCache, HttpTransport, TransportConfig, UrlLayout};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(HttpTransport::new(&TransportConfig::default())?);
//! let urls = UrlLayout::new("https://cdn.example.org/library")?;
//! let cache = CatalogCache::new(transport, urls);
//!
//! let mut events = cache.subscribe();
//! cache.load().await;
//! println!("{:?}", events.recv().await?);
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::app::models::ContentIndex;
use crate::app::transport::{fetch_json, Transport};
use crate::app::urls::UrlLayout;
use crate::constants::limits;
use crate::errors::{CatalogError, CatalogResult};

/// State change published by the cache
#[derive(Debug, Clone)]
pub enum CatalogEvent {
    /// A load began; `is_loading` is now true
    LoadStarted,
    /// A load succeeded and replaced the index
    IndexReplaced { version: String, items: usize },
    /// A load failed; the previous index (if any) is still served
    LoadFailed { error: Arc<CatalogError> },
}

/// Result of a single load attempt
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The fetched index is now the cached one
    Loaded(Arc<ContentIndex>),
    /// The fetch failed and the error was recorded in the cache
    Failed(Arc<CatalogError>),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }

    /// The recorded error, if the load failed
    pub fn error(&self) -> Option<&CatalogError> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Failed(error) => Some(error),
        }
    }
}

/// Point-in-time copy of the cache state
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    pub index: Option<Arc<ContentIndex>>,
    pub is_loading: bool,
    pub last_error: Option<Arc<CatalogError>>,
    /// When the current index was loaded
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Cache of the single current catalog index
pub struct CatalogCache {
    state: RwLock<CacheSnapshot>,
    events: broadcast::Sender<CatalogEvent>,
    transport: Arc<dyn Transport>,
    urls: UrlLayout,
}

impl std::fmt::Debug for CatalogCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCache")
            .field("state", &self.snapshot())
            .field("urls", &self.urls)
            .finish_non_exhaustive()
    }
}

impl CatalogCache {
    /// Creates an empty cache that loads through `transport`
    pub fn new(transport: Arc<dyn Transport>, urls: UrlLayout) -> Self {
        let (events, _) = broadcast::channel(limits::EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(CacheSnapshot::default()),
            events,
            transport,
            urls,
        }
    }

    /// Fetches the index and replaces the cached one
    ///
    /// Never returns an error: failures are stored as `last_error` and
    /// reported through the returned outcome and a `LoadFailed` event.
    pub async fn load(&self) -> LoadOutcome {
        self.update(|state| {
            state.is_loading = true;
            state.last_error = None;
        });
        self.emit(CatalogEvent::LoadStarted);

        match self.fetch_index().await {
            Ok(index) => {
                let index = Arc::new(index);
                let event = CatalogEvent::IndexReplaced {
                    version: index.version.clone(),
                    items: index.content_list.len(),
                };
                self.update(|state| {
                    state.index = Some(Arc::clone(&index));
                    state.is_loading = false;
                    state.loaded_at = Some(Utc::now());
                });
                info!(
                    "Loaded catalog index v{} with {} items",
                    index.version,
                    index.content_list.len()
                );
                self.emit(event);
                LoadOutcome::Loaded(index)
            }
            Err(error) => {
                warn!("Failed to load content index: {}", error);
                let error = Arc::new(error);
                self.update(|state| {
                    state.last_error = Some(Arc::clone(&error));
                    state.is_loading = false;
                });
                self.emit(CatalogEvent::LoadFailed {
                    error: Arc::clone(&error),
                });
                LoadOutcome::Failed(error)
            }
        }
    }

    /// Installs an already decoded index, exactly as a successful load would
    pub fn replace(&self, index: ContentIndex) -> Arc<ContentIndex> {
        let index = Arc::new(index);
        let event = CatalogEvent::IndexReplaced {
            version: index.version.clone(),
            items: index.content_list.len(),
        };
        self.update(|state| {
            state.index = Some(Arc::clone(&index));
            state.last_error = None;
            state.loaded_at = Some(Utc::now());
        });
        self.emit(event);
        index
    }

    /// The current index, if one has been loaded
    pub fn current(&self) -> Option<Arc<ContentIndex>> {
        self.read().index.clone()
    }

    /// Whether a load is in progress
    pub fn is_loading(&self) -> bool {
        self.read().is_loading
    }

    /// Error of the most recent failed load, cleared when a new load starts
    pub fn last_error(&self) -> Option<Arc<CatalogError>> {
        self.read().last_error.clone()
    }

    /// Copy of all state fields
    pub fn snapshot(&self) -> CacheSnapshot {
        self.read().clone()
    }

    /// Subscribes to state-change events
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    /// URL layout used for the index and content lookups
    pub fn urls(&self) -> &UrlLayout {
        &self.urls
    }

    async fn fetch_index(&self) -> CatalogResult<ContentIndex> {
        let url = self.urls.index_url()?;
        debug!("Fetching content index from {}", url);
        fetch_json(self.transport.as_ref(), &url).await
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CacheSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, apply: impl FnOnce(&mut CacheSnapshot)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut state);
    }

    fn emit(&self, event: CatalogEvent) {
        // Sending only fails when nobody is subscribed
        let _ = self.events.send(event);
    }
}
