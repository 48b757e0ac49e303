//! In-memory transport
//!
//! Serves documents registered ahead of time and answers HTTP 404 for
//! everything else. Counts requests so callers can assert on fetch behavior.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use url::Url;

use crate::errors::{CatalogError, CatalogResult};

use super::Transport;

#[derive(Debug, Clone)]
enum Response {
    Body(Vec<u8>),
    Status(u16),
}

/// Transport backed by a URL-to-document map
#[derive(Debug, Default)]
pub struct MemoryTransport {
    responses: Mutex<HashMap<String, Response>>,
    requests: AtomicUsize,
}

impl MemoryTransport {
    /// Creates an empty transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for `url`
    pub fn insert(&self, url: Url, body: impl Into<Vec<u8>>) {
        self.responses()
            .insert(url.to_string(), Response::Body(body.into()));
    }

    /// Answers `url` with a non-success HTTP status
    pub fn fail_with_status(&self, url: Url, status: u16) {
        self.responses()
            .insert(url.to_string(), Response::Status(status));
    }

    /// Stops serving `url`
    pub fn remove(&self, url: &Url) {
        self.responses().remove(url.as_str());
    }

    /// Number of `get` calls made so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn responses(&self) -> std::sync::MutexGuard<'_, HashMap<String, Response>> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get(&self, url: &Url) -> CatalogResult<Vec<u8>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let response = self.responses().get(url.as_str()).cloned();
        match response {
            Some(Response::Body(body)) => Ok(body),
            Some(Response::Status(status)) => Err(CatalogError::InvalidResponse {
                url: url.to_string(),
                status,
            }),
            None => Err(CatalogError::InvalidResponse {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
