//! Transport layer for catalog documents
//!
//! The core never talks HTTP directly. It asks a [`Transport`] for the bytes
//! behind a URL and decodes them with [`fetch_json`]. The module is organized
//! into:
//! - `config`: HTTP client configuration and building
//! - `http`: reqwest implementation with rate limiting
//! - `memory`: in-memory implementation for fixtures and tests

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::errors::{CatalogError, CatalogResult};

pub mod config;
pub mod http;
pub mod memory;

pub use config::TransportConfig;
pub use http::HttpTransport;
pub use memory::MemoryTransport;

/// Fetches raw documents by URL
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET and returns the body of a successful response
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidResponse` for non-success statuses and
    /// `CatalogError::Http` for connection-level failures
    async fn get(&self, url: &Url) -> CatalogResult<Vec<u8>>;
}

/// Fetches `url` and decodes the body as JSON into `T`
///
/// # Errors
///
/// Propagates transport errors; returns `CatalogError::DecodeFailed` when the
/// body does not match `T`
pub async fn fetch_json<T>(transport: &dyn Transport, url: &Url) -> CatalogResult<T>
where
    T: DeserializeOwned,
{
    let body = transport.get(url).await?;
    serde_json::from_slice(&body).map_err(|source| CatalogError::DecodeFailed {
        url: url.to_string(),
        source,
    })
}
