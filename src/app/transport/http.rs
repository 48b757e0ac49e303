//! reqwest-backed transport with client-side rate limiting
//!
//! Performs plain GET requests. There are no retries here: a failed request
//! is reported once and the caller decides what it means.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{clock::DefaultClock, state::InMemoryState, Jitter, Quota, RateLimiter};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::errors::{CatalogError, CatalogResult};

use super::config::TransportConfig;
use super::Transport;

type DirectRateLimiter = RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>;

/// HTTP transport for the catalog host
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    rate_limiter: DirectRateLimiter,
}

impl HttpTransport {
    /// Creates a transport from configuration
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the reqwest client cannot be built
    pub fn new(config: &TransportConfig) -> CatalogResult<Self> {
        let client = config.build_http_client()?;
        Ok(Self::with_client(client, config.rate_limit_rps))
    }

    /// Creates a transport around an existing client
    ///
    /// A zero rate limit is treated as one request per second.
    pub fn with_client(client: Client, rate_limit_rps: u32) -> Self {
        Self {
            client,
            rate_limiter: Self::build_rate_limiter(rate_limit_rps),
        }
    }

    fn build_rate_limiter(rate_limit_rps: u32) -> DirectRateLimiter {
        let rps = NonZeroU32::new(rate_limit_rps).unwrap_or(NonZeroU32::MIN);
        RateLimiter::direct(Quota::per_second(rps))
    }

    /// Get a reference to the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> CatalogResult<Vec<u8>> {
        // Jitter avoids bursts when many translations are requested at once
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(50)))
            .await;

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("GET {} returned HTTP {}", url, status.as_u16());
            return Err(CatalogError::InvalidResponse {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}
