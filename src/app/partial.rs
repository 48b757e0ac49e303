//! Collect-what-succeeds combinator
//!
//! Runs one independent fallible attempt per key and keeps the successes.
//! Individual failures never fail the whole batch; they are returned
//! separately for diagnostics.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::future::Future;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::limits;

/// How a batch of attempts is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FetchMode {
    /// One attempt at a time, in key order
    Sequential,
    /// Up to `limit` attempts in flight
    Concurrent { limit: usize },
}

impl Default for FetchMode {
    fn default() -> Self {
        FetchMode::Sequential
    }
}

impl FetchMode {
    /// Concurrent mode with the default in-flight limit
    pub fn concurrent() -> Self {
        FetchMode::Concurrent {
            limit: limits::DEFAULT_MAX_CONCURRENT_TRANSLATIONS,
        }
    }
}

/// Successes keyed by input, plus the failures that were set aside
#[derive(Debug)]
pub struct PartialResults<K, V, E> {
    pub successes: BTreeMap<K, V>,
    pub failures: Vec<(K, E)>,
}

impl<K: Ord, V, E> PartialResults<K, V, E> {
    fn new() -> Self {
        Self {
            successes: BTreeMap::new(),
            failures: Vec::new(),
        }
    }

    fn record(&mut self, key: K, result: Result<V, E>) {
        match result {
            Ok(value) => {
                self.successes.insert(key, value);
            }
            Err(error) => self.failures.push((key, error)),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs `attempt` for every key and collects the outcomes
///
/// Failures are logged at debug level and returned in `failures`, ordered
/// by key position regardless of completion order.
pub async fn collect_partial<K, V, E, F, Fut>(
    keys: impl IntoIterator<Item = K>,
    mode: FetchMode,
    attempt: F,
) -> PartialResults<K, V, E>
where
    K: Ord + Clone + Display,
    E: Display,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    let mut results = PartialResults::new();

    match mode {
        FetchMode::Sequential => {
            for key in keys {
                let outcome = attempt(key.clone()).await;
                log_failure(&key, &outcome);
                results.record(key, outcome);
            }
        }
        FetchMode::Concurrent { limit } => {
            let keyed = stream::iter(keys.into_iter().enumerate());
            let mut outcomes: Vec<(usize, K, Result<V, E>)> = keyed
                .map(|(position, key)| {
                    let pending = attempt(key.clone());
                    async move { (position, key, pending.await) }
                })
                .buffer_unordered(limit.max(1))
                .collect()
                .await;

            outcomes.sort_by_key(|(position, _, _)| *position);
            for (_, key, outcome) in outcomes {
                log_failure(&key, &outcome);
                results.record(key, outcome);
            }
        }
    }

    results
}

fn log_failure<K: Display, V, E: Display>(key: &K, outcome: &Result<V, E>) {
    if let Err(error) = outcome {
        debug!("Skipping {}: {}", key, error);
    }
}
