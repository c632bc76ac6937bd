//! Shared application state for the REST API server.
//!
//! [`AppState`] owns the canonical resource store, the single-slot
//! list cache, and the access-log handle. It is wrapped in an `Arc`
//! and injected into handlers via Axum's `State` extractor, so every
//! server (or test) instance is fully isolated.

use std::time::Duration;

use ephemera_store::{DEFAULT_TTL, ListCache, ResourceStore};
use tokio::sync::{Mutex, RwLock};

use crate::access_log::AccessLog;

/// Shared state for the Axum application.
///
/// The store takes a read-write lock (many concurrent GETs, exclusive
/// mutations); the cache takes a mutex because even a cache read can
/// drop an expired entry.
#[derive(Debug)]
pub struct AppState {
    /// The canonical resource list.
    pub store: RwLock<ResourceStore>,
    /// Single-slot cache over the full list.
    pub cache: Mutex<ListCache>,
    /// Lifetime applied to cache entries on population.
    pub cache_ttl: Duration,
    /// Append-only request log handle.
    pub access_log: AccessLog,
}

impl AppState {
    /// Create state with an empty store and the default cache TTL.
    pub fn new(access_log: AccessLog) -> Self {
        Self::with_cache_ttl(access_log, DEFAULT_TTL)
    }

    /// Create state with an explicit cache TTL.
    pub fn with_cache_ttl(access_log: AccessLog, cache_ttl: Duration) -> Self {
        Self {
            store: RwLock::new(ResourceStore::new()),
            cache: Mutex::new(ListCache::new()),
            cache_ttl,
            access_log,
        }
    }
}
