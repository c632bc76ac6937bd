//! Single-slot read cache for the full resource list.
//!
//! The cache holds at most one snapshot, keyed by the fixed logical
//! value "all resources". An entry carries an expiry deadline; expiry
//! is evaluated lazily by the read that observes it rather than by a
//! scheduled timer task, so invalidation before expiry leaves nothing
//! behind to cancel.
//!
//! Population and invalidation policy live in the HTTP layer: the
//! cache is filled after a GET miss has been served, cleared by
//! successful updates and deletes, and deliberately left alone by
//! creates.

use std::time::{Duration, Instant};

use crate::resource::Resource;

/// Default cache lifetime: ten minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// One cached snapshot with its expiry deadline.
///
/// `expires_at` is `None` in the degenerate case where `now + ttl`
/// overflows the clock; such an entry never expires on its own.
#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: Vec<Resource>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// Single-slot cache over the full resource list.
#[derive(Debug, Clone, Default)]
pub struct ListCache {
    slot: Option<CacheEntry>,
}

impl ListCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// The cached snapshot, if present and not expired.
    ///
    /// An entry past its deadline is dropped by this read and reported
    /// as a miss.
    pub fn get(&mut self) -> Option<&[Resource]> {
        self.get_at(Instant::now())
    }

    fn get_at(&mut self, now: Instant) -> Option<&[Resource]> {
        if self.slot.as_ref().is_some_and(|e| e.is_expired(now)) {
            self.slot = None;
        }
        self.slot.as_ref().map(|e| e.snapshot.as_slice())
    }

    /// Store a snapshot, replacing any previous entry and its deadline.
    pub fn put(&mut self, snapshot: Vec<Resource>, ttl: Duration) {
        self.slot = Some(CacheEntry {
            snapshot,
            expires_at: Instant::now().checked_add(ttl),
        });
    }

    /// Drop the cached snapshot. Idempotent when already absent.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// Whether a snapshot is currently stored (expired or not).
    pub const fn is_populated(&self) -> bool {
        self.slot.is_some()
    }
}
