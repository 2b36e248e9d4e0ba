//! In-memory single-slot cache for the latest aggregation.
//!
//! The slot lives behind an `RwLock`; the entry is built before the write
//! lock is taken so writers hold it only for the swap.

use fanout_application::ports::clock::{Clock, SystemClock};
use fanout_application::ports::result_cache::ResultCache;
use fanout_domain::{AggregatedResponse, CacheEntry};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::debug;

pub struct InMemoryResultCache {
    slot: RwLock<Option<CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl InMemoryResultCache {
    /// Create an empty cache using the wall clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current entry including its metadata, `None` on a miss
    pub fn entry(&self) -> Option<CacheEntry> {
        let now = self.clock.now();
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|entry| !entry.is_expired(now))
            .cloned()
    }
}

impl ResultCache for InMemoryResultCache {
    fn put(&self, aggregation: AggregatedResponse) {
        let entry = CacheEntry::new(aggregation, self.clock.now(), self.ttl);
        debug!(
            "Caching latest aggregation ({} responses) until {:?}",
            entry.aggregation.responses.len(),
            entry.expires_at()
        );
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(entry);
    }

    fn get(&self) -> Option<AggregatedResponse> {
        self.entry().map(|entry| entry.aggregation)
    }
}
