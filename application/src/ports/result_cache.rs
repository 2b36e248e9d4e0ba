//! Latest-result cache port
//!
//! A single-slot store for the most recent aggregation.

use fanout_domain::AggregatedResponse;

/// Single-slot cache of the latest aggregation.
///
/// - `put` always overwrites the slot (last writer wins).
/// - `get` returns `None` (a miss) when nothing was ever stored or the
///   stored entry has outlived its TTL. It never mutates the slot.
///
/// Both operations must be individually consistent under concurrent callers.
pub trait ResultCache: Send + Sync {
    fn put(&self, aggregation: AggregatedResponse);

    fn get(&self) -> Option<AggregatedResponse>;
}
