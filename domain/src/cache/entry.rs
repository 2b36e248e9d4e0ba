//! Cache entry value object

use crate::response::aggregated::AggregatedResponse;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// The single cached aggregation together with when it was stored and how
/// long it stays valid.
///
/// Expiry is evaluated lazily by [`CacheEntry::is_expired`]; nothing evicts
/// an entry in the background.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub aggregation: AggregatedResponse,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(aggregation: AggregatedResponse, created_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            aggregation,
            created_at,
            ttl,
        }
    }

    /// An entry is expired once strictly more than `ttl` has elapsed since
    /// `created_at`. A clock that moved backwards never expires an entry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match now.signed_duration_since(self.created_at).to_std() {
            Ok(age) => age > self.ttl,
            Err(_) => false,
        }
    }

    /// Instant after which reads are treated as a miss.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        chrono::TimeDelta::from_std(self.ttl)
            .ok()
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry_at(created_at: DateTime<Utc>) -> CacheEntry {
        CacheEntry::new(
            AggregatedResponse::new("q", vec![]),
            created_at,
            Duration::from_secs(600),
        )
    }

    #[test]
    fn test_not_expired_within_ttl() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let entry = entry_at(t0);
        assert!(!entry.is_expired(t0));
        assert!(!entry.is_expired(t0 + chrono::TimeDelta::seconds(600)));
    }

    #[test]
    fn test_expired_after_ttl() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let entry = entry_at(t0);
        assert!(entry.is_expired(t0 + chrono::TimeDelta::seconds(601)));
    }

    #[test]
    fn test_clock_going_backwards_is_not_expiry() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let entry = entry_at(t0);
        assert!(!entry.is_expired(t0 - chrono::TimeDelta::seconds(30)));
    }

    #[test]
    fn test_expires_at() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let entry = entry_at(t0);
        assert_eq!(
            entry.expires_at(),
            Some(Utc.with_ymd_and_hms(2026, 1, 1, 12, 10, 0).unwrap())
        );
    }
}
