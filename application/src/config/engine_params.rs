//! Engine parameters: fan-out and comparison control.
//!
//! [`EngineParams`] groups the static parameters read by
//! [`RunFanOutUseCase`](crate::use_cases::run_fan_out::RunFanOutUseCase) and
//! [`CompareLatestUseCase`](crate::use_cases::compare_latest::CompareLatestUseCase).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time-to-live of the latest-result cache (10 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Default designated comparison service
pub const DEFAULT_COMPARISON_SERVICE: &str = "OpenAI";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Upper bound for a single connector call, enforced by the dispatcher.
    /// `None` leaves timeouts to the connectors themselves.
    pub call_deadline: Option<Duration>,
    /// How long the latest aggregation stays readable.
    pub cache_ttl: Duration,
    /// `service_name` of the connector that performs comparison synthesis.
    pub comparison_service: String,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            call_deadline: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            comparison_service: DEFAULT_COMPARISON_SERVICE.to_string(),
        }
    }
}

impl EngineParams {
    pub fn with_call_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.call_deadline = deadline;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_comparison_service(mut self, service: impl Into<String>) -> Self {
        self.comparison_service = service.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = EngineParams::default();
        assert_eq!(params.cache_ttl, Duration::from_secs(600));
        assert_eq!(params.comparison_service, "OpenAI");
        assert!(params.call_deadline.is_none());
    }

    #[test]
    fn test_builders() {
        let params = EngineParams::default()
            .with_call_deadline(Some(Duration::from_secs(5)))
            .with_cache_ttl(Duration::from_secs(30))
            .with_comparison_service("Anthropic");
        assert_eq!(params.call_deadline, Some(Duration::from_secs(5)));
        assert_eq!(params.cache_ttl, Duration::from_secs(30));
        assert_eq!(params.comparison_service, "Anthropic");
    }
}
