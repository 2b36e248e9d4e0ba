//! `[cache]`, `[dispatch]` and `[comparison]` sections

use fanout_application::config::engine_params::{
    DEFAULT_CACHE_TTL, DEFAULT_COMPARISON_SERVICE,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// Seconds the latest aggregation stays readable
    pub ttl_secs: u64,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatchConfig {
    /// HTTP client timeout for every connector
    pub timeout_secs: u64,
    /// Deadline the dispatcher puts on each connector call; 0 disables it
    pub call_deadline_secs: u64,
}

impl Default for FileDispatchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            call_deadline_secs: 0,
        }
    }
}

impl FileDispatchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn call_deadline(&self) -> Option<Duration> {
        (self.call_deadline_secs > 0).then(|| Duration::from_secs(self.call_deadline_secs))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileComparisonConfig {
    /// `service_name` of the connector that writes comparisons
    pub service: String,
}

impl Default for FileComparisonConfig {
    fn default() -> Self {
        Self {
            service: DEFAULT_COMPARISON_SERVICE.to_string(),
        }
    }
}
