//! Aggregated result of one fan-out

use super::model_response::ModelResponse;
use serde::{Deserialize, Serialize};

/// Every successful response for one prompt, in the order the dispatcher
/// produced them.
///
/// `responses` may be empty (every connector failed) but is never absent.
/// The order reflects completion order of concurrent calls and carries no
/// ranking.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregatedResponse {
    pub prompt: String,
    #[serde(default)]
    pub responses: Vec<ModelResponse>,
}

impl AggregatedResponse {
    pub fn new(prompt: impl Into<String>, responses: Vec<ModelResponse>) -> Self {
        Self {
            prompt: prompt.into(),
            responses,
        }
    }

    /// Returns `true` if no connector succeeded.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Service names of the successful connectors, in response order.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.responses.iter().map(|r| r.service_name.as_str())
    }

    /// Total tokens across all responses.
    pub fn total_tokens(&self) -> u64 {
        self.responses.iter().map(|r| r.tokens_used).sum()
    }
}
