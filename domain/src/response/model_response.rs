//! Response from a single connector

use super::identity::ConnectorIdentity;
use serde::{Deserialize, Serialize};

/// A connector's successful answer to one prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The service providing the response (e.g. OpenAI, Anthropic)
    pub service_name: String,
    /// The specific model used (e.g. o4-mini, claude-3-5-haiku-latest)
    pub model_name: String,
    /// The answer text, usually markdown
    pub response_text: String,
    /// Total tokens reported by the backend, 0 when it reports none
    pub tokens_used: u64,
    /// Milliseconds from sending the request until the full body was read
    pub latency_ms: f64,
}

impl ModelResponse {
    /// Creates a response attributed to the given connector identity.
    pub fn new(identity: &ConnectorIdentity, response_text: impl Into<String>) -> Self {
        Self {
            service_name: identity.service_name.clone(),
            model_name: identity.model_name.clone(),
            response_text: response_text.into(),
            tokens_used: 0,
            latency_ms: 0.0,
        }
    }

    pub fn with_tokens(mut self, tokens_used: u64) -> Self {
        self.tokens_used = tokens_used;
        self
    }

    /// Negative or NaN latencies are clamped to zero.
    pub fn with_latency_ms(mut self, latency_ms: f64) -> Self {
        self.latency_ms = if latency_ms.is_finite() && latency_ms > 0.0 {
            latency_ms
        } else {
            0.0
        };
        self
    }

    /// Re-attribute this response to another connector identity.
    pub fn attributed_to(mut self, identity: &ConnectorIdentity) -> Self {
        self.service_name = identity.service_name.clone();
        self.model_name = identity.model_name.clone();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ConnectorIdentity {
        ConnectorIdentity::new("A", "model-a").unwrap()
    }

    #[test]
    fn test_builder() {
        let r = ModelResponse::new(&identity(), "Sunny, 20°C")
            .with_tokens(42)
            .with_latency_ms(120.0);
        assert_eq!(r.service_name, "A");
        assert_eq!(r.model_name, "model-a");
        assert_eq!(r.tokens_used, 42);
        assert_eq!(r.latency_ms, 120.0);
    }

    #[test]
    fn test_latency_clamped() {
        let r = ModelResponse::new(&identity(), "x").with_latency_ms(-5.0);
        assert_eq!(r.latency_ms, 0.0);
        let r = ModelResponse::new(&identity(), "x").with_latency_ms(f64::NAN);
        assert_eq!(r.latency_ms, 0.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let r = ModelResponse::new(&identity(), "hi");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["service_name"], "A");
        assert_eq!(json["response_text"], "hi");
        assert_eq!(json["tokens_used"], 0);
    }
}
