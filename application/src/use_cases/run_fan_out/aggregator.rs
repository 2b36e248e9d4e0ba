//! Result aggregator
//!
//! Folds dispatcher outcomes into an [`AggregatedResponse`].

use super::dispatcher::ConnectorOutcome;
use fanout_domain::AggregatedResponse;
use tracing::{debug, warn};

/// Keep the successful outcomes in the order they were produced.
///
/// Failures are logged and dropped. Zero successes is a valid result and
/// yields an aggregation with an empty `responses` list.
pub fn aggregate(prompt_text: &str, outcomes: Vec<ConnectorOutcome>) -> AggregatedResponse {
    let mut responses = Vec::with_capacity(outcomes.len());

    for outcome in outcomes {
        match outcome {
            ConnectorOutcome::Success(response) => {
                debug!(
                    service = %response.service_name,
                    tokens = response.tokens_used,
                    latency_ms = response.latency_ms,
                    "Connector responded"
                );
                responses.push(response);
            }
            ConnectorOutcome::Failure {
                service_name,
                error,
            } => {
                warn!(
                    service = %service_name,
                    kind = error.kind(),
                    "Connector {} failed: {}",
                    service_name,
                    error
                );
            }
        }
    }

    AggregatedResponse::new(prompt_text, responses)
}
