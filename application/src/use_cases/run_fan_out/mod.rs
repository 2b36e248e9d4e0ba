//! Run Fan-Out use case
//!
//! Dispatches one prompt to every connector, aggregates the answers and
//! stores the aggregation as the latest result.

mod aggregator;
mod dispatcher;

pub use aggregator::aggregate;
pub(crate) use dispatcher::call_connector;
pub use dispatcher::{ConnectorOutcome, dispatch};

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::result_cache::ResultCache;
use crate::registry::ConnectorRegistry;
use fanout_domain::{AggregatedResponse, PromptRequest};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Use case for fanning a prompt out to every registered connector
pub struct RunFanOutUseCase {
    registry: Arc<ConnectorRegistry>,
    cache: Arc<dyn ResultCache>,
    conversation_logger: Arc<dyn ConversationLogger>,
    call_deadline: Option<Duration>,
}

impl RunFanOutUseCase {
    pub fn new(registry: Arc<ConnectorRegistry>, cache: Arc<dyn ResultCache>) -> Self {
        Self {
            registry,
            cache,
            conversation_logger: Arc::new(NoConversationLogger),
            call_deadline: None,
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_call_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.call_deadline = deadline;
        self
    }

    /// Execute the fan-out.
    ///
    /// Never fails: connectors that fail are absent from the result. The
    /// aggregation is cached unless `cancel` fired while it was running.
    pub async fn execute(
        &self,
        prompt: PromptRequest,
        cancel: &CancellationToken,
    ) -> AggregatedResponse {
        info!("Fanning out prompt to {} connectors", self.registry.len());
        let started = Instant::now();

        let outcomes = dispatch(&prompt, &self.registry, cancel, self.call_deadline).await;
        let failed: Vec<String> = outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.service_name().to_string())
            .collect();

        let aggregation = aggregate(prompt.text(), outcomes);

        info!(
            "Fan-out finished in {}ms: {} succeeded, {} failed",
            started.elapsed().as_millis(),
            aggregation.responses.len(),
            failed.len()
        );

        if cancel.is_cancelled() {
            info!("Fan-out was cancelled; latest result left untouched");
        } else {
            self.cache.put(aggregation.clone());
        }

        self.conversation_logger.log(ConversationEvent::new(
            "fan_out_completed",
            json!({
                "prompt": aggregation.prompt,
                "instructions": prompt.instructions(),
                "responses": aggregation.responses,
                "failed_services": failed,
                "cancelled": cancel.is_cancelled(),
            }),
        ));

        aggregation
    }
}
