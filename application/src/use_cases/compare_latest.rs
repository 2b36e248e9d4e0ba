//! Compare Latest use case
//!
//! Replays the cached responses through one designated connector and asks it
//! for a cross-service comparison.

use crate::ports::connector::ConnectorError;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::result_cache::ResultCache;
use crate::registry::ConnectorRegistry;
use crate::use_cases::run_fan_out::call_connector;
use fanout_domain::{ComparisonTemplate, ModelResponse, PromptRequest};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Errors that can occur during comparison synthesis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareLatestError {
    #[error("No cached responses available.")]
    NoCachedResult,

    #[error("Comparison connector '{0}' is not registered")]
    ComparisonConnectorUnavailable(String),

    #[error("Comparison through '{service_name}' failed: {source}")]
    ComparisonDispatchFailed {
        service_name: String,
        #[source]
        source: ConnectorError,
    },
}

/// Build the comparison request for the cached responses and send it to the
/// designated connector.
///
/// Exactly one call is made; a failure is not retried and does not fall back
/// to another connector.
pub async fn synthesize(
    cache: &dyn ResultCache,
    registry: &ConnectorRegistry,
    designated_service: &str,
    cancel: &CancellationToken,
    call_deadline: Option<Duration>,
) -> Result<ModelResponse, CompareLatestError> {
    let latest = cache
        .get()
        .filter(|agg| !agg.is_empty())
        .ok_or(CompareLatestError::NoCachedResult)?;

    let request = PromptRequest::new(ComparisonTemplate::comparison_prompt(&latest.responses))
        .map_err(|_| CompareLatestError::NoCachedResult)?
        .with_instructions(ComparisonTemplate::instructions());

    let connector = registry.find(designated_service).ok_or_else(|| {
        CompareLatestError::ComparisonConnectorUnavailable(designated_service.to_string())
    })?;

    info!(
        "Comparing {} cached responses through {}",
        latest.responses.len(),
        connector.identity()
    );

    let response = call_connector(
        connector.as_ref(),
        request.text(),
        request.instructions(),
        cancel,
        call_deadline,
    )
    .await
    .map_err(|source| CompareLatestError::ComparisonDispatchFailed {
        service_name: designated_service.to_string(),
        source,
    })?;

    Ok(response.attributed_to(connector.identity()))
}

/// Use case for comparing the latest cached aggregation
pub struct CompareLatestUseCase {
    registry: Arc<ConnectorRegistry>,
    cache: Arc<dyn ResultCache>,
    conversation_logger: Arc<dyn ConversationLogger>,
    designated_service: String,
    call_deadline: Option<Duration>,
}

impl CompareLatestUseCase {
    pub fn new(
        registry: Arc<ConnectorRegistry>,
        cache: Arc<dyn ResultCache>,
        designated_service: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            cache,
            conversation_logger: Arc::new(NoConversationLogger),
            designated_service: designated_service.into(),
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

    pub fn designated_service(&self) -> &str {
        &self.designated_service
    }

    pub async fn execute(
        &self,
        cancel: &CancellationToken,
    ) -> Result<ModelResponse, CompareLatestError> {
        let result = synthesize(
            self.cache.as_ref(),
            &self.registry,
            &self.designated_service,
            cancel,
            self.call_deadline,
        )
        .await;

        match &result {
            Ok(response) => {
                self.conversation_logger.log(ConversationEvent::new(
                    "comparison_completed",
                    json!({ "response": response }),
                ));
            }
            Err(CompareLatestError::NoCachedResult) => {
                info!("Comparison requested with nothing cached");
            }
            Err(e) => {
                error!("Comparison failed: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "comparison_failed",
                    json!({
                        "service": self.designated_service,
                        "error": e.to_string(),
                    }),
                ));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::connector::Connector;
    use crate::testing::{Behavior, MemoryCache, MockConnector, RecordingLogger};
    use fanout_domain::{AggregatedResponse, ConnectorIdentity};

    fn cached(responses: &[(&str, &str)]) -> Arc<MemoryCache> {
        let responses = responses
            .iter()
            .map(|(service, text)| {
                ModelResponse::new(&ConnectorIdentity::new(*service, "m").unwrap(), *text)
            })
            .collect();
        Arc::new(MemoryCache::holding(AggregatedResponse::new("weather?", responses)))
    }

    fn registry(connectors: Vec<Arc<dyn Connector>>) -> Arc<ConnectorRegistry> {
        Arc::new(ConnectorRegistry::from_connectors(connectors).unwrap())
    }

    #[tokio::test]
    async fn test_empty_cache_is_no_cached_result() {
        let use_case = CompareLatestUseCase::new(
            registry(vec![MockConnector::succeeding("C", "cmp").into_arc()]),
            Arc::new(MemoryCache::default()),
            "C",
        );
        let result = use_case.execute(&CancellationToken::new()).await;
        assert_eq!(result, Err(CompareLatestError::NoCachedResult));
    }

    #[tokio::test]
    async fn test_cached_empty_aggregation_is_no_cached_result() {
        let use_case = CompareLatestUseCase::new(
            registry(vec![MockConnector::succeeding("C", "cmp").into_arc()]),
            cached(&[]),
            "C",
        );
        let result = use_case.execute(&CancellationToken::new()).await;
        assert_eq!(result, Err(CompareLatestError::NoCachedResult));
    }

    #[tokio::test]
    async fn test_missing_designated_connector() {
        let use_case = CompareLatestUseCase::new(
            registry(vec![MockConnector::succeeding("A", "a").into_arc()]),
            cached(&[("A", "Sunny, 20°C")]),
            "C",
        );
        let result = use_case.execute(&CancellationToken::new()).await;
        assert_eq!(
            result,
            Err(CompareLatestError::ComparisonConnectorUnavailable("C".to_string()))
        );
    }

    #[tokio::test]
    async fn test_comparison_prompt_reaches_designated_connector() {
        let comparer = Arc::new(MockConnector::succeeding("C", "A says sunny."));
        let other = Arc::new(MockConnector::succeeding("A", "unused"));
        let use_case = CompareLatestUseCase::new(
            registry(vec![
                other.clone() as Arc<dyn Connector>,
                comparer.clone() as Arc<dyn Connector>,
            ]),
            cached(&[("A", "Sunny, 20°C"), ("B", "Cloudy, 18°C")]),
            "C",
        );

        let response = use_case.execute(&CancellationToken::new()).await.unwrap();

        assert_eq!(response.service_name, "C");
        assert_eq!(response.model_name, "c-model");
        assert_eq!(response.response_text, "A says sunny.");
        assert_eq!(comparer.calls(), 1);
        assert_eq!(other.calls(), 0);

        let (text, instructions) = comparer.last_request().unwrap();
        for needle in ["A", "Sunny, 20°C", "B", "Cloudy, 18°C"] {
            assert!(text.contains(needle), "missing {needle} in {text}");
        }
        assert!(text.starts_with("Service - A:\nSunny, 20°C"));
        assert_eq!(instructions.as_deref(), Some(ComparisonTemplate::instructions()));
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_not_retried() {
        let comparer = Arc::new(MockConnector::failing(
            "C",
            ConnectorError::BadStatus {
                status: 500,
                detail: "boom".into(),
            },
        ));
        let fallback = Arc::new(MockConnector::succeeding("A", "would work"));
        let logger = Arc::new(RecordingLogger::default());
        let use_case = CompareLatestUseCase::new(
            registry(vec![
                comparer.clone() as Arc<dyn Connector>,
                fallback.clone() as Arc<dyn Connector>,
            ]),
            cached(&[("A", "Sunny")]),
            "C",
        )
        .with_conversation_logger(logger.clone());

        let result = use_case.execute(&CancellationToken::new()).await;

        assert!(matches!(
            result,
            Err(CompareLatestError::ComparisonDispatchFailed { ref service_name, .. })
                if service_name == "C"
        ));
        assert_eq!(comparer.calls(), 1);
        assert_eq!(fallback.calls(), 0);
        assert_eq!(logger.events.lock().unwrap()[0].0, "comparison_failed");
    }

    #[tokio::test]
    async fn test_cancelled_comparison_fails() {
        let use_case = CompareLatestUseCase::new(
            registry(vec![MockConnector::new("C", Behavior::Hang).into_arc()]),
            cached(&[("A", "Sunny")]),
            "C",
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = use_case.execute(&cancel).await;

        assert_eq!(
            result,
            Err(CompareLatestError::ComparisonDispatchFailed {
                service_name: "C".to_string(),
                source: ConnectorError::Cancelled,
            })
        );
    }
}
