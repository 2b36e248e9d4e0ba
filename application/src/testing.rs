//! Test doubles shared by the application tests.

use crate::ports::connector::{Connector, ConnectorError};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::result_cache::ResultCache;
use async_trait::async_trait;
use fanout_domain::{AggregatedResponse, ConnectorIdentity, ModelResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub(crate) enum Behavior {
    Succeed { text: String, delay: Duration },
    Fail { error: ConnectorError, delay: Duration },
    /// Never answers; only returns once cancelled
    Hang,
    /// Ignores cancellation and sleeps forever
    Stall,
    Panic,
}

pub(crate) struct MockConnector {
    identity: ConnectorIdentity,
    behavior: Behavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, Option<String>)>>,
}

impl MockConnector {
    pub(crate) fn new(service: &str, behavior: Behavior) -> Self {
        Self {
            identity: ConnectorIdentity::new(service, format!("{}-model", service.to_lowercase()))
                .unwrap(),
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub(crate) fn succeeding(service: &str, text: &str) -> Self {
        Self::delayed(service, text, Duration::ZERO)
    }

    pub(crate) fn delayed(service: &str, text: &str, delay: Duration) -> Self {
        Self::new(
            service,
            Behavior::Succeed {
                text: text.to_string(),
                delay,
            },
        )
    }

    pub(crate) fn failing(service: &str, error: ConnectorError) -> Self {
        Self::new(
            service,
            Behavior::Fail {
                error,
                delay: Duration::ZERO,
            },
        )
    }

    pub(crate) fn into_arc(self) -> Arc<dyn Connector> {
        Arc::new(self)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<(String, Option<String>)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for MockConnector {
    fn identity(&self) -> &ConnectorIdentity {
        &self.identity
    }

    async fn respond(
        &self,
        prompt: &str,
        instructions: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ModelResponse, ConnectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() =
            Some((prompt.to_string(), instructions.map(str::to_string)));

        match &self.behavior {
            Behavior::Succeed { text, delay } => {
                tokio::time::sleep(*delay).await;
                Ok(ModelResponse::new(&self.identity, text.clone())
                    .with_tokens(text.len() as u64)
                    .with_latency_ms(delay.as_secs_f64() * 1000.0))
            }
            Behavior::Fail { error, delay } => {
                tokio::time::sleep(*delay).await;
                Err(error.clone())
            }
            Behavior::Hang => {
                cancel.cancelled().await;
                Err(ConnectorError::Cancelled)
            }
            Behavior::Stall => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            Behavior::Panic => panic!("{} exploded", self.identity.service_name),
        }
    }
}

/// Cache double without expiry
#[derive(Default)]
pub(crate) struct MemoryCache {
    slot: Mutex<Option<AggregatedResponse>>,
    puts: AtomicUsize,
}

impl MemoryCache {
    pub(crate) fn holding(aggregation: AggregatedResponse) -> Self {
        Self {
            slot: Mutex::new(Some(aggregation)),
            puts: AtomicUsize::new(0),
        }
    }

    pub(crate) fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

impl ResultCache for MemoryCache {
    fn put(&self, aggregation: AggregatedResponse) {
        self.puts.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock().unwrap() = Some(aggregation);
    }

    fn get(&self) -> Option<AggregatedResponse> {
        self.slot.lock().unwrap().clone()
    }
}

/// Logger double that keeps event types
#[derive(Default)]
pub(crate) struct RecordingLogger {
    pub(crate) events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}
