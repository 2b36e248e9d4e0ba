//! Fan-out dispatcher
//!
//! Sends one prompt to every registered connector concurrently and waits for
//! every call to settle. A failing connector never affects its siblings.

use crate::ports::connector::{Connector, ConnectorError};
use crate::registry::ConnectorRegistry;
use fanout_domain::{ModelResponse, PromptRequest};
use futures::FutureExt;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Result of one connector call within a fan-out
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorOutcome {
    Success(ModelResponse),
    Failure {
        service_name: String,
        error: ConnectorError,
    },
}

impl ConnectorOutcome {
    pub fn service_name(&self) -> &str {
        match self {
            ConnectorOutcome::Success(response) => &response.service_name,
            ConnectorOutcome::Failure { service_name, .. } => service_name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ConnectorOutcome::Success(_))
    }
}

/// Invoke every connector concurrently and collect one outcome per connector.
///
/// All calls are spawned before any is awaited. Outcomes are returned in
/// completion order. Cancelling `cancel` reaches every in-flight call; calls
/// cut off that way are recorded as `Failure(.., Cancelled)`.
pub async fn dispatch(
    prompt: &PromptRequest,
    registry: &ConnectorRegistry,
    cancel: &CancellationToken,
    call_deadline: Option<Duration>,
) -> Vec<ConnectorOutcome> {
    let mut join_set = JoinSet::new();
    let mut services = HashMap::with_capacity(registry.len());

    for (service_name, connector) in registry.entries() {
        let connector = Arc::clone(connector);
        let text = prompt.text().to_string();
        let instructions = prompt.instructions().map(str::to_string);
        let cancel = cancel.clone();
        let task_service = service_name.to_string();

        let handle = join_set.spawn(async move {
            let identity = connector.identity();
            debug!("Dispatching to {}", identity);
            match call_connector(
                connector.as_ref(),
                &text,
                instructions.as_deref(),
                &cancel,
                call_deadline,
            )
            .await
            {
                Ok(response) => ConnectorOutcome::Success(response),
                Err(error) => ConnectorOutcome::Failure {
                    service_name: task_service,
                    error,
                },
            }
        });
        services.insert(handle.id(), service_name.to_string());
    }

    let mut outcomes = Vec::with_capacity(registry.len());

    while let Some(joined) = join_set.join_next_with_id().await {
        match joined {
            Ok((_, outcome)) => outcomes.push(outcome),
            Err(e) => {
                let service_name = services.remove(&e.id()).unwrap_or_default();
                warn!("Connector task for {} failed: {}", service_name, e);
                outcomes.push(join_failure(service_name, e));
            }
        }
    }

    outcomes
}

/// Outcome for a task that panicked outside the connector call or was aborted
fn join_failure(service_name: String, error: JoinError) -> ConnectorOutcome {
    let error = if error.is_panic() {
        ConnectorError::Panicked(panic_message(error.into_panic().as_ref()))
    } else {
        ConnectorError::Cancelled
    };
    ConnectorOutcome::Failure {
        service_name,
        error,
    }
}

/// One isolated connector call.
///
/// Panics are caught, the optional deadline is enforced, and the call is
/// raced against the cancellation token.
pub(crate) async fn call_connector(
    connector: &dyn Connector,
    text: &str,
    instructions: Option<&str>,
    cancel: &CancellationToken,
    call_deadline: Option<Duration>,
) -> Result<ModelResponse, ConnectorError> {
    if cancel.is_cancelled() {
        return Err(ConnectorError::Cancelled);
    }

    let respond = async {
        match AssertUnwindSafe(connector.respond(text, instructions, cancel))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(payload) => Err(ConnectorError::Panicked(panic_message(payload.as_ref()))),
        }
    };

    let bounded = async {
        match call_deadline {
            Some(limit) => tokio::time::timeout(limit, respond).await.unwrap_or_else(|_| {
                Err(ConnectorError::Timeout(format!(
                    "no response within {}ms",
                    limit.as_millis()
                )))
            }),
            None => respond.await,
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ConnectorError::Cancelled),
        result = bounded => result,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
