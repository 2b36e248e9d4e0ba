//! Connector port
//!
//! Defines the interface every language-model backend implements.

use async_trait::async_trait;
use fanout_domain::{ConnectorIdentity, ModelResponse};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors a single connector call can end with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Bad status {status}: {detail}")]
    BadStatus { status: u16, detail: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Cancelled")]
    Cancelled,

    #[error("Connector panicked: {0}")]
    Panicked(String),
}

impl ConnectorError {
    /// Short machine-readable kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectorError::Timeout(_) => "timeout",
            ConnectorError::Transport(_) => "transport",
            ConnectorError::BadStatus { .. } => "bad_status",
            ConnectorError::MalformedPayload(_) => "malformed_payload",
            ConnectorError::Cancelled => "cancelled",
            ConnectorError::Panicked(_) => "panicked",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConnectorError::Cancelled)
    }
}

/// A capability wrapping one backend's request/response cycle.
///
/// Each implementation owns its own transport. Implementations should return
/// [`ConnectorError::Cancelled`] promptly once `cancel` fires; the dispatcher
/// also races every call against the token, so a connector that ignores it
/// is still cut off.
#[async_trait]
pub trait Connector: Send + Sync {
    /// `(service_name, model_name)` of this connector
    fn identity(&self) -> &ConnectorIdentity;

    /// Send one prompt and wait for the complete answer
    async fn respond(
        &self,
        prompt: &str,
        instructions: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ModelResponse, ConnectorError>;

    fn service_name(&self) -> &str {
        &self.identity().service_name
    }
}
