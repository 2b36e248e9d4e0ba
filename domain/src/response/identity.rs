//! Connector identity value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identity of a connector: the backend service and the model it calls.
///
/// `service_name` is the key used for deduplication in the registry and for
/// selecting the designated comparison connector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectorIdentity {
    pub service_name: String,
    pub model_name: String,
}

impl ConnectorIdentity {
    /// Create a new identity, rejecting blank service or model names
    pub fn new(
        service_name: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let service_name = service_name.into();
        let model_name = model_name.into();
        if service_name.trim().is_empty() {
            return Err(DomainError::InvalidIdentity(
                "service name must not be empty".to_string(),
            ));
        }
        if model_name.trim().is_empty() {
            return Err(DomainError::InvalidIdentity(format!(
                "model name for '{}' must not be empty",
                service_name
            )));
        }
        Ok(Self {
            service_name,
            model_name,
        })
    }
}

impl std::fmt::Display for ConnectorIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.service_name, self.model_name)
    }
}
