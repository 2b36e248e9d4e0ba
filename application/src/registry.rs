//! Connector registry
//!
//! The set of connectors assembled once at startup. The dispatcher iterates
//! it; the comparison use case looks a connector up by service name.

use crate::ports::connector::Connector;
use fanout_domain::ConnectorIdentity;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("A connector for service '{0}' is already registered")]
    DuplicateService(String),
}

/// Ordered set of connectors with unique service names
#[derive(Clone, Default)]
pub struct ConnectorRegistry {
    connectors: Vec<Arc<dyn Connector>>,
    /// Service names captured at registration, parallel to `connectors`
    service_names: Vec<String>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list, failing on the first duplicate service
    pub fn from_connectors(
        connectors: impl IntoIterator<Item = Arc<dyn Connector>>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for connector in connectors {
            registry.register(connector)?;
        }
        Ok(registry)
    }

    /// Add a connector. Service names are unique within a registry.
    pub fn register(&mut self, connector: Arc<dyn Connector>) -> Result<(), RegistryError> {
        let service_name = connector.service_name().to_string();
        if self.service_names.contains(&service_name) {
            return Err(RegistryError::DuplicateService(service_name));
        }
        self.connectors.push(connector);
        self.service_names.push(service_name);
        Ok(())
    }

    /// Look up a connector by its exact service name
    pub fn find(&self, service_name: &str) -> Option<Arc<dyn Connector>> {
        self.entries()
            .find(|(name, _)| *name == service_name)
            .map(|(_, connector)| Arc::clone(connector))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Connector>> {
        self.connectors.iter()
    }

    /// Connectors paired with the service name they were registered under
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Arc<dyn Connector>)> {
        self.service_names
            .iter()
            .map(String::as_str)
            .zip(self.connectors.iter())
    }

    /// Identities in registration order
    pub fn identities(&self) -> Vec<ConnectorIdentity> {
        self.connectors
            .iter()
            .map(|c| c.identity().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

impl std::fmt::Debug for ConnectorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.connectors.iter().map(|c| c.identity()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockConnector;

    #[test]
    fn test_register_and_find() {
        let registry = ConnectorRegistry::from_connectors([
            MockConnector::succeeding("OpenAI", "hi").into_arc(),
            MockConnector::succeeding("Anthropic", "hello").into_arc(),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.find("Anthropic").is_some());
        assert!(registry.find("anthropic").is_none());
        assert!(registry.find("DeepSeek").is_none());
    }

    #[test]
    fn test_duplicate_service_rejected() {
        let result = ConnectorRegistry::from_connectors([
            MockConnector::succeeding("OpenAI", "one").into_arc(),
            MockConnector::succeeding("OpenAI", "two").into_arc(),
        ]);
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateService("OpenAI".to_string())
        );
    }

    #[test]
    fn test_identities_keep_registration_order() {
        let registry = ConnectorRegistry::from_connectors([
            MockConnector::succeeding("B", "b").into_arc(),
            MockConnector::succeeding("A", "a").into_arc(),
        ])
        .unwrap();
        let names: Vec<_> = registry
            .identities()
            .into_iter()
            .map(|i| i.service_name)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ConnectorRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(format!("{:?}", registry), "[]");
    }
}
