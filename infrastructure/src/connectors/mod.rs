//! HTTP connectors for language-model backends
//!
//! Each connector owns its own `reqwest::Client` and translates one prompt
//! into its backend's wire format.
//!
//! | Connector | Endpoint |
//! |-----------|----------|
//! | [`OpenAiConnector`] | `POST {base}/responses` |
//! | [`AnthropicConnector`] | `POST {base}/messages` |
//! | [`GeminiConnector`] | `POST {base}/models/{model}:generateContent` |
//! | [`ChatCompletionsConnector`] | `POST {base}/chat/completions` (DeepSeek and other OpenAI-compatible APIs) |

mod anthropic;
mod chat_completions;
mod gemini;
mod http;
mod openai;

pub use anthropic::AnthropicConnector;
pub use chat_completions::ChatCompletionsConnector;
pub use gemini::GeminiConnector;
pub use openai::OpenAiConnector;

use crate::config::{FileConnectorsConfig, FileProviderConfig};
use fanout_application::ports::connector::Connector;
use fanout_domain::{ConnectorIdentity, DomainError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while constructing a connector
#[derive(Error, Debug)]
pub enum ConnectorSetupError {
    #[error("No API key for {service}: set {env} or api_key in the config")]
    MissingApiKey { service: String, env: String },

    #[error("Invalid connector identity: {0}")]
    Identity(#[from] DomainError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Resolved settings for one HTTP connector
#[derive(Debug, Clone)]
pub struct ConnectorSettings {
    pub identity: ConnectorIdentity,
    pub api_key: Option<String>,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl ConnectorSettings {
    /// Resolve a provider section. The API key comes from `api_key` or the
    /// `api_key_env` variable; `require_key` turns its absence into an error.
    pub fn from_provider(
        provider: &FileProviderConfig,
        timeout: Duration,
        require_key: bool,
    ) -> Result<Self, ConnectorSetupError> {
        let identity = ConnectorIdentity::new(&provider.service_name, &provider.model)?;
        let api_key = provider.resolve_api_key();

        if require_key && api_key.is_none() {
            return Err(ConnectorSetupError::MissingApiKey {
                service: provider.service_name.clone(),
                env: provider.api_key_env.clone().unwrap_or_default(),
            });
        }

        Ok(Self {
            identity,
            api_key,
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            max_tokens: provider.max_tokens,
            timeout,
        })
    }

    pub(crate) fn client(&self) -> Result<reqwest::Client, ConnectorSetupError> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }
}

/// Build every enabled connector from the config.
///
/// A connector that cannot be built (usually a missing API key) is skipped
/// with a warning so the rest of the fan-out still works.
pub fn build_connectors(
    config: &FileConnectorsConfig,
    timeout: Duration,
) -> Vec<Arc<dyn Connector>> {
    let mut connectors: Vec<Arc<dyn Connector>> = Vec::new();

    let mut add = |name: &str, built: Result<Arc<dyn Connector>, ConnectorSetupError>| match built {
        Ok(connector) => {
            info!("Connector enabled: {}", connector.identity());
            connectors.push(connector);
        }
        Err(e) => warn!("Connector {} not available: {}", name, e),
    };

    if config.openai.enabled {
        add(
            "openai",
            ConnectorSettings::from_provider(&config.openai, timeout, true)
                .and_then(OpenAiConnector::new)
                .map(|c| Arc::new(c) as Arc<dyn Connector>),
        );
    }
    if config.anthropic.enabled {
        add(
            "anthropic",
            ConnectorSettings::from_provider(&config.anthropic, timeout, true)
                .and_then(AnthropicConnector::new)
                .map(|c| Arc::new(c) as Arc<dyn Connector>),
        );
    }
    if config.gemini.enabled {
        add(
            "gemini",
            ConnectorSettings::from_provider(&config.gemini, timeout, true)
                .and_then(GeminiConnector::new)
                .map(|c| Arc::new(c) as Arc<dyn Connector>),
        );
    }
    if config.deepseek.enabled {
        add(
            "deepseek",
            ConnectorSettings::from_provider(&config.deepseek, timeout, true)
                .and_then(ChatCompletionsConnector::new)
                .map(|c| Arc::new(c) as Arc<dyn Connector>),
        );
    }
    for compatible in &config.compatible {
        let provider = compatible.to_provider();
        add(
            &provider.service_name,
            ConnectorSettings::from_provider(&provider, timeout, false)
                .and_then(ChatCompletionsConnector::new)
                .map(|c| Arc::new(c) as Arc<dyn Connector>),
        );
    }

    connectors
}
