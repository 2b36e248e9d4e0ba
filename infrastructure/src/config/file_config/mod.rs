//! Raw TOML configuration data types
//!
//! These structs mirror the config file exactly. Conversion into
//! application types happens in [`FileConfig::engine_params`].

mod connectors;
mod engine;
mod logging;
mod server;

pub use connectors::{FileCompatibleConfig, FileConnectorsConfig, FileProviderConfig};
pub use engine::{FileCacheConfig, FileComparisonConfig, FileDispatchConfig};
pub use logging::FileLoggingConfig;
pub use server::FileServerConfig;

use fanout_application::EngineParams;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub cache: FileCacheConfig,
    pub dispatch: FileDispatchConfig,
    pub comparison: FileComparisonConfig,
    pub logging: FileLoggingConfig,
    pub connectors: FileConnectorsConfig,
}

/// Severity level of a configuration issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The server cannot start with this configuration
    Error,
    /// The server starts but some requests will fail
    Warning,
}

/// A detected problem in the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `cache.ttl_secs`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Check the whole configuration and return every issue found.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.cache.ttl_secs == 0 {
            issues.push(ConfigIssue::error(
                "cache.ttl_secs",
                "must be greater than zero",
            ));
        }

        let providers = self.connectors.enabled_providers();
        let mut seen = HashSet::new();
        for provider in &providers {
            if provider.model.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    "connectors",
                    format!("{} has an empty model name", provider.service_name),
                ));
            }
            if provider.service_name.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    "connectors",
                    "a connector has an empty service_name",
                ));
            } else if !seen.insert(provider.service_name.as_str()) {
                issues.push(ConfigIssue::error(
                    "connectors",
                    format!("service_name '{}' is used twice", provider.service_name),
                ));
            }
        }

        if !seen.contains(self.comparison.service.as_str()) {
            issues.push(ConfigIssue::warning(
                "comparison.service",
                format!(
                    "'{}' is not an enabled connector; comparisons will fail",
                    self.comparison.service
                ),
            ));
        }

        issues
    }

    /// Engine parameters for the use cases
    pub fn engine_params(&self) -> EngineParams {
        EngineParams::default()
            .with_cache_ttl(Duration::from_secs(self.cache.ttl_secs))
            .with_call_deadline(self.dispatch.call_deadline())
            .with_comparison_service(self.comparison.service.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[server]
host = "0.0.0.0"
port = 9000

[cache]
ttl_secs = 120

[dispatch]
timeout_secs = 30
call_deadline_secs = 45

[comparison]
service = "Anthropic"

[logging]
conversation_log = "/tmp/fanout.jsonl"

[connectors.openai]
enabled = false
service_name = "OpenAI"
model = "gpt-4.1"
base_url = "https://api.openai.com/v1"
max_tokens = 2048

[[connectors.compatible]]
service_name = "Local"
model = "llama3"
base_url = "http://localhost:11434/v1"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.dispatch.timeout(), Duration::from_secs(30));
        assert_eq!(config.comparison.service, "Anthropic");
        assert!(!config.connectors.openai.enabled);
        assert_eq!(config.connectors.openai.model, "gpt-4.1");
        assert!(config.connectors.openai.api_key_env.is_none());
        assert!(config.connectors.anthropic.enabled);
        assert_eq!(config.connectors.compatible[0].service_name, "Local");
        assert!(config.connectors.compatible[0].api_key_env.is_none());

        let params = config.engine_params();
        assert_eq!(params.cache_ttl, Duration::from_secs(120));
        assert_eq!(params.call_deadline, Some(Duration::from_secs(45)));
        assert_eq!(params.comparison_service, "Anthropic");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.engine_params(), EngineParams::default());
        assert!(config.dispatch.call_deadline().is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_zero_ttl_is_an_error() {
        let mut config = FileConfig::default();
        config.cache.ttl_secs = 0;

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].field, "cache.ttl_secs");
    }

    #[test]
    fn test_duplicate_service_names_are_reported() {
        let mut config = FileConfig::default();
        config.connectors.compatible.push(FileCompatibleConfig {
            service_name: "DeepSeek".to_string(),
            model: "deepseek-reasoner".to_string(),
            base_url: "http://localhost:8000/v1".to_string(),
            api_key_env: None,
            api_key: None,
        });

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'DeepSeek' is used twice"));
    }

    #[test]
    fn test_disabled_duplicate_is_ignored() {
        let mut config = FileConfig::default();
        config.connectors.gemini.enabled = false;
        config.connectors.compatible.push(FileCompatibleConfig {
            service_name: "Google Gemini".to_string(),
            model: "gemma".to_string(),
            base_url: "http://localhost:8000/v1".to_string(),
            api_key_env: None,
            api_key: None,
        });

        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_empty_model_is_an_error() {
        let mut config = FileConfig::default();
        config.connectors.anthropic.model = "  ".to_string();

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("Anthropic"));
    }

    #[test]
    fn test_disabled_comparison_service_is_a_warning() {
        let mut config = FileConfig::default();
        config.connectors.openai.enabled = false;

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].field, "comparison.service");
    }

    #[test]
    fn test_inline_key_wins_over_env() {
        let mut provider = FileConnectorsConfig::default().openai;
        provider.api_key = Some("inline".to_string());
        provider.api_key_env = Some("PATH".to_string());
        assert_eq!(provider.resolve_api_key().as_deref(), Some("inline"));

        provider.api_key = Some(" ".to_string());
        provider.api_key_env = Some("FANOUT_TEST_SURELY_UNSET_KEY".to_string());
        assert!(provider.resolve_api_key().is_none());
    }

    #[test]
    fn test_enabled_providers_order() {
        let mut connectors = FileConnectorsConfig::default();
        connectors.anthropic.enabled = false;
        let names: Vec<_> = connectors
            .enabled_providers()
            .into_iter()
            .map(|p| p.service_name)
            .collect();
        assert_eq!(names, vec!["OpenAI", "Google Gemini", "DeepSeek"]);
    }
}
