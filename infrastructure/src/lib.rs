//! Infrastructure layer for llm-fanout
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP connectors, the in-memory latest-result
//! cache, configuration file loading and the JSONL conversation logger.

pub mod cache;
pub mod config;
pub mod connectors;
pub mod logging;

// Re-export commonly used types
pub use cache::InMemoryResultCache;
pub use config::{
    ConfigIssue, ConfigLoader, FileCompatibleConfig, FileConfig, FileConnectorsConfig,
    FileLoggingConfig, FileProviderConfig, FileServerConfig, Severity,
};
pub use connectors::{
    AnthropicConnector, ChatCompletionsConnector, ConnectorSettings, ConnectorSetupError,
    GeminiConnector, OpenAiConnector, build_connectors,
};
pub use logging::JsonlConversationLogger;
