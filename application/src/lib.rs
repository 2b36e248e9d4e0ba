//! Application layer for llm-fanout
//!
//! This crate contains use cases, port definitions, the connector registry
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::EngineParams;
pub use ports::{
    clock::{Clock, SystemClock},
    connector::{Connector, ConnectorError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    result_cache::ResultCache,
};
pub use registry::{ConnectorRegistry, RegistryError};
pub use use_cases::compare_latest::{CompareLatestError, CompareLatestUseCase, synthesize};
pub use use_cases::run_fan_out::{
    ConnectorOutcome, RunFanOutUseCase, aggregate, dispatch,
};
