//! Domain layer for llm-fanout
//!
//! This crate contains the value objects shared by every other layer.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Fan-out**: one [`PromptRequest`] is sent to every registered connector
//!   at once; each successful connector produces a [`ModelResponse`].
//! - **Aggregation**: the successful outcomes are merged into an
//!   [`AggregatedResponse`], failures are dropped.
//! - **Latest result**: the most recent aggregation is kept in a single-slot
//!   [`CacheEntry`] with a time-to-live.
//! - **Comparison**: the cached responses are replayed through one designated
//!   connector using the [`ComparisonTemplate`].

pub mod cache;
pub mod core;
pub mod prompt;
pub mod response;

// Re-export commonly used types
pub use cache::entry::CacheEntry;
pub use core::{error::DomainError, prompt::PromptRequest, string::truncate};
pub use prompt::{ComparisonTemplate, DEFAULT_INSTRUCTIONS};
pub use response::{
    aggregated::AggregatedResponse,
    identity::ConnectorIdentity,
    model_response::ModelResponse,
};
