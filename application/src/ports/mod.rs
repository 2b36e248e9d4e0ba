//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod clock;
pub mod connector;
pub mod conversation_logger;
pub mod result_cache;
