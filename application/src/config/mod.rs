//! Application-level configuration.
//!
//! - [`EngineParams`]: dispatcher deadline, cache TTL and the designated
//!   comparison service

pub mod engine_params;

pub use engine_params::EngineParams;
