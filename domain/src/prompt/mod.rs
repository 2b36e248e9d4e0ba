//! Prompt domain
//!
//! Templates for the prompts the engine itself builds.

mod template;

pub use template::{ComparisonTemplate, DEFAULT_INSTRUCTIONS};
