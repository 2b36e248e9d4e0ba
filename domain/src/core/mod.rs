//! Core domain concepts shared across all subdomains.
//!
//! - [`prompt::PromptRequest`]: a validated prompt to fan out
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod prompt;
pub mod string;
