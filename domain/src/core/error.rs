//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Prompt must not be empty.")]
    EmptyPrompt,

    #[error("Invalid connector identity: {0}")]
    InvalidIdentity(String),
}

impl DomainError {
    /// Check if this error is a caller-side validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::EmptyPrompt)
    }
}
