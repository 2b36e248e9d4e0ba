//! Prompt value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A prompt to be forwarded to every connector (Value Object)
///
/// The text is guaranteed to contain at least one non-whitespace character.
/// `instructions` is an optional system-level directive; connectors fall back
/// to their own default when it is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
}

impl PromptRequest {
    /// Create a new prompt, rejecting empty or whitespace-only text
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyPrompt);
        }
        Ok(Self {
            text,
            instructions: None,
        })
    }

    /// Attach instructions. Blank instructions are treated as absent.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        let instructions = instructions.into();
        self.instructions = if instructions.trim().is_empty() {
            None
        } else {
            Some(instructions)
        };
        self
    }

    /// Get the prompt text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the instructions, if any
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }
}

impl std::fmt::Display for PromptRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl TryFrom<&str> for PromptRequest {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        PromptRequest::new(s)
    }
}

impl TryFrom<String> for PromptRequest {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        PromptRequest::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_creation() {
        let p = PromptRequest::new("weather?").unwrap();
        assert_eq!(p.text(), "weather?");
        assert!(p.instructions().is_none());
    }

    #[test]
    fn test_empty_prompt_rejected() {
        assert_eq!(PromptRequest::new(""), Err(DomainError::EmptyPrompt));
        assert_eq!(PromptRequest::new("  \n\t"), Err(DomainError::EmptyPrompt));
    }

    #[test]
    fn test_try_from_str() {
        let p: PromptRequest = "What is Rust?".try_into().unwrap();
        assert_eq!(p.to_string(), "What is Rust?");
        assert!(PromptRequest::try_from("   ").is_err());
    }

    #[test]
    fn test_blank_instructions_are_dropped() {
        let p = PromptRequest::new("hi").unwrap().with_instructions("   ");
        assert!(p.instructions().is_none());

        let p = PromptRequest::new("hi").unwrap().with_instructions("Answer in French");
        assert_eq!(p.instructions(), Some("Answer in French"));
    }
}
