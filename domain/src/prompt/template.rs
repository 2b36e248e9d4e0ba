//! Prompt templates for default instructions and cross-service comparison

use crate::response::model_response::ModelResponse;

/// Instructions a connector sends when the caller supplied none
pub const DEFAULT_INSTRUCTIONS: &str = "Provide your response in Markdown syntax";

/// Templates for the comparison prompt replayed through the designated connector
pub struct ComparisonTemplate;

impl ComparisonTemplate {
    /// Fixed directive sent as the comparison request's instructions
    pub fn instructions() -> &'static str {
        r#"You are given answers to the same prompt from several AI services.
Compare these responses: highlight where they agree and where they conflict.
Call out claims that only one service makes.
Preserve markdown formatting in your answer."#
    }

    /// One `Service - <name>:` block per response, in the given order
    pub fn comparison_prompt(responses: &[ModelResponse]) -> String {
        responses
            .iter()
            .map(|r| format!("Service - {}:\n{}", r.service_name, r.response_text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
