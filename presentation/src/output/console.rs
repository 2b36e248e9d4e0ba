//! Console output for `llm-fanout ask`

use colored::Colorize;
use fanout_domain::{AggregatedResponse, ModelResponse};

/// Formats fan-out results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Every response, one section per service
    pub fn format(aggregation: &AggregatedResponse) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Fan-out Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Prompt:".cyan().bold(),
            aggregation.prompt
        ));

        if aggregation.is_empty() {
            output.push_str(&format!("\n{}\n", "No service answered.".red().bold()));
        }

        for response in &aggregation.responses {
            output.push_str(&Self::response_section(response));
        }

        output.push_str(&format!(
            "\n{} {} responses, {} tokens\n",
            "Total:".dimmed(),
            aggregation.responses.len(),
            aggregation.total_tokens()
        ));

        output
    }

    /// A comparison produced by the designated service
    pub fn format_comparison(comparison: &ModelResponse) -> String {
        let mut output = Self::section_header("Comparison");
        output.push_str(&Self::response_section(comparison));
        output
    }

    pub fn format_json<T: serde::Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn response_section(response: &ModelResponse) -> String {
        format!(
            "\n{}\n{}\n{}\n",
            format!("── {} ({}) ──", response.service_name, response.model_name)
                .yellow()
                .bold(),
            response.response_text,
            format!(
                "{} tokens, {:.0}ms",
                response.tokens_used, response.latency_ms
            )
            .dimmed()
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
