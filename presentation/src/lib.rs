//! Presentation layer for llm-fanout
//!
//! This crate contains the HTTP API, CLI definitions and console output
//! formatting.

pub mod cli;
pub mod http;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use http::{ApiError, AppState, router, serve};
pub use output::console::ConsoleFormatter;
