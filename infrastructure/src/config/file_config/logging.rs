//! `[logging]` section

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving fan-out and comparison events
    pub conversation_log: Option<PathBuf>,
    /// Directory for daily-rotated tracing output
    pub dir: Option<PathBuf>,
}
