//! Configuration file loading for llm-fanout
//!
//! Sources are merged in this order (highest priority first):
//!
//! 1. `FANOUT_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` file
//! 3. Project root: `./fanout.toml` or `./.fanout.toml`
//! 4. Global: `$XDG_CONFIG_HOME/llm-fanout/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileCacheConfig, FileComparisonConfig, FileCompatibleConfig, FileConfig,
    FileConnectorsConfig, FileDispatchConfig, FileLoggingConfig, FileProviderConfig,
    FileServerConfig, Severity,
};
pub use loader::ConfigLoader;
