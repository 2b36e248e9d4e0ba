//! `[connectors]` section
//!
//! The four built-in backends have their own table; any number of extra
//! OpenAI-compatible endpoints go in `[[connectors.compatible]]`.

use serde::{Deserialize, Serialize};

/// One built-in backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProviderConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Name shown in responses and used to pick the comparison connector
    pub service_name: String,
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Inline API key; prefer `api_key_env`
    pub api_key: Option<String>,
    pub base_url: String,
    /// Only sent by backends that require it (Anthropic)
    pub max_tokens: u32,
}

fn enabled_by_default() -> bool {
    true
}

impl FileProviderConfig {
    fn preset(service_name: &str, model: &str, api_key_env: &str, base_url: &str) -> Self {
        Self {
            enabled: true,
            service_name: service_name.to_string(),
            model: model.to_string(),
            api_key_env: Some(api_key_env.to_string()),
            api_key: None,
            base_url: base_url.to_string(),
            max_tokens: 1024,
        }
    }

    /// The inline key if set, otherwise the value of `api_key_env`.
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.api_key_env
                    .as_deref()
                    .and_then(|var| std::env::var(var).ok())
                    .filter(|key| !key.trim().is_empty())
            })
    }
}

/// An extra OpenAI-compatible endpoint (local server, proxy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCompatibleConfig {
    pub service_name: String,
    pub model: String,
    pub base_url: String,
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl FileCompatibleConfig {
    pub fn to_provider(&self) -> FileProviderConfig {
        FileProviderConfig {
            enabled: true,
            service_name: self.service_name.clone(),
            model: self.model.clone(),
            api_key_env: self.api_key_env.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            max_tokens: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConnectorsConfig {
    pub openai: FileProviderConfig,
    pub anthropic: FileProviderConfig,
    pub gemini: FileProviderConfig,
    pub deepseek: FileProviderConfig,
    pub compatible: Vec<FileCompatibleConfig>,
}

impl Default for FileConnectorsConfig {
    fn default() -> Self {
        Self {
            openai: FileProviderConfig::preset(
                "OpenAI",
                "o4-mini",
                "OPENAI_API_KEY",
                "https://api.openai.com/v1",
            ),
            anthropic: FileProviderConfig::preset(
                "Anthropic",
                "claude-3-5-haiku-latest",
                "ANTHROPIC_API_KEY",
                "https://api.anthropic.com/v1",
            ),
            gemini: FileProviderConfig::preset(
                "Google Gemini",
                "gemini-2.0-flash",
                "GEMINI_API_KEY",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            deepseek: FileProviderConfig::preset(
                "DeepSeek",
                "deepseek-chat",
                "DEEPSEEK_API_KEY",
                "https://api.deepseek.com",
            ),
            compatible: Vec::new(),
        }
    }
}

impl FileConnectorsConfig {
    /// Every enabled connector as a provider section, in build order
    pub fn enabled_providers(&self) -> Vec<FileProviderConfig> {
        [&self.openai, &self.anthropic, &self.gemini, &self.deepseek]
            .into_iter()
            .filter(|p| p.enabled)
            .cloned()
            .chain(self.compatible.iter().map(FileCompatibleConfig::to_provider))
            .collect()
    }
}
