//! Anthropic Messages API connector

use super::http::{require_text, send_json};
use super::{ConnectorSettings, ConnectorSetupError};
use async_trait::async_trait;
use fanout_application::ports::connector::{Connector, ConnectorError};
use fanout_domain::{ConnectorIdentity, DEFAULT_INSTRUCTIONS, ModelResponse};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicConnector {
    client: reqwest::Client,
    settings: ConnectorSettings,
}

impl AnthropicConnector {
    pub fn new(settings: ConnectorSettings) -> Result<Self, ConnectorSetupError> {
        Ok(Self {
            client: settings.client()?,
            settings,
        })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesPayload {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[async_trait]
impl Connector for AnthropicConnector {
    fn identity(&self) -> &ConnectorIdentity {
        &self.settings.identity
    }

    async fn respond(
        &self,
        prompt: &str,
        instructions: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ModelResponse, ConnectorError> {
        let body = MessagesRequest {
            model: &self.settings.identity.model_name,
            max_tokens: self.settings.max_tokens,
            system: instructions.unwrap_or(DEFAULT_INSTRUCTIONS),
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };
        let request = self
            .client
            .post(format!("{}/messages", self.settings.base_url))
            .header("x-api-key", self.settings.api_key.as_deref().unwrap_or_default())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let reply = send_json::<MessagesPayload>(self.service_name(), request, cancel).await?;
        let tokens = reply
            .payload
            .usage
            .as_ref()
            .map_or(0, |u| u.input_tokens + u.output_tokens);
        let text = reply
            .payload
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .find_map(|block| block.text);
        let text = require_text(self.service_name(), text)?;

        Ok(ModelResponse::new(self.identity(), text)
            .with_tokens(tokens)
            .with_latency_ms(reply.latency_ms))
    }
}
