//! OpenAI-compatible `/chat/completions` connector
//!
//! Used for DeepSeek and for any `[[connectors.compatible]]` entry
//! (local servers, proxies).

use super::http::{require_text, send_json};
use super::{ConnectorSettings, ConnectorSetupError};
use async_trait::async_trait;
use fanout_application::ports::connector::{Connector, ConnectorError};
use fanout_domain::{ConnectorIdentity, DEFAULT_INSTRUCTIONS, ModelResponse};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

pub struct ChatCompletionsConnector {
    client: reqwest::Client,
    settings: ConnectorSettings,
}

impl ChatCompletionsConnector {
    pub fn new(settings: ConnectorSettings) -> Result<Self, ConnectorSetupError> {
        Ok(Self {
            client: settings.client()?,
            settings,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatPayload {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u64,
}

#[async_trait]
impl Connector for ChatCompletionsConnector {
    fn identity(&self) -> &ConnectorIdentity {
        &self.settings.identity
    }

    async fn respond(
        &self,
        prompt: &str,
        instructions: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ModelResponse, ConnectorError> {
        let body = ChatRequest {
            model: &self.settings.identity.model_name,
            messages: [
                ChatMessage {
                    role: "system",
                    content: instructions.unwrap_or(DEFAULT_INSTRUCTIONS),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            stream: false,
        };
        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.settings.base_url))
            .json(&body);
        if let Some(key) = &self.settings.api_key {
            request = request.bearer_auth(key);
        }

        let reply = send_json::<ChatPayload>(self.service_name(), request, cancel).await?;
        let tokens = reply.payload.usage.as_ref().map_or(0, |u| u.total_tokens);
        let text = reply
            .payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);
        let text = require_text(self.service_name(), text)?;

        Ok(ModelResponse::new(self.identity(), text)
            .with_tokens(tokens)
            .with_latency_ms(reply.latency_ms))
    }
}
