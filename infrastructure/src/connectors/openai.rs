//! OpenAI Responses API connector

use super::ConnectorSettings;
use super::ConnectorSetupError;
use super::http::{require_text, send_json};
use async_trait::async_trait;
use fanout_application::ports::connector::{Connector, ConnectorError};
use fanout_domain::{ConnectorIdentity, DEFAULT_INSTRUCTIONS, ModelResponse};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

pub struct OpenAiConnector {
    client: reqwest::Client,
    settings: ConnectorSettings,
}

impl OpenAiConnector {
    pub fn new(settings: ConnectorSettings) -> Result<Self, ConnectorSetupError> {
        Ok(Self {
            client: settings.client()?,
            settings,
        })
    }
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct ResponsesPayload {
    #[serde(default)]
    output: Vec<OutputItem>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    content: Option<Vec<OutputContent>>,
}

#[derive(Deserialize)]
struct OutputContent {
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u64,
}

impl ResponsesPayload {
    /// First text of the first `message` output; reasoning items are skipped
    fn first_message_text(self) -> Option<String> {
        self.output
            .into_iter()
            .filter(|item| item.kind == "message")
            .filter_map(|item| item.content)
            .flat_map(|content| content.into_iter())
            .find_map(|content| content.text)
    }
}

#[async_trait]
impl Connector for OpenAiConnector {
    fn identity(&self) -> &ConnectorIdentity {
        &self.settings.identity
    }

    async fn respond(
        &self,
        prompt: &str,
        instructions: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ModelResponse, ConnectorError> {
        let body = ResponsesRequest {
            model: &self.settings.identity.model_name,
            instructions: instructions.unwrap_or(DEFAULT_INSTRUCTIONS),
            input: prompt,
        };
        let request = self
            .client
            .post(format!("{}/responses", self.settings.base_url))
            .bearer_auth(self.settings.api_key.as_deref().unwrap_or_default())
            .json(&body);

        let reply = send_json::<ResponsesPayload>(self.service_name(), request, cancel).await?;
        let tokens = reply.payload.usage.as_ref().map_or(0, |u| u.total_tokens);
        let text = require_text(self.service_name(), reply.payload.first_message_text())?;

        Ok(ModelResponse::new(self.identity(), text)
            .with_tokens(tokens)
            .with_latency_ms(reply.latency_ms))
    }
}
