//! Google Gemini `generateContent` connector

use super::http::{require_text, send_json};
use super::{ConnectorSettings, ConnectorSetupError};
use async_trait::async_trait;
use fanout_application::ports::connector::{Connector, ConnectorError};
use fanout_domain::{ConnectorIdentity, DEFAULT_INSTRUCTIONS, ModelResponse};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

pub struct GeminiConnector {
    client: reqwest::Client,
    settings: ConnectorSettings,
}

impl GeminiConnector {
    pub fn new(settings: ConnectorSettings) -> Result<Self, ConnectorSetupError> {
        Ok(Self {
            client: settings.client()?,
            settings,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratePayload {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    total_token_count: u64,
}

impl GeneratePayload {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
    }
}

#[async_trait]
impl Connector for GeminiConnector {
    fn identity(&self) -> &ConnectorIdentity {
        &self.settings.identity
    }

    async fn respond(
        &self,
        prompt: &str,
        instructions: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ModelResponse, ConnectorError> {
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: instructions.unwrap_or(DEFAULT_INSTRUCTIONS),
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: prompt }],
            }],
        };
        let url = format!(
            "{}/models/{}:generateContent",
            self.settings.base_url, self.settings.identity.model_name
        );
        let request = self
            .client
            .post(url)
            .header(
                "x-goog-api-key",
                self.settings.api_key.as_deref().unwrap_or_default(),
            )
            .json(&body);

        let reply = send_json::<GeneratePayload>(self.service_name(), request, cancel).await?;
        let tokens = reply
            .payload
            .usage_metadata
            .as_ref()
            .map_or(0, |u| u.total_token_count);
        let text = require_text(self.service_name(), reply.payload.first_text())?;

        Ok(ModelResponse::new(self.identity(), text)
            .with_tokens(tokens)
            .with_latency_ms(reply.latency_ms))
    }
}
