//! HTTP API handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use fanout_domain::{AggregatedResponse, ConnectorIdentity, ModelResponse, PromptRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// `POST /prompt` payload. A missing `prompt` is treated as empty.
#[derive(Debug, Default, Deserialize)]
pub struct PromptBody {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// `GET /connectors` response
#[derive(Debug, Serialize)]
pub struct ConnectorsResponse {
    pub connectors: Vec<ConnectorIdentity>,
    pub comparison_service: String,
}

pub async fn health() -> &'static str {
    "OK"
}

/// Fan the prompt out to every connector and cache the aggregation
pub async fn submit_prompt(
    State(state): State<AppState>,
    payload: Result<Json<PromptBody>, JsonRejection>,
) -> Result<Json<AggregatedResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;

    let mut prompt = PromptRequest::new(body.prompt)?;
    if let Some(instructions) = body.instructions {
        prompt = prompt.with_instructions(instructions);
    }
    debug!("Prompt received: {}", prompt);

    // Cancelled on server shutdown, or when axum drops this future
    // because the client went away.
    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    Ok(Json(state.fan_out.execute(prompt, &cancel).await))
}

/// Ask the designated connector to compare the cached responses
pub async fn compare_latest(
    State(state): State<AppState>,
) -> Result<Json<ModelResponse>, ApiError> {
    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    Ok(Json(state.compare.execute(&cancel).await?))
}

pub async fn latest(State(state): State<AppState>) -> Result<Json<AggregatedResponse>, ApiError> {
    state.cache.get().map(Json).ok_or(ApiError::NothingCached)
}

pub async fn connectors(State(state): State<AppState>) -> Json<ConnectorsResponse> {
    Json(ConnectorsResponse {
        connectors: state.registry.identities(),
        comparison_service: state.compare.designated_service().to_string(),
    })
}
