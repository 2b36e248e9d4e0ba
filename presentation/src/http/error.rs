//! API error type and its HTTP mapping

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fanout_application::CompareLatestError;
use fanout_domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("No cached responses available.")]
    NothingCached,

    #[error(transparent)]
    Comparison(#[from] CompareLatestError),
}

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NothingCached => StatusCode::NOT_FOUND,
            ApiError::Comparison(CompareLatestError::NoCachedResult) => StatusCode::NOT_FOUND,
            ApiError::Comparison(CompareLatestError::ComparisonConnectorUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Comparison(CompareLatestError::ComparisonDispatchFailed { .. }) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("{}", self);
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
