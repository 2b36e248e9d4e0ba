//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::http::handlers::{compare_latest, connectors, health, latest, submit_prompt};
use crate::http::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/prompt", post(submit_prompt))
        .route("/prompt/compare-latest", get(compare_latest))
        .route("/prompt/latest", get(latest))
        .route("/connectors", get(connectors))
}
