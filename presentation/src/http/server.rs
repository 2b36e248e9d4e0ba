//! HTTP API server
//!
//! Builds the axum router over the use cases and runs it until the shutdown
//! token fires.

use axum::Router;
use fanout_application::{CompareLatestUseCase, ConnectorRegistry, ResultCache, RunFanOutUseCase};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::http::routes::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub fan_out: Arc<RunFanOutUseCase>,
    pub compare: Arc<CompareLatestUseCase>,
    /// Read-only view for `GET /prompt/latest`
    pub cache: Arc<dyn ResultCache>,
    pub registry: Arc<ConnectorRegistry>,
    /// Parent of every per-request token
    pub shutdown: CancellationToken,
}

/// The complete application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until `state.shutdown` is cancelled.
///
/// In-flight requests see the cancellation through their child tokens, so
/// pending connector calls end promptly during shutdown.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP API listening on {}", listener.local_addr()?);

    let shutdown = state.shutdown.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("HTTP API stopped");
    Ok(())
}
