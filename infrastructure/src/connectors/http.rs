//! Shared request/response handling for the HTTP connectors.

use fanout_application::ports::connector::ConnectorError;
use fanout_domain::truncate;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Longest error body kept in a `BadStatus` detail
const MAX_ERROR_BODY: usize = 500;

/// Longest body excerpt kept in a `MalformedPayload` detail
const MAX_PAYLOAD_EXCERPT: usize = 200;

/// A parsed response body and how long it took to arrive
pub(crate) struct Reply<T> {
    pub payload: T,
    pub latency_ms: f64,
}

/// Send a prepared request, racing it against `cancel`.
///
/// Latency covers sending the request and reading the full body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    service: &str,
    request: reqwest::RequestBuilder,
    cancel: &CancellationToken,
) -> Result<Reply<T>, ConnectorError> {
    let started = Instant::now();

    let exchange = async {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok::<_, ConnectorError>((status, body))
    };

    let (status, body) = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ConnectorError::Cancelled),
        result = exchange => result?,
    };
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    if !status.is_success() {
        warn!("{} returned {}: {}", service, status, truncate(&body, MAX_ERROR_BODY));
        return Err(ConnectorError::BadStatus {
            status: status.as_u16(),
            detail: truncate(&body, MAX_ERROR_BODY),
        });
    }

    let payload = serde_json::from_str(&body).map_err(|e| {
        ConnectorError::MalformedPayload(format!(
            "{}: {}",
            e,
            truncate(&body, MAX_PAYLOAD_EXCERPT)
        ))
    })?;

    debug!("{} answered in {:.0}ms", service, latency_ms);
    Ok(Reply {
        payload,
        latency_ms,
    })
}

/// The URL is dropped from the message; some backends carry credentials in it.
fn map_reqwest_error(e: reqwest::Error) -> ConnectorError {
    let e = e.without_url();
    if e.is_timeout() {
        ConnectorError::Timeout(e.to_string())
    } else {
        ConnectorError::Transport(e.to_string())
    }
}

/// Fail with `MalformedPayload` when a backend answered with no usable text
pub(crate) fn require_text(
    service: &str,
    text: Option<String>,
) -> Result<String, ConnectorError> {
    text.ok_or_else(|| {
        ConnectorError::MalformedPayload(format!("{} response does not contain any text", service))
    })
}
