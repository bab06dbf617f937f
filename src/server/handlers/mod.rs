//! HTTP handlers for the server.

pub mod flyer;
pub mod qrcode;

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

use crate::error::FlyerError;

/// Error body returned by every handler: `{"error": "..."}`.
pub type ApiError = (StatusCode, Json<Value>);

/// Map an engine error to a status code and JSON body.
pub fn api_error(err: FlyerError) -> ApiError {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::debug!(error = %err, "request rejected");
    }
    (status, Json(json!({ "error": err.to_string() })))
}

/// Run CPU-bound rendering on the blocking thread pool.
pub async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, FlyerError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| api_error(FlyerError::Server(format!("Task error: {}", e))))?
        .map_err(api_error)
}
