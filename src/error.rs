// src/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Error taxonomy for the serving core.
///
/// `StoreUnavailable` and `NotFound` are degraded rather than surfaced on the
/// display and tracking paths; only admin mutations and malformed requests
/// ever reach the caller as structured errors.
#[derive(Debug, Error)]
pub enum AdError {
    /// Malformed enum/position/page-type input, rejected before the store is touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Transient store failure or exceeded wait budget.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The referenced ad record does not exist.
    #[error("ad not found: {0}")]
    NotFound(String),
}

impl From<StoreError> for AdError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AdError::NotFound(id),
            StoreError::Unavailable(msg) => AdError::StoreUnavailable(msg),
        }
    }
}

impl IntoResponse for AdError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AdError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // The display path degrades to "no ads" before an error can reach
            // here; anything that still does is an admin-side failure.
            AdError::StoreUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AdError::NotFound(id) => (StatusCode::NOT_FOUND, format!("ad not found: {}", id)),
        };
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
