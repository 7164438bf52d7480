//! API route handlers
//!
//! This module contains all HTTP endpoint implementations for the Quill server.
//! Routes are organized by functionality:
//!
//! - `health`: Health checks, readiness, and metrics
//! - `suggestion`: Inline writing suggestions
//! - `translate`: Background document translation and result polling

pub mod health;
pub mod suggestion;
pub mod translate;

use crate::error::{ServerError, ServerResult};
use axum::extract::FromRequest;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// JSON body extractor whose rejections use the API error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /) and requires no authentication.
///
/// # Response
///
/// ```json
/// {
///   "name": "Quill Server",
///   "version": "0.1.0",
///   "api_version": "v1",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Quill Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/v1/llm/suggestion",
            "/v1/llm/translate",
            "/v1/llm/translate/result",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
