use crate::error::{ServerError, ServerResult};
use crate::state::{ServerMetadata, ServerState};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "quill-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness check endpoint
/// Returns 200 once the model client and job store are configured
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let metadata = ServerMetadata {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime_seconds(),
        model: state.model_name().to_string(),
    };

    Ok(Json(json!({
        "status": "ready",
        "service": "quill-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "metadata": metadata,
        "components": {
            "api": "ready",
            "llm": state.config.llm.mode,
            "result_dir": state.config.result_dir,
            "max_workers": state.translator.config().max_workers,
        }
    })))
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let handle = state.metrics.as_ref().ok_or(ServerError::NotFound)?;
    Ok((
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
