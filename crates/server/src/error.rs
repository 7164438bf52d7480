use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quill::PipelineError;
use serde::{Deserialize, Serialize};
use store::StoreError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Missing user token")]
    MissingToken,

    #[error("Invalid user token")]
    InvalidToken,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Translation not found: {0}")]
    JobNotFound(String),

    #[error("{0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::MissingToken | ServerError::InvalidToken => StatusCode::UNAUTHORIZED,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::JobNotFound(_) | ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::MissingToken => "MISSING_TOKEN",
            ServerError::InvalidToken => "INVALID_TOKEN",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::JobNotFound(_) => "JOB_NOT_FOUND",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

/// Malformed, incomplete or non-JSON request bodies
impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Store(err) => err.into(),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServerError::JobNotFound(id),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}
