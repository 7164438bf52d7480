use std::io;
use thiserror::Error;

/// Errors surfaced by the job store and the suggestion log.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No result is stored under this identifier. Pending, failed and unknown
    /// jobs all look the same from here.
    #[error("job not found: {0}")]
    NotFound(String),
    /// The identifier cannot name a stored result.
    #[error("invalid job id: {0:?}")]
    InvalidJobId(String),
    /// Filesystem failure while reading or writing.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// A log record could not be encoded.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
