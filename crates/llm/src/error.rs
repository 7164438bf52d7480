use thiserror::Error;

/// Errors surfaced by [`LanguageModel`](crate::LanguageModel) implementations.
///
/// There is no retry layer: any of these fails the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    /// Transport or connection failure.
    #[error("llm request failed: {0}")]
    Request(String),
    /// The HTTP client's transport timeout elapsed.
    #[error("llm request timed out")]
    Timeout,
    /// The endpoint answered with a non-success status.
    #[error("llm endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body was not the JSON shape we expect.
    #[error("failed to parse llm response: {0}")]
    Parse(String),
    /// Client configuration is inconsistent.
    #[error("invalid llm config: {0}")]
    InvalidConfig(String),
    /// The admission gate was shut down while waiting for a slot.
    #[error("llm client unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Request(err.to_string())
        }
    }
}
