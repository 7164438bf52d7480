use chunk::ChunkError;
use extract::ExtractError;
use llm::LlmError;
use store::StoreError;
use thiserror::Error;

/// Errors that can occur while serving a suggestion or running a translation job.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("extraction failure: {0}")]
    Extract(#[from] ExtractError),
    #[error("chunking failure: {0}")]
    Chunk(#[from] ChunkError),
    #[error("translation of chunk {index} failed: {source}")]
    Translation {
        index: usize,
        #[source]
        source: LlmError,
    },
    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),
    #[error("job store failure: {0}")]
    Store(#[from] StoreError),
    #[error("background task failed: {0}")]
    Join(String),
    #[error("invalid pipeline config: {0}")]
    InvalidConfig(String),
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(err: tokio::task::JoinError) -> Self {
        PipelineError::Join(err.to_string())
    }
}
