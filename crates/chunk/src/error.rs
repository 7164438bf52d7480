use thiserror::Error;

/// Errors that can occur while chunking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error("max_chunk_size must be at least 1, got {0}")]
    InvalidMaxChunkSize(usize),
}
