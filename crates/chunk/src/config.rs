//! Configuration for the chunker.
//!
//! # Examples
//!
//! ```rust
//! use chunk::ChunkConfig;
//!
//! let config = ChunkConfig::default();
//! assert_eq!(config.max_chunk_size, 14_000);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ChunkError;

/// Default upper bound on a chunk, in characters.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 14_000;

/// Controls how text is split before it is sent to the model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum chunk length in Unicode scalar values.
    ///
    /// A single line longer than this is kept whole and becomes its own
    /// oversized chunk. Must be >= 1.
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
        }
    }
}

impl ChunkConfig {
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.max_chunk_size == 0 {
            return Err(ChunkError::InvalidMaxChunkSize(self.max_chunk_size));
        }
        Ok(())
    }
}

fn default_max_chunk_size() -> usize {
    DEFAULT_MAX_CHUNK_SIZE
}
