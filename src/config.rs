//! Pipeline tuning.
//!
//! Loaded as the `pipeline` section of the server configuration:
//!
//! ```toml
//! [pipeline]
//! max_chunk_size = 14000
//! max_workers = 4
//! ```

use chunk::{ChunkConfig, DEFAULT_MAX_CHUNK_SIZE};
use serde::{Deserialize, Serialize};

use crate::PipelineError;

/// Default number of chunk translations in flight per job.
pub const DEFAULT_MAX_WORKERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Upper bound on a chunk, in characters.
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,
    /// Chunk translations that may run at once within one job.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: default_max_chunk_size(),
            max_workers: default_max_workers(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.chunk_config().validate()?;
        if self.max_workers == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_workers must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn chunk_config(&self) -> ChunkConfig {
        ChunkConfig::new(self.max_chunk_size)
    }
}

fn default_max_chunk_size() -> usize {
    DEFAULT_MAX_CHUNK_SIZE
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.max_chunk_size, 14_000);
        assert_eq!(cfg.max_workers, 4);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_values_are_rejected() {
        let no_workers = PipelineConfig {
            max_workers: 0,
            ..Default::default()
        };
        assert!(matches!(
            no_workers.validate(),
            Err(PipelineError::InvalidConfig(_))
        ));

        let no_room = PipelineConfig {
            max_chunk_size: 0,
            ..Default::default()
        };
        assert!(matches!(no_room.validate(), Err(PipelineError::Chunk(_))));
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let cfg: PipelineConfig = serde_json::from_str(r#"{"max_workers": 2}"#).unwrap();
        assert_eq!(cfg.max_workers, 2);
        assert_eq!(cfg.max_chunk_size, DEFAULT_MAX_CHUNK_SIZE);
    }
}
