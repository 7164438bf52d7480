//! Quill job store
//!
//! Translation jobs run in the background; callers get an id straight away
//! and poll for the result later. [`JobStore`] is the shared handle for that:
//! it hands out ids, records finished translations and looks them up.
//!
//! Only finished jobs are stored. A job that is still running, one that
//! failed, and an id that was never issued are indistinguishable to readers;
//! all three report [`StoreError::NotFound`].
//!
//! [`SuggestionLog`] lives here as well: an append-only JSON Lines file with
//! one record per served suggestion.
//!
//! ```
//! use store::JobStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), store::StoreError> {
//! let jobs = JobStore::in_memory();
//! let id = jobs.create();
//! assert!(jobs.get(&id).await.is_err());
//!
//! jobs.complete(&id, "Hallo Welt").await?;
//! assert_eq!(jobs.get(&id).await?, "Hallo Welt");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

pub mod backend;
mod error;
mod id;
mod journal;

pub use crate::backend::{
    BackendConfig, FileBackend, InMemoryBackend, JobBackend, DEFAULT_RESULT_DIR,
};
pub use crate::error::StoreError;
pub use crate::id::JobId;
pub use crate::journal::{SuggestionLog, SuggestionRecord, DEFAULT_SUGGESTION_LOG};

/// Cheap-to-clone handle over a [`JobBackend`].
#[derive(Clone)]
pub struct JobStore {
    backend: Arc<dyn JobBackend>,
}

impl JobStore {
    pub fn new(backend: Arc<dyn JobBackend>) -> Self {
        Self { backend }
    }

    pub fn from_config(cfg: &BackendConfig) -> Self {
        Self::new(cfg.build())
    }

    pub fn file<P: Into<std::path::PathBuf>>(dir: P) -> Self {
        Self::from_config(&BackendConfig::file(dir))
    }

    pub fn in_memory() -> Self {
        Self::from_config(&BackendConfig::in_memory())
    }

    /// Issues a fresh id. Nothing is written until [`JobStore::complete`].
    pub fn create(&self) -> JobId {
        let id = JobId::generate();
        debug!(job_id = %id, "job_created");
        id
    }

    /// Records the full translation for `id`.
    pub async fn complete(&self, id: &JobId, text: &str) -> Result<(), StoreError> {
        let start = Instant::now();
        self.backend.put(id, text).await?;
        info!(
            job_id = %id,
            bytes = text.len(),
            elapsed_micros = start.elapsed().as_micros() as u64,
            "job_stored"
        );
        Ok(())
    }

    /// Returns the stored translation or [`StoreError::NotFound`].
    pub async fn get(&self, id: &JobId) -> Result<String, StoreError> {
        self.backend
            .get(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Looks up a caller-supplied id. Malformed ids are reported as not found.
    pub async fn lookup(&self, raw_id: &str) -> Result<String, StoreError> {
        match JobId::parse(raw_id) {
            Ok(id) => self.get(&id).await,
            Err(_) => Err(StoreError::NotFound(raw_id.to_string())),
        }
    }
}

impl std::fmt::Debug for JobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobStore").finish_non_exhaustive()
    }
}
