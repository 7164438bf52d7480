use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::{JobId, StoreError};

/// Key-value storage for finished translations.
///
/// Each id is written at most once, by the task that created it, so
/// implementations need not guard against concurrent writers of one key.
#[async_trait]
pub trait JobBackend: Send + Sync {
    /// Persist `text` under `id`.
    async fn put(&self, id: &JobId, text: &str) -> Result<(), StoreError>;
    /// Fetch the text stored under `id`, if any.
    async fn get(&self, id: &JobId) -> Result<Option<String>, StoreError>;
}

/// Selects and builds a backend.
///
/// # Example
/// ```
/// use store::BackendConfig;
///
/// let on_disk = BackendConfig::file("translate_result");
/// let for_tests = BackendConfig::in_memory();
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendConfig {
    /// One `{id}.txt` file per job under `dir`.
    File { dir: PathBuf },
    /// A `HashMap` behind a lock. Lost on restart.
    InMemory,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::File {
            dir: PathBuf::from(DEFAULT_RESULT_DIR),
        }
    }
}

/// Directory used when none is configured.
pub const DEFAULT_RESULT_DIR: &str = "translate_result";

impl BackendConfig {
    pub fn in_memory() -> Self {
        BackendConfig::InMemory
    }

    pub fn file<P: Into<PathBuf>>(dir: P) -> Self {
        BackendConfig::File { dir: dir.into() }
    }

    pub fn build(&self) -> Arc<dyn JobBackend> {
        match self {
            BackendConfig::File { dir } => Arc::new(FileBackend::new(dir.clone())),
            BackendConfig::InMemory => Arc::new(InMemoryBackend::new()),
        }
    }
}

/// An in-memory backend using a `RwLock` around a `HashMap`.
#[derive(Default)]
pub struct InMemoryBackend {
    records: RwLock<HashMap<JobId, String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobBackend for InMemoryBackend {
    async fn put(&self, id: &JobId, text: &str) -> Result<(), StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .insert(id.clone(), text.to_string());
        Ok(())
    }

    async fn get(&self, id: &JobId) -> Result<Option<String>, StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.get(id).cloned())
    }
}

pub mod file;

pub use file::FileBackend;
