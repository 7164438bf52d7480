//! Flat-directory backend.
//!
//! Layout is one file per finished job:
//!
//! ```text
//! <dir>/
//! ├── 3f0c1b2e-....txt
//! └── 9a7d44c1-....txt
//! ```
//!
//! File contents are the translation bytes, nothing else. Results are written
//! to a hidden temp file and renamed into place, so a reader either sees the
//! whole result or no file at all.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::backend::JobBackend;
use crate::{JobId, StoreError};

pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Final location of the result for `id`.
    pub fn path_for(&self, id: &JobId) -> PathBuf {
        self.dir.join(format!("{id}.txt"))
    }

    fn temp_path_for(&self, id: &JobId) -> PathBuf {
        self.dir.join(format!(".{id}.txt.tmp"))
    }
}

#[async_trait]
impl JobBackend for FileBackend {
    async fn put(&self, id: &JobId, text: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        let temp = self.temp_path_for(id);
        fs::write(&temp, text.as_bytes()).await?;
        fs::rename(&temp, self.path_for(id)).await?;
        Ok(())
    }

    async fn get(&self, id: &JobId) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(id)).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
