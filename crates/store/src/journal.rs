//! Append-only JSON Lines log of served suggestions.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::StoreError;

/// File used when none is configured.
pub const DEFAULT_SUGGESTION_LOG: &str = "suggestions.jsonl";

/// One line of the suggestion log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRecord {
    /// Local wall-clock time, ISO-8601 without offset.
    pub timestamp: String,
    pub request: String,
    pub response: Vec<String>,
}

impl SuggestionRecord {
    pub fn now(request: &str, response: &[String]) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            request: request.to_string(),
            response: response.to_vec(),
        }
    }
}

/// Serializes appends so concurrent writers never interleave within a line.
pub struct SuggestionLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SuggestionLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record. Non-ASCII text is written as-is.
    pub async fn append(&self, request: &str, response: &[String]) -> Result<(), StoreError> {
        let record = SuggestionRecord::now(request, response);
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
