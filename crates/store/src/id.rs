use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

const MAX_ID_LEN: usize = 128;

/// Opaque identifier of a translation job.
///
/// Fresh ids are random UUIDv4 strings. Ids coming back from callers are
/// restricted to `[A-Za-z0-9_-]{1,128}` because they become file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Generates a new globally unique identifier.
    pub fn generate() -> Self {
        JobId(uuid::Uuid::new_v4().to_string())
    }

    /// Validates a caller-supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if valid {
            Ok(JobId(raw.to_string()))
        } else {
            Err(StoreError::InvalidJobId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for JobId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobId::parse(s)
    }
}
