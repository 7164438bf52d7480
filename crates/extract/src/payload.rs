//! Decoding of the `text` field accepted by the translate endpoint.
//!
//! Callers either send plain text or a document encoded as a data URI:
//!
//! ```text
//! data:application/<subtype>[;param...],<base64 payload>
//! ```
//!
//! Only the `pdf` and `docx` subtypes are accepted. Anything that does not start
//! with `data:application/` is treated as plain text and passed through untouched.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ExtractError;

/// Prefix that marks an input as an encoded document rather than plain text.
pub const DATA_URI_PREFIX: &str = "data:application/";

/// Document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Docx,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(FileKind::Pdf),
            "docx" => Ok(FileKind::Docx),
            other => Err(ExtractError::UnsupportedFileType(other.to_string())),
        }
    }
}

/// Result of decoding the raw `text` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcePayload {
    /// Plain text, used as-is.
    Text(String),
    /// Decoded document bytes awaiting extraction.
    Document { kind: FileKind, bytes: Vec<u8> },
}

impl SourcePayload {
    /// Short label for logs.
    pub fn kind_label(&self) -> &'static str {
        match self {
            SourcePayload::Text(_) => "text",
            SourcePayload::Document { kind, .. } => kind.as_str(),
        }
    }
}

/// Returns true when `input` should be decoded as a data URI.
pub fn is_data_uri(input: &str) -> bool {
    input.starts_with(DATA_URI_PREFIX)
}

/// Decodes the raw `text` field into either plain text or document bytes.
///
/// The subtype is the last `/`-separated segment of the header, cut at the
/// first `;`, so `data:application/pdf;base64,` yields `pdf`.
///
/// # Errors
///
/// - [`ExtractError::MalformedDataUri`] when there is no `,` after the header
/// - [`ExtractError::UnsupportedFileType`] for subtypes other than `pdf`/`docx`
/// - [`ExtractError::Base64`] when the payload does not decode
pub fn decode_payload(input: &str) -> Result<SourcePayload, ExtractError> {
    if !is_data_uri(input) {
        return Ok(SourcePayload::Text(input.to_string()));
    }

    let (header, data) = input.split_once(',').ok_or_else(|| {
        ExtractError::MalformedDataUri("missing ',' between header and payload".into())
    })?;

    let subtype = header
        .rsplit('/')
        .next()
        .and_then(|segment| segment.split(';').next())
        .unwrap_or_default();
    let kind = subtype.parse::<FileKind>()?;

    let compact: String = data
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| ExtractError::Base64(err.to_string()))?;

    Ok(SourcePayload::Document { kind, bytes })
}
