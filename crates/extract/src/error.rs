//! Error types produced by the extract crate.
//!
//! Every failure here is terminal for the translation job that triggered it:
//! there is no partial result and no retry. The server never surfaces these
//! synchronously; they are logged by the background task.
//!
//! | Error | Cause |
//! |-------|-------|
//! | [`UnsupportedFileType`](ExtractError::UnsupportedFileType) | data URI subtype is not `pdf` or `docx` |
//! | [`MalformedDataUri`](ExtractError::MalformedDataUri) | header present but no `,` separating the payload |
//! | [`Base64`](ExtractError::Base64) | payload is not valid base64 |
//! | [`Extraction`](ExtractError::Extraction) | document bytes could not be parsed |

use thiserror::Error;

/// Errors surfaced while decoding or extracting an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The declared file kind is not one we can read.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// The input started like a data URI but could not be split into header and payload.
    #[error("malformed data uri: {0}")]
    MalformedDataUri(String),

    /// The data URI payload failed base64 decoding.
    #[error("invalid base64 payload: {0}")]
    Base64(String),

    /// The document bytes were malformed for their declared kind.
    #[error("failed to extract text from {kind}: {message}")]
    Extraction { kind: String, message: String },
}

impl ExtractError {
    pub(crate) fn extraction(kind: impl Into<String>, message: impl ToString) -> Self {
        ExtractError::Extraction {
            kind: kind.into(),
            message: message.to_string(),
        }
    }
}
