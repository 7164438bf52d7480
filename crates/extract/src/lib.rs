//! Quill Extract Layer
//!
//! This is where uploaded documents become plain text. The translate endpoint
//! accepts either raw text or a document encoded as a data URI; this crate
//! decodes the latter and pulls the text out of it so the chunker can work
//! with lines.
//!
//! ## What we do here
//!
//! - **Decode payloads** - Split `data:application/<kind>;base64,...` into a
//!   [`FileKind`] and raw bytes. Plain text passes straight through.
//! - **Extract PDF text** - Every page, in page order, concatenated. One bad
//!   page fails the whole document.
//! - **Extract DOCX text** - Walk `word/document.xml` and keep the text runs.
//! - **Log outcomes** - Structured `tracing` events with sizes and timings.
//!
//! Extraction is CPU-bound and synchronous. Async callers should run it on a
//! blocking thread.
//!
//! ## Example
//!
//! ```
//! use extract::{resolve_text, ExtractError};
//!
//! assert_eq!(resolve_text("Bonjour").unwrap(), "Bonjour");
//!
//! let err = resolve_text("data:application/zip;base64,UEsDBA==").unwrap_err();
//! assert_eq!(err, ExtractError::UnsupportedFileType("zip".into()));
//! ```

use std::time::Instant;

use tracing::{info, warn};

mod docx;
mod error;
mod payload;
mod pdf;

pub use crate::error::ExtractError;
pub use crate::payload::{
    decode_payload, is_data_uri, FileKind, SourcePayload, DATA_URI_PREFIX,
};

/// Extracts best-effort plain text from document bytes of the given kind.
pub fn extract_text(kind: FileKind, bytes: &[u8]) -> Result<String, ExtractError> {
    let start = Instant::now();
    let result = match kind {
        FileKind::Pdf => pdf::extract_pdf_text(bytes),
        FileKind::Docx => docx::extract_docx_text(bytes),
    };
    let elapsed_micros = start.elapsed().as_micros();

    match &result {
        Ok(text) => info!(
            kind = %kind,
            input_bytes = bytes.len(),
            output_chars = text.chars().count(),
            elapsed_micros,
            "extract_success"
        ),
        Err(err) => warn!(
            kind = %kind,
            input_bytes = bytes.len(),
            error = %err,
            elapsed_micros,
            "extract_failure"
        ),
    }
    result
}

/// Turns the raw `text` field of a translate request into the text to translate.
pub fn resolve_text(input: &str) -> Result<String, ExtractError> {
    match decode_payload(input)? {
        SourcePayload::Text(text) => Ok(text),
        SourcePayload::Document { kind, bytes } => extract_text(kind, &bytes),
    }
}
