use std::panic::{self, AssertUnwindSafe};

use crate::error::ExtractError;

/// Concatenates the text of every page in page order.
///
/// A failure on any page aborts the whole document. `pdf-extract` is known to
/// panic on some malformed content streams, so panics are caught and reported
/// as [`ExtractError::Extraction`] like any other parse failure.
pub(crate) fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|payload| ExtractError::extraction("pdf", panic_message(payload.as_ref())))?
    .map_err(|err| ExtractError::extraction("pdf", err))?;

    Ok(pages.concat())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("parser panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("parser panicked: {msg}")
    } else {
        "parser panicked".to_string()
    }
}
