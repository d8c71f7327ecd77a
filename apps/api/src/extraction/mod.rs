//! PDF-to-text extraction for uploaded résumés.

use std::panic;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Empty PDF file.")]
    Empty,

    #[error("Invalid or corrupted PDF file.")]
    Corrupted,

    #[error("No readable text found in PDF.")]
    NoReadableText,
}

/// Extracts the text of every page, trimmed.
///
/// CPU-bound: call from `tokio::task::spawn_blocking`.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::Empty);
    }

    // The parser panics on some malformed inputs; those are corrupt uploads too.
    let text = match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF parse failed: {e:?}");
            return Err(ExtractionError::Corrupted);
        }
        Err(_) => {
            warn!("PDF parser panicked on upload of {} bytes", bytes.len());
            return Err(ExtractionError::Corrupted);
        }
    };

    debug!("Extracted {} chars from {} byte PDF", text.len(), bytes.len());
    clean_extracted_text(text)
}

fn clean_extracted_text(text: String) -> Result<String, ExtractionError> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return Err(ExtractionError::NoReadableText);
    }
    Ok(cleaned.to_string())
}
