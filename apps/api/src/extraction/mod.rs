//! Document text extraction — turns an uploaded PDF into plain résumé text.
//!
//! Only text-based PDFs are supported. Scanned images carry no text layer and
//! come back as `ExtractionError::NoText`.

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("The uploaded file is empty. Try uploading a different PDF or paste the text instead.")]
    EmptyUpload,

    #[error("Error reading PDF: {0}")]
    Malformed(String),

    #[error(
        "No text could be extracted. Please check your PDF is typed, not scanned. \
         Try pasting the text or uploading a different PDF."
    )]
    NoText,
}

/// Text recovered from a document, already trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

/// Extracts the text of every page of a PDF payload.
///
/// The parser runs on a blocking thread; a parser panic is reported as
/// `Malformed` rather than taking the request down with it.
pub async fn extract_text(payload: Bytes) -> Result<ExtractedText, ExtractionError> {
    if payload.is_empty() {
        return Err(ExtractionError::EmptyUpload);
    }

    let size = payload.len();
    let pages =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&payload))
            .await
            .map_err(|e| ExtractionError::Malformed(format!("PDF parser aborted: {e}")))?
            .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

    debug!("Parsed PDF: {} bytes, {} pages", size, pages.len());

    let text = join_pages(&pages);
    if text.is_empty() {
        return Err(ExtractionError::NoText);
    }

    info!(
        "Extracted {} characters from {} pages",
        text.chars().count(),
        pages.len()
    );

    Ok(ExtractedText {
        text,
        page_count: pages.len(),
    })
}

/// Joins page texts with a newline, skipping pages without text, and trims
/// the result.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
