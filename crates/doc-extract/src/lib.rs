//! Plain-text extraction for uploaded documents
//!
//! Each supported format delegates to a third-party parser:
//!
//! - PDF via `pdf-extract` (handles CID fonts and ToUnicode CMaps)
//! - Word (.docx) via `docx-rs`
//! - Everything else is decoded as UTF-8
//!
//! No validation happens here: a well-formed but empty file produces an
//! empty string and downstream stages process it as-is.

mod docx;
mod pdf;

use shared_types::{Document, MediaType};
use thiserror::Error;
use tracing::{debug, info};

pub use docx::extract_docx_text;
pub use pdf::extract_pdf_text;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX text extraction failed: {0}")]
    Docx(String),

    #[error("Text is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Extract plain text from `data` according to its declared media type
pub fn extract_text(data: &[u8], media_type: MediaType) -> Result<String, ExtractionError> {
    let text = match media_type {
        MediaType::Pdf => extract_pdf_text(data)?,
        MediaType::Docx => extract_docx_text(data)?,
        MediaType::Plain => std::str::from_utf8(data)?.to_string(),
    };

    debug!(
        media_type = media_type.mime(),
        bytes = data.len(),
        chars = text.chars().count(),
        "extracted document text"
    );

    Ok(text)
}

/// Build a [`Document`] from an uploaded file
pub fn load_document(
    name: &str,
    media_type: MediaType,
    data: &[u8],
) -> Result<Document, ExtractionError> {
    info!("Extracting text from {} ({})", name, media_type.mime());
    let raw_text = extract_text(data, media_type)?;
    Ok(Document::new(name, media_type, raw_text))
}
