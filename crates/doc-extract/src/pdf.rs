//! PDF text extraction using pdf-extract

use crate::ExtractionError;

/// Extract text from all pages of a PDF
pub fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractionError::Pdf(e.to_string()))
}
