//! Word document text extraction using docx-rs

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use crate::ExtractionError;

/// Extract paragraph text from a .docx file, one line per paragraph
pub fn extract_docx_text(data: &[u8]) -> Result<String, ExtractionError> {
    let docx = read_docx(data).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut text = String::new();
    for child in docx.document.children.iter() {
        if let DocumentChild::Paragraph(para) = child {
            for para_child in para.children.iter() {
                if let ParagraphChild::Run(run) = para_child {
                    for run_child in run.children.iter() {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            // Every paragraph ends a line, empty ones included
            text.push('\n');
        }
    }

    Ok(text)
}
