//! PDF text extraction via the `pdf-extract` crate.

use crate::ports::{DocumentError, DocumentTextReader};

/// Reads resume PDFs into plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextReader;

impl PdfTextReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentTextReader for PdfTextReader {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, DocumentError> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| DocumentError::Unreadable(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(text)
    }
}
