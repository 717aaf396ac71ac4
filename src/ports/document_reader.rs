//! Document Text Reader Port - raw document bytes to plain text.
//!
//! The upload flow needs exactly one thing from a resume file: its text.
//! Implementations decide the format support; unreadable input is an
//! error the conversation surfaces before falling back to manual entry.

use thiserror::Error;

/// Port for extracting plain text from an uploaded document.
pub trait DocumentTextReader: Send + Sync {
    /// Extracts the document's text.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` when the bytes cannot be read as a
    /// supported document or yield no text at all.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, DocumentError>;
}

/// Document reading errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The bytes could not be parsed as a supported document.
    #[error("unreadable document: {0}")]
    Unreadable(String),

    /// The document parsed but contained no extractable text.
    #[error("document contains no extractable text")]
    Empty,
}
