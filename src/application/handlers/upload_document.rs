//! UploadDocumentHandler - pre-fill the profile from a resume.
//!
//! A document that cannot be read is surfaced as a visible error message
//! and leaves the session in the upload stage with manual entry still
//! available; it is not a handler failure.

use std::sync::Arc;

use thiserror::Error;

use crate::application::services::FieldExtractionService;
use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeSession, SessionEvent, Stage};
use crate::ports::{DocumentTextReader, SessionStore, SessionStoreError};

/// Command to upload a resume document.
#[derive(Debug, Clone)]
pub struct UploadDocumentCommand {
    pub session_id: SessionId,
    pub bytes: Vec<u8>,
}

/// Result of an upload attempt.
#[derive(Debug, Clone)]
pub struct UploadDocumentResult {
    pub session: IntakeSession,
    /// False when the document could not be read.
    pub accepted: bool,
}

/// Error type for document uploads.
#[derive(Debug, Error)]
pub enum UploadDocumentError {
    #[error("uploads are only accepted during the upload stage, not {0:?}")]
    WrongStage(Stage),

    #[error("storage error: {0}")]
    Storage(#[from] SessionStoreError),
}

/// Handler for resume uploads.
pub struct UploadDocumentHandler {
    store: Arc<dyn SessionStore>,
    reader: Arc<dyn DocumentTextReader>,
    extraction: Arc<FieldExtractionService>,
}

impl UploadDocumentHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        reader: Arc<dyn DocumentTextReader>,
        extraction: Arc<FieldExtractionService>,
    ) -> Self {
        Self {
            store,
            reader,
            extraction,
        }
    }

    pub async fn handle(
        &self,
        cmd: UploadDocumentCommand,
    ) -> Result<UploadDocumentResult, UploadDocumentError> {
        let mut session = self.store.acquire(cmd.session_id).await?;
        if session.stage() != Stage::Upload {
            return Err(UploadDocumentError::WrongStage(session.stage()));
        }

        let text = match self.reader.extract_text(&cmd.bytes) {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(session_id = %cmd.session_id, %error, "document read failed");
                session.apply(SessionEvent::DocumentRejected {
                    reason: error.to_string(),
                });
                return Ok(UploadDocumentResult {
                    session: session.clone(),
                    accepted: false,
                });
            }
        };

        let fields = self.extraction.extract_from_document(&text).await;
        tracing::info!(
            session_id = %cmd.session_id,
            prefilled = fields.len(),
            "resume analyzed"
        );
        session.apply(SessionEvent::DocumentPrefilled { fields });

        Ok(UploadDocumentResult {
            session: session.clone(),
            accepted: true,
        })
    }
}
