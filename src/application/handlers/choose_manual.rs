//! ChooseManualEntryHandler - decline upload and start questioning.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeSession, SessionEvent, Stage};
use crate::ports::{SessionStore, SessionStoreError};

/// Command to start manual entry.
#[derive(Debug, Clone)]
pub struct ChooseManualEntryCommand {
    pub session_id: SessionId,
}

/// Result of choosing manual entry.
#[derive(Debug, Clone)]
pub struct ChooseManualEntryResult {
    pub session: IntakeSession,
}

/// Error type for choosing manual entry.
#[derive(Debug, Error)]
pub enum ChooseManualEntryError {
    #[error("manual entry is only available during upload, not {0:?}")]
    WrongStage(Stage),

    #[error("storage error: {0}")]
    Storage(#[from] SessionStoreError),
}

/// Handler for the manual-entry choice.
pub struct ChooseManualEntryHandler {
    store: Arc<dyn SessionStore>,
}

impl ChooseManualEntryHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: ChooseManualEntryCommand,
    ) -> Result<ChooseManualEntryResult, ChooseManualEntryError> {
        let mut session = self.store.acquire(cmd.session_id).await?;
        if session.stage() != Stage::Upload {
            return Err(ChooseManualEntryError::WrongStage(session.stage()));
        }
        session.apply(SessionEvent::ManualEntryChosen);
        Ok(ChooseManualEntryResult {
            session: session.clone(),
        })
    }
}
