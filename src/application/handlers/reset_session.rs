//! ResetSessionHandler - the global "start new conversation" event.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeSession, SessionEvent};
use crate::ports::{SessionStore, SessionStoreError};

/// Command to reset a session.
#[derive(Debug, Clone)]
pub struct ResetSessionCommand {
    pub session_id: SessionId,
}

/// Result of resetting a session.
#[derive(Debug, Clone)]
pub struct ResetSessionResult {
    pub session: IntakeSession,
}

/// Error type for resets.
#[derive(Debug, Error)]
pub enum ResetSessionError {
    #[error("storage error: {0}")]
    Storage(#[from] SessionStoreError),
}

/// Handler for the global reset.
pub struct ResetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl ResetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: ResetSessionCommand,
    ) -> Result<ResetSessionResult, ResetSessionError> {
        let mut session = self.store.acquire(cmd.session_id).await?;
        session.apply(SessionEvent::Reset);
        tracing::info!(session_id = %cmd.session_id, "session reset");
        Ok(ResetSessionResult {
            session: session.clone(),
        })
    }
}
