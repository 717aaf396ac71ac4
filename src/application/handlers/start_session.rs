//! StartSessionHandler - create a fresh screening session.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

/// Result of starting a session.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session: IntakeSession,
}

/// Error type for starting sessions.
#[derive(Debug, Error)]
pub enum StartSessionError {
    #[error("storage error: {0}")]
    Storage(#[from] SessionStoreError),
}

/// Handler for starting screening sessions.
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<StartSessionResult, StartSessionError> {
        let session = self.store.create().await?;
        tracing::info!(session_id = %session.id(), "screening session started");
        Ok(StartSessionResult { session })
    }
}
