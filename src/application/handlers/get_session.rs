//! GetSessionHandler - read one session's current state.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

/// Query for a session snapshot.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Result of the query.
#[derive(Debug, Clone)]
pub struct GetSessionResult {
    pub session: IntakeSession,
}

/// Error type for the query.
#[derive(Debug, Error)]
pub enum GetSessionError {
    #[error("storage error: {0}")]
    Storage(#[from] SessionStoreError),
}

/// Handler for reading sessions.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<GetSessionResult, GetSessionError> {
        let session = self.store.acquire(query.session_id).await?;
        Ok(GetSessionResult {
            session: session.clone(),
        })
    }
}
