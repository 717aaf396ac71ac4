//! EndSessionHandler - drop a session entirely.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to end a session.
#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_id: SessionId,
}

/// Error type for ending sessions.
#[derive(Debug, Error)]
pub enum EndSessionError {
    #[error("storage error: {0}")]
    Storage(#[from] SessionStoreError),
}

/// Handler for removing sessions.
pub struct EndSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl EndSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: EndSessionCommand) -> Result<(), EndSessionError> {
        self.store.remove(cmd.session_id).await?;
        tracing::info!(session_id = %cmd.session_id, "session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn ended_sessions_are_gone() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = store.create().await.unwrap();
        let handler = EndSessionHandler::new(store.clone());

        handler
            .handle(EndSessionCommand {
                session_id: session.id(),
            })
            .await
            .unwrap();
        assert!(store.acquire(session.id()).await.is_err());
    }

    #[tokio::test]
    async fn ending_twice_is_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = store.create().await.unwrap();
        let handler = EndSessionHandler::new(store);
        let cmd = EndSessionCommand {
            session_id: session.id(),
        };

        handler.handle(cmd.clone()).await.unwrap();
        assert!(handler.handle(cmd).await.is_err());
    }
}
