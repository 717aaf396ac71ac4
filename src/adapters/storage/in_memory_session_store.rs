//! In-Memory Session Store Adapter
//!
//! Sessions live for the process lifetime only; there is no persistence
//! model in this system. Each session sits behind its own `tokio` mutex;
//! `acquire` hands out an owned guard so a state transition holds the
//! session exclusively for its whole duration, collaborator calls
//! included.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionGuard, SessionStore, SessionStoreError};

/// In-memory storage for screening sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Mutex<IntakeSession>>>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    /// Clears all stored sessions (useful for tests).
    pub async fn clear(&self) {
        self.sessions.write().unwrap().clear();
    }

    fn slot(&self, id: SessionId) -> Result<Arc<Mutex<IntakeSession>>, SessionStoreError> {
        self.sessions
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> Result<IntakeSession, SessionStoreError> {
        let session = IntakeSession::new();
        let snapshot = session.clone();
        self.sessions
            .write()
            .unwrap()
            .insert(session.id(), Arc::new(Mutex::new(session)));
        Ok(snapshot)
    }

    async fn acquire(&self, id: SessionId) -> Result<SessionGuard, SessionStoreError> {
        let slot = self.slot(id)?;
        Ok(slot.lock_owned().await)
    }

    async fn remove(&self, id: SessionId) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionStoreError::NotFound(id))
    }
}
