//! Session Store Port - session lookup with per-session exclusive access.
//!
//! `acquire` hands out an owned mutex guard over the session, making every
//! state transition a critical section: concurrent requests against the
//! same session queue up and apply one at a time, which the state
//! machine's total-transition invariant depends on. There is no separate
//! save step: mutations through the guard are the stored state.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::OwnedMutexGuard;

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeSession;

/// Exclusive handle to one stored session.
pub type SessionGuard = OwnedMutexGuard<IntakeSession>;

/// Port for storing and retrieving screening sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates and stores a fresh session, returning a snapshot of it.
    async fn create(&self) -> Result<IntakeSession, SessionStoreError>;

    /// Acquires exclusive access to a session.
    ///
    /// Blocks until any in-flight transition on the same session
    /// completes.
    async fn acquire(&self, id: SessionId) -> Result<SessionGuard, SessionStoreError>;

    /// Removes a session entirely.
    async fn remove(&self, id: SessionId) -> Result<(), SessionStoreError>;
}

/// Session storage errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionStoreError {
    /// No session with the given id.
    #[error("session not found: {0}")]
    NotFound(SessionId),
}
