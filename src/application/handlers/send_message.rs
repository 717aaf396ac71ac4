//! SendMessageHandler - route one user input through the conversation.
//!
//! The reducer returns effects; this handler executes them in order,
//! feeding each collaborator result back in as the next event. The
//! question-generation stage is therefore resolved synchronously within
//! the same request, matching the blocking-call model: the user's "yes"
//! returns only once questions (or their fallback) and the summary are in.

use std::collections::VecDeque;
use std::sync::Arc;

use thiserror::Error;

use crate::application::services::{FieldExtractionService, InterviewContentService};
use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeSession, SessionEffect, SessionEvent, Stage};
use crate::ports::{SessionStore, SessionStoreError};

/// Command carrying one user input.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub session_id: SessionId,
    pub text: String,
}

/// Result of handling one user input.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub session: IntakeSession,
}

/// Error type for sending messages.
#[derive(Debug, Error)]
pub enum SendMessageError {
    #[error("message text cannot be empty")]
    EmptyMessage,

    #[error("storage error: {0}")]
    Storage(#[from] SessionStoreError),
}

/// Handler for user chat input.
pub struct SendMessageHandler {
    store: Arc<dyn SessionStore>,
    extraction: Arc<FieldExtractionService>,
    interview: Arc<InterviewContentService>,
}

impl SendMessageHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        extraction: Arc<FieldExtractionService>,
        interview: Arc<InterviewContentService>,
    ) -> Self {
        Self {
            store,
            extraction,
            interview,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        if cmd.text.trim().is_empty() {
            return Err(SendMessageError::EmptyMessage);
        }

        let mut session = self.store.acquire(cmd.session_id).await?;

        // Opportunistic extraction only applies while gathering; the
        // confirmation and edit stages are interpreted locally.
        let extracted = match (session.stage(), session.current_field()) {
            (Stage::Gathering, Some(field)) => {
                self.extraction.extract_from_message(&cmd.text, field).await
            }
            _ => Default::default(),
        };

        let mut pending: VecDeque<SessionEffect> = session
            .apply(SessionEvent::UserMessage {
                text: cmd.text,
                extracted,
            })
            .into();

        while let Some(effect) = pending.pop_front() {
            let follow_up = self.execute(effect).await;
            pending.extend(session.apply(follow_up));
        }

        Ok(SendMessageResult {
            session: session.clone(),
        })
    }

    async fn execute(&self, effect: SessionEffect) -> SessionEvent {
        match effect {
            SessionEffect::GenerateQuestions {
                experience_level,
                tech_stack,
            } => match self
                .interview
                .generate_questions(&experience_level, &tech_stack)
                .await
            {
                Ok(questions) => SessionEvent::QuestionsGenerated { questions },
                Err(error) => {
                    tracing::warn!(%error, "question generation failed, using fallback");
                    SessionEvent::QuestionsFailed
                }
            },
            SessionEffect::GenerateSummary { profile } => {
                let summary = self.interview.summarize(&profile).await;
                SessionEvent::SummaryReady { summary }
            }
        }
    }
}
