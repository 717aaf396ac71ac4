//! Request/response DTOs for the screening endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::intake::{CandidateProfile, IntakeSession, Message, Role, Stage, UPLOAD_NOTICE};

/// One user input.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// Full view of one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub stage: Stage,
    /// Banner shown alongside the upload stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub profile: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_field: Option<String>,
    pub messages: Vec<MessageResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub progress: ProgressResponse,
}

impl SessionResponse {
    pub fn from_session(session: &IntakeSession) -> Self {
        let profile = session
            .profile()
            .entries()
            .map(|(field, value)| (field.as_str().to_string(), value.to_string()))
            .collect();
        Self {
            session_id: session.id().to_string(),
            stage: session.stage(),
            notice: (session.stage() == Stage::Upload).then(|| UPLOAD_NOTICE.to_string()),
            profile,
            current_field: session.current_field().map(|f| f.as_str().to_string()),
            messages: session
                .transcript()
                .iter()
                .map(MessageResponse::from_message)
                .collect(),
            summary: session.summary().map(str::to_string),
            progress: ProgressResponse {
                filled: session.profile().filled_count(),
                total: CandidateProfile::total_count(),
            },
        }
    }
}

/// One transcript message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub role: &'static str,
    pub content: String,
}

impl MessageResponse {
    fn from_message(message: &Message) -> Self {
        Self {
            role: match message.role() {
                Role::User => "user",
                Role::Assistant => "assistant",
            },
            content: message.content().to_string(),
        }
    }
}

/// Screening progress (filled fields out of total).
#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub filled: usize,
    pub total: usize,
}

/// Result of a document upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadDocumentResponse {
    /// False when the document could not be read.
    pub accepted: bool,
    #[serde(flatten)]
    pub session: SessionResponse,
}

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: "bad_request",
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: "not_found",
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            error: "conflict",
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "internal",
            message: message.into(),
        }
    }
}
