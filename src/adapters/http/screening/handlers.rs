//! HTTP handlers for the screening endpoints.
//!
//! These handlers connect axum routes to application layer command/query
//! handlers: parse the path and body, run the handler, map its error to a
//! status + JSON pair.

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    ChooseManualEntryCommand, ChooseManualEntryError, ChooseManualEntryHandler, EndSessionCommand,
    EndSessionError, EndSessionHandler, GetSessionError, GetSessionHandler, GetSessionQuery,
    ResetSessionCommand, ResetSessionError, ResetSessionHandler, SendMessageCommand,
    SendMessageError, SendMessageHandler, StartSessionHandler, UploadDocumentCommand,
    UploadDocumentError, UploadDocumentHandler,
};
use crate::application::services::{FieldExtractionService, InterviewContentService};
use crate::domain::foundation::SessionId;
use crate::ports::{AiProvider, DocumentTextReader, SessionStore, SessionStoreError};

use super::dto::{ErrorResponse, SendMessageRequest, SessionResponse, UploadDocumentResponse};

// ════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct ScreeningAppState {
    store: Arc<dyn SessionStore>,
    reader: Arc<dyn DocumentTextReader>,
    extraction: Arc<FieldExtractionService>,
    interview: Arc<InterviewContentService>,
}

impl ScreeningAppState {
    pub fn new(
        store: Arc<dyn SessionStore>,
        reader: Arc<dyn DocumentTextReader>,
        provider: Arc<dyn AiProvider>,
    ) -> Self {
        Self {
            store,
            reader,
            extraction: Arc::new(FieldExtractionService::new(provider.clone())),
            interview: Arc::new(InterviewContentService::new(provider)),
        }
    }

    fn start_session_handler(&self) -> StartSessionHandler {
        StartSessionHandler::new(self.store.clone())
    }

    fn get_session_handler(&self) -> GetSessionHandler {
        GetSessionHandler::new(self.store.clone())
    }

    fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(
            self.store.clone(),
            self.extraction.clone(),
            self.interview.clone(),
        )
    }

    fn upload_document_handler(&self) -> UploadDocumentHandler {
        UploadDocumentHandler::new(
            self.store.clone(),
            self.reader.clone(),
            self.extraction.clone(),
        )
    }

    fn choose_manual_handler(&self) -> ChooseManualEntryHandler {
        ChooseManualEntryHandler::new(self.store.clone())
    }

    fn reset_session_handler(&self) -> ResetSessionHandler {
        ResetSessionHandler::new(self.store.clone())
    }

    fn end_session_handler(&self) -> EndSessionHandler {
        EndSessionHandler::new(self.store.clone())
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    SessionId::from_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session_id format")),
        )
    })
}

fn not_found(err: &SessionStoreError) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found(err.to_string())),
    )
}

// ════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════

/// Start a new screening session.
///
/// POST /screening/sessions
pub async fn start_session(
    State(state): State<ScreeningAppState>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.start_session_handler().handle().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(e.to_string())),
        )
    })?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::from_session(&result.session)),
    ))
}

/// Read a session's current state.
///
/// GET /screening/sessions/{session_id}
pub async fn get_session(
    State(state): State<ScreeningAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let result = state
        .get_session_handler()
        .handle(GetSessionQuery { session_id })
        .await
        .map_err(|e| match e {
            GetSessionError::Storage(err) => not_found(&err),
        })?;
    Ok(Json(SessionResponse::from_session(&result.session)))
}

/// Submit one user input.
///
/// POST /screening/sessions/{session_id}/messages
pub async fn send_message(
    State(state): State<ScreeningAppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let result = state
        .send_message_handler()
        .handle(SendMessageCommand {
            session_id,
            text: request.message,
        })
        .await
        .map_err(|e| match e {
            SendMessageError::EmptyMessage => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            ),
            SendMessageError::Storage(err) => not_found(&err),
        })?;
    Ok(Json(SessionResponse::from_session(&result.session)))
}

/// Upload a resume document (raw PDF bytes).
///
/// POST /screening/sessions/{session_id}/document
pub async fn upload_document(
    State(state): State<ScreeningAppState>,
    Path(session_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let result = state
        .upload_document_handler()
        .handle(UploadDocumentCommand {
            session_id,
            bytes: body.to_vec(),
        })
        .await
        .map_err(|e| match e {
            UploadDocumentError::WrongStage(_) => (
                StatusCode::CONFLICT,
                Json(ErrorResponse::conflict(e.to_string())),
            ),
            UploadDocumentError::Storage(err) => not_found(&err),
        })?;
    Ok(Json(UploadDocumentResponse {
        accepted: result.accepted,
        session: SessionResponse::from_session(&result.session),
    }))
}

/// Decline upload and start manual entry.
///
/// POST /screening/sessions/{session_id}/manual
pub async fn choose_manual(
    State(state): State<ScreeningAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let result = state
        .choose_manual_handler()
        .handle(ChooseManualEntryCommand { session_id })
        .await
        .map_err(|e| match e {
            ChooseManualEntryError::WrongStage(_) => (
                StatusCode::CONFLICT,
                Json(ErrorResponse::conflict(e.to_string())),
            ),
            ChooseManualEntryError::Storage(err) => not_found(&err),
        })?;
    Ok(Json(SessionResponse::from_session(&result.session)))
}

/// Start the conversation over.
///
/// POST /screening/sessions/{session_id}/reset
pub async fn reset_session(
    State(state): State<ScreeningAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let result = state
        .reset_session_handler()
        .handle(ResetSessionCommand { session_id })
        .await
        .map_err(|e| match e {
            ResetSessionError::Storage(err) => not_found(&err),
        })?;
    Ok(Json(SessionResponse::from_session(&result.session)))
}

/// Drop a session.
///
/// DELETE /screening/sessions/{session_id}
pub async fn end_session(
    State(state): State<ScreeningAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    state
        .end_session_handler()
        .handle(EndSessionCommand { session_id })
        .await
        .map_err(|e| match e {
            EndSessionError::Storage(err) => not_found(&err),
        })?;
    Ok(StatusCode::NO_CONTENT)
}
