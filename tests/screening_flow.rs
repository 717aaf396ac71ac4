//! Integration tests for the screening conversation flow.
//!
//! These drive full conversations through the application handlers with a
//! scripted AI provider and an in-memory store, exercising the wiring the
//! HTTP layer sits on: upload/manual branching, gathering with validation
//! and opportunistic extraction, the confirmation and correction loop,
//! and the question + summary finale.

use std::sync::Arc;

use talentscout::adapters::ai::MockAiProvider;
use talentscout::adapters::storage::InMemorySessionStore;
use talentscout::application::handlers::{
    ChooseManualEntryCommand, ChooseManualEntryHandler, ResetSessionCommand, ResetSessionHandler,
    SendMessageCommand, SendMessageHandler, StartSessionHandler, UploadDocumentCommand,
    UploadDocumentHandler,
};
use talentscout::application::services::{FieldExtractionService, InterviewContentService};
use talentscout::domain::foundation::SessionId;
use talentscout::domain::intake::{FieldName, IntakeSession, Role, Stage};
use talentscout::ports::{DocumentError, DocumentTextReader};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Reader that treats the upload bytes as the resume text itself.
struct PassthroughReader;

impl DocumentTextReader for PassthroughReader {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, DocumentError> {
        if bytes.is_empty() {
            return Err(DocumentError::Empty);
        }
        String::from_utf8(bytes.to_vec()).map_err(|e| DocumentError::Unreadable(e.to_string()))
    }
}

struct Harness {
    store: Arc<InMemorySessionStore>,
    send: SendMessageHandler,
    manual: ChooseManualEntryHandler,
    upload: UploadDocumentHandler,
    reset: ResetSessionHandler,
}

impl Harness {
    fn new(provider: MockAiProvider) -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let provider: Arc<MockAiProvider> = Arc::new(provider);
        let extraction = Arc::new(FieldExtractionService::new(provider.clone()));
        let interview = Arc::new(InterviewContentService::new(provider));
        Self {
            send: SendMessageHandler::new(store.clone(), extraction.clone(), interview),
            manual: ChooseManualEntryHandler::new(store.clone()),
            upload: UploadDocumentHandler::new(
                store.clone(),
                Arc::new(PassthroughReader),
                extraction,
            ),
            reset: ResetSessionHandler::new(store.clone()),
            store,
        }
    }

    /// Scripted provider: extractions return nothing, questions and
    /// summary succeed.
    fn default_provider() -> MockAiProvider {
        MockAiProvider::new()
            .with_default_response("{}")
            .with_scripted(
                "Generate 5 technical interview questions",
                "1. What is a lifetime?\n2. Explain Send and Sync.",
            )
            .with_scripted(
                "concise candidate summaries",
                "Senior Rust engineer, strong fit for backend roles.",
            )
    }

    async fn start(&self) -> SessionId {
        StartSessionHandler::new(self.store.clone())
            .handle()
            .await
            .unwrap()
            .session
            .id()
    }

    async fn say(&self, id: SessionId, text: &str) -> IntakeSession {
        self.send
            .handle(SendMessageCommand {
                session_id: id,
                text: text.to_string(),
            })
            .await
            .unwrap()
            .session
    }
}

const ANSWERS: [&str; 7] = [
    "Ada Lovelace",
    "ada@example.com",
    "+44 5550192837",
    "Senior: 5+ years",
    "AI Engineer",
    "London, UK",
    "Rust, Python, AWS",
];

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn manual_flow_runs_from_upload_to_finished() {
    let harness = Harness::new(Harness::default_provider());
    let id = harness.start().await;

    harness
        .manual
        .handle(ChooseManualEntryCommand { session_id: id })
        .await
        .unwrap();

    let mut session = None;
    for answer in ANSWERS {
        session = Some(harness.say(id, answer).await);
    }
    let session = session.unwrap();
    assert_eq!(session.stage(), Stage::Confirming);

    // The confirmation listing shows every collected value.
    let listing = session.transcript().last().unwrap().content();
    for answer in ANSWERS {
        assert!(listing.contains(answer), "listing missing {answer}");
    }

    let session = harness.say(id, "yes").await;
    assert_eq!(session.stage(), Stage::Finished);
    assert_eq!(
        session.summary(),
        Some("Senior Rust engineer, strong fit for backend roles.")
    );
    let transcript: Vec<&str> = session.transcript().iter().map(|m| m.content()).collect();
    assert!(transcript
        .iter()
        .any(|c| c.contains("What is a lifetime?")));
}

#[tokio::test]
async fn validation_failure_reprompts_the_same_field() {
    let harness = Harness::new(Harness::default_provider());
    let id = harness.start().await;
    harness
        .manual
        .handle(ChooseManualEntryCommand { session_id: id })
        .await
        .unwrap();

    harness.say(id, "Ada Lovelace").await;
    let session = harness.say(id, "not-an-email").await;

    assert_eq!(session.stage(), Stage::Gathering);
    assert_eq!(session.current_field(), Some(FieldName::Email));
    assert!(!session.profile().is_set(FieldName::Email));

    let session = harness.say(id, "ada@example.com").await;
    assert_eq!(session.current_field(), Some(FieldName::PhoneNumber));
}

#[tokio::test]
async fn correction_loop_replaces_one_field_and_reconfirms() {
    let harness = Harness::new(Harness::default_provider());
    let id = harness.start().await;
    harness
        .manual
        .handle(ChooseManualEntryCommand { session_id: id })
        .await
        .unwrap();
    for answer in ANSWERS {
        harness.say(id, answer).await;
    }

    let session = harness.say(id, "no, one thing is off").await;
    assert_eq!(session.stage(), Stage::AwaitingEditTarget);

    // An unknown target leaves everything unchanged and lists the fields.
    let session = harness.say(id, "my salary").await;
    assert_eq!(session.stage(), Stage::AwaitingEditTarget);
    assert!(session
        .transcript()
        .last()
        .unwrap()
        .content()
        .contains("desired_positions"));

    let session = harness.say(id, "current location").await;
    assert_eq!(session.stage(), Stage::Gathering);
    assert_eq!(session.current_field(), Some(FieldName::CurrentLocation));

    let session = harness.say(id, "Cambridge, UK").await;
    assert_eq!(session.stage(), Stage::Confirming);
    assert!(session
        .transcript()
        .last()
        .unwrap()
        .content()
        .contains("Cambridge, UK"));

    let session = harness.say(id, "yes").await;
    assert_eq!(session.stage(), Stage::Finished);
}

#[tokio::test]
async fn document_prefill_skips_extracted_fields() {
    let provider = MockAiProvider::new()
        .with_default_response("{}")
        .with_scripted(
            "expert resume parser",
            r#"{"full_name": "Ada Lovelace", "email": "ada@example.com",
                "phone_number": "5550192837", "current_location": "London, UK",
                "tech_stack": ["Rust", "AWS"]}"#,
        )
        .with_scripted("Generate 5 technical interview questions", "Q1")
        .with_scripted("concise candidate summaries", "Summary.");
    let harness = Harness::new(provider);
    let id = harness.start().await;

    let result = harness
        .upload
        .handle(UploadDocumentCommand {
            session_id: id,
            bytes: b"Ada Lovelace\nada@example.com\n...".to_vec(),
        })
        .await
        .unwrap();

    assert!(result.accepted);
    assert_eq!(result.session.stage(), Stage::Gathering);
    // Only the two conversational fields are left to ask.
    assert_eq!(
        result.session.current_field(),
        Some(FieldName::YearsExperience)
    );

    harness.say(id, "Senior: 6 years").await;
    let session = harness.say(id, "Staff Engineer").await;
    assert_eq!(session.stage(), Stage::Confirming);
    assert_eq!(
        session.profile().get(FieldName::TechStack),
        Some("Rust, AWS")
    );
}

#[tokio::test]
async fn unreadable_document_leaves_manual_entry_open() {
    let harness = Harness::new(Harness::default_provider());
    let id = harness.start().await;

    let result = harness
        .upload
        .handle(UploadDocumentCommand {
            session_id: id,
            bytes: Vec::new(),
        })
        .await
        .unwrap();
    assert!(!result.accepted);
    assert_eq!(result.session.stage(), Stage::Upload);

    // Manual entry still works afterwards.
    let result = harness
        .manual
        .handle(ChooseManualEntryCommand { session_id: id })
        .await
        .unwrap();
    assert_eq!(result.session.stage(), Stage::Gathering);
}

#[tokio::test]
async fn question_generation_failure_finishes_with_fallbacks() {
    let provider = MockAiProvider::new()
        .with_default_response("{}")
        .with_scripted_failure("Generate 5 technical interview questions", "api down")
        .with_scripted_failure("concise candidate summaries", "api down");
    let harness = Harness::new(provider);
    let id = harness.start().await;
    harness
        .manual
        .handle(ChooseManualEntryCommand { session_id: id })
        .await
        .unwrap();
    for answer in ANSWERS {
        harness.say(id, answer).await;
    }

    let session = harness.say(id, "yes").await;

    assert_eq!(session.stage(), Stage::Finished);
    // Both collaborators failed; both fixed fallbacks are in place.
    assert!(session
        .summary()
        .unwrap()
        .contains("summary generation service failed"));
    assert!(session
        .transcript()
        .iter()
        .any(|m| m.content().contains("question generation service failed")));
}

#[tokio::test]
async fn reset_mid_conversation_starts_over() {
    let harness = Harness::new(Harness::default_provider());
    let id = harness.start().await;
    harness
        .manual
        .handle(ChooseManualEntryCommand { session_id: id })
        .await
        .unwrap();
    harness.say(id, "Ada Lovelace").await;

    let result = harness
        .reset
        .handle(ResetSessionCommand { session_id: id })
        .await
        .unwrap();

    assert_eq!(result.session.stage(), Stage::Upload);
    assert!(result.session.transcript().is_empty());
    assert_eq!(result.session.profile().filled_count(), 0);

    // The flow restarts cleanly after the reset.
    harness
        .manual
        .handle(ChooseManualEntryCommand { session_id: id })
        .await
        .unwrap();
    let session = harness.say(id, "Grace Hopper").await;
    assert_eq!(
        session.profile().get(FieldName::FullName),
        Some("Grace Hopper")
    );
}

#[tokio::test]
async fn transcript_alternates_user_and_assistant_messages() {
    let harness = Harness::new(Harness::default_provider());
    let id = harness.start().await;
    harness
        .manual
        .handle(ChooseManualEntryCommand { session_id: id })
        .await
        .unwrap();
    let session = harness.say(id, "Ada Lovelace").await;

    let roles: Vec<Role> = session.transcript().iter().map(|m| m.role()).collect();
    assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
}
