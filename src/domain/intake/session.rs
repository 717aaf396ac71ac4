//! The screening session aggregate and its reducer.
//!
//! All conversation behavior lives here as a reducer: the application
//! layer resolves external calls (extraction, question generation,
//! summary) and feeds their results in as [`SessionEvent`]s; `apply`
//! mutates the session and returns the [`SessionEffect`]s the caller must
//! execute next. Given the same session state and event, `apply` is
//! deterministic; no I/O happens inside.
//!
//! Events that do not belong to the current stage are absorbed without
//! effect, keeping the transition function total; handlers reject
//! out-of-stage requests before they reach the reducer when the user
//! should see an error instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, StateMachine, Timestamp};

use super::field::{parse_edit_target, FieldName};
use super::message::{Message, Role};
use super::profile::CandidateProfile;
use super::stage::Stage;
use super::validator;

/// Shown alongside the upload stage (the original's info banner).
pub const UPLOAD_NOTICE: &str =
    "To speed things up, you can upload your resume (PDF) to pre-fill your information.";

const PREFILL_NOTICE: &str = "I've pre-filled your information from the resume. \
     Please review it in the sidebar. I'll now ask for any missing details.";

const GENERATING_NOTICE: &str =
    "Excellent! Please give me a moment while I generate some technical questions.";

const EDIT_PROMPT: &str = "No problem. Which field would you like to correct?";

const CLOSING_MESSAGE: &str = "Here are your questions. This initial screening is now \
     complete. Thank you for your time!";

/// Appended in place of questions when generation fails, mirroring the
/// summary collaborator's fixed-fallback policy.
pub const QUESTIONS_FALLBACK: &str = "The question generation service failed due to a \
     potential API connection or quota issue. A recruiter will follow up with tailored \
     questions instead.";

/// Substituted when summary generation fails.
pub const SUMMARY_FALLBACK: &str = "The summary generation service failed due to a \
     potential API connection or quota issue.";

/// An input to the reducer. External call results arrive as events.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The user declined upload and chose manual entry.
    ManualEntryChosen,
    /// A document was read and its extraction merged (fill-if-absent).
    DocumentPrefilled { fields: BTreeMap<FieldName, String> },
    /// The document could not be read; surface it and stay in upload.
    DocumentRejected { reason: String },
    /// One chat message, with whatever the extraction collaborator found.
    UserMessage {
        text: String,
        extracted: BTreeMap<FieldName, String>,
    },
    /// Interview questions came back.
    QuestionsGenerated { questions: String },
    /// Question generation failed; fall back and finish anyway.
    QuestionsFailed,
    /// The recruiter summary came back.
    SummaryReady { summary: String },
    /// Global reset: any stage back to a pristine upload state.
    Reset,
}

/// External work the caller must perform after an `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    GenerateQuestions {
        experience_level: String,
        tech_stack: String,
    },
    GenerateSummary { profile: CandidateProfile },
}

/// One candidate's screening conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeSession {
    id: SessionId,
    stage: Stage,
    profile: CandidateProfile,
    current_field: Option<FieldName>,
    transcript: Vec<Message>,
    summary: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl IntakeSession {
    /// Creates a fresh session in the upload stage.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            id: SessionId::new(),
            stage: Stage::Upload,
            profile: CandidateProfile::new(),
            current_field: None,
            transcript: Vec::new(),
            summary: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn profile(&self) -> &CandidateProfile {
        &self.profile
    }

    /// The field currently being asked, while gathering.
    pub fn current_field(&self) -> Option<FieldName> {
        self.current_field
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Applies one event, returning the effects the caller must run.
    pub fn apply(&mut self, event: SessionEvent) -> Vec<SessionEffect> {
        self.updated_at = Timestamp::now();
        match event {
            SessionEvent::Reset => {
                self.reset();
                Vec::new()
            }
            SessionEvent::ManualEntryChosen => self.on_manual_entry(),
            SessionEvent::DocumentPrefilled { fields } => self.on_document_prefilled(fields),
            SessionEvent::DocumentRejected { reason } => self.on_document_rejected(reason),
            SessionEvent::UserMessage { text, extracted } => self.on_user_message(text, extracted),
            SessionEvent::QuestionsGenerated { questions } => self.on_questions(Some(questions)),
            SessionEvent::QuestionsFailed => self.on_questions(None),
            SessionEvent::SummaryReady { summary } => {
                // Runs at most once per session; later results are dropped.
                if self.summary.is_none() {
                    self.summary = Some(summary);
                }
                Vec::new()
            }
        }
    }

    fn reset(&mut self) {
        let id = self.id;
        let created_at = self.created_at;
        *self = Self::new();
        self.id = id;
        self.created_at = created_at;
    }

    fn on_manual_entry(&mut self) -> Vec<SessionEffect> {
        if self.stage != Stage::Upload {
            return Vec::new();
        }
        self.move_to(Stage::Gathering);
        self.advance_to_next_missing();
        Vec::new()
    }

    fn on_document_prefilled(&mut self, fields: BTreeMap<FieldName, String>) -> Vec<SessionEffect> {
        if self.stage != Stage::Upload {
            return Vec::new();
        }
        // Pre-fill is additive over absence only; typed answers win.
        self.profile.merge_if_absent(fields);
        self.push_assistant(PREFILL_NOTICE);
        self.move_to(Stage::Gathering);
        self.advance_to_next_missing();
        Vec::new()
    }

    fn on_document_rejected(&mut self, reason: String) -> Vec<SessionEffect> {
        if self.stage != Stage::Upload {
            return Vec::new();
        }
        self.push_assistant(format!(
            "Error reading PDF file: {reason}. You can try another document, or fill out \
             your details manually."
        ));
        Vec::new()
    }

    fn on_user_message(
        &mut self,
        text: String,
        extracted: BTreeMap<FieldName, String>,
    ) -> Vec<SessionEffect> {
        if self.stage == Stage::GeneratingQuestions {
            // Transient stage; the handler resolves it synchronously.
            return Vec::new();
        }
        self.push_user(&text);

        match self.stage {
            Stage::Gathering => {
                self.gather(text, extracted);
                Vec::new()
            }
            Stage::Confirming => self.confirm(&text),
            Stage::AwaitingEditTarget => {
                self.pick_edit_target(&text);
                Vec::new()
            }
            Stage::Upload => {
                self.push_assistant(
                    "Please upload your resume (PDF) to pre-fill your information, or \
                     choose manual entry to get started.",
                );
                Vec::new()
            }
            Stage::Finished => {
                self.push_assistant(
                    "This screening is complete. Start a new conversation to begin again.",
                );
                Vec::new()
            }
            Stage::GeneratingQuestions => unreachable!("handled above"),
        }
    }

    fn gather(&mut self, text: String, extracted: BTreeMap<FieldName, String>) {
        let expected = match self.current_field {
            Some(field) => field,
            // The pointer only clears outside gathering; recover by rescanning.
            None => match self.profile.first_missing() {
                Some(field) => field,
                None => {
                    self.enter_confirming();
                    return;
                }
            },
        };

        // Whole-message opportunistic extraction, not limited to the
        // field being asked.
        self.profile.merge_overwrite(extracted);

        // The literal text answers the literal question asked.
        if !self.profile.is_set(expected) {
            self.profile.set(expected, text);
        }

        match validator::validate(expected, self.profile.get(expected)) {
            Err(violation) => {
                self.profile.clear(expected);
                self.push_assistant(violation.message);
                // Explicit retry transition; the pointer stays on the
                // now-absent field.
                self.move_to(Stage::Gathering);
            }
            Ok(()) => self.advance_to_next_missing(),
        }
    }

    fn confirm(&mut self, text: &str) -> Vec<SessionEffect> {
        if text.to_lowercase().contains("yes") {
            self.move_to(Stage::GeneratingQuestions);
            self.push_assistant(GENERATING_NOTICE);
            let experience_level = self
                .profile
                .get(FieldName::YearsExperience)
                .unwrap_or("Mid-level")
                .to_string();
            let tech_stack = self
                .profile
                .get(FieldName::TechStack)
                .unwrap_or("general software")
                .to_string();
            vec![SessionEffect::GenerateQuestions {
                experience_level,
                tech_stack,
            }]
        } else {
            self.move_to(Stage::AwaitingEditTarget);
            self.push_assistant(EDIT_PROMPT);
            Vec::new()
        }
    }

    fn pick_edit_target(&mut self, text: &str) {
        match parse_edit_target(text) {
            Some(field) => {
                self.profile.clear(field);
                self.move_to(Stage::Gathering);
                // Registry-order rescan: normally lands on the cleared
                // field, but an earlier absent field would win.
                self.advance_to_next_missing();
            }
            None => {
                self.push_assistant(format!(
                    "I'm sorry, I don't recognize that field. Please choose from: {}",
                    FieldName::joined_names()
                ));
            }
        }
    }

    fn on_questions(&mut self, outcome: Option<String>) -> Vec<SessionEffect> {
        if self.stage != Stage::GeneratingQuestions {
            return Vec::new();
        }
        match outcome {
            Some(questions) => self.push_assistant(questions),
            None => self.push_assistant(QUESTIONS_FALLBACK),
        }
        self.push_assistant(CLOSING_MESSAGE);
        self.move_to(Stage::Finished);
        if self.summary.is_none() {
            vec![SessionEffect::GenerateSummary {
                profile: self.profile.clone(),
            }]
        } else {
            Vec::new()
        }
    }

    /// Scans the registry in order for the first absent field and prompts
    /// it; with none left, moves to confirmation.
    fn advance_to_next_missing(&mut self) {
        match self.profile.first_missing() {
            Some(field) => {
                self.current_field = Some(field);
                self.push_assistant(field.prompt());
            }
            None => self.enter_confirming(),
        }
    }

    fn enter_confirming(&mut self) {
        self.current_field = None;
        self.move_to(Stage::Confirming);
        self.push_assistant(self.render_confirmation());
    }

    fn render_confirmation(&self) -> String {
        let mut text =
            String::from("Great, I have all your details. Please review them carefully:\n\n");
        for (field, value) in self.profile.entries() {
            text.push_str(&format!("- **{}:** {}\n", field.display_name(), value));
        }
        text.push_str("\nIs all this information correct? (yes/no)");
        text
    }

    fn move_to(&mut self, target: Stage) {
        debug_assert!(
            self.stage.can_transition_to(&target),
            "invalid stage transition {:?} -> {:?}",
            self.stage,
            target
        );
        self.stage = target;
    }

    fn push_user(&mut self, content: &str) {
        if let Ok(message) = Message::new(Role::User, content) {
            self.transcript.push(message);
        }
    }

    fn push_assistant(&mut self, content: impl Into<String>) {
        if let Ok(message) = Message::new(Role::Assistant, content) {
            self.transcript.push(message);
        }
    }
}

impl Default for IntakeSession {
    fn default() -> Self {
        Self::new()
    }
}
