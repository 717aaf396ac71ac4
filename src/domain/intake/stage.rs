//! Conversation stage state machine.
//!
//! Exactly one stage is active at a time. The validation-retry loop is an
//! explicit `Gathering -> Gathering` transition rather than a side effect
//! of re-scanning for the same absent field. The global reset event is
//! handled outside this table: any stage may reset to `Upload`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The stage of a screening conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Offering resume upload or manual entry.
    #[default]
    Upload,

    /// Walking the field registry, one question at a time.
    Gathering,

    /// All fields collected; awaiting the yes/no confirmation.
    Confirming,

    /// The user declined confirmation; awaiting which field to correct.
    AwaitingEditTarget,

    /// Confirmed; interview questions are being generated.
    GeneratingQuestions,

    /// Terminal. Questions delivered, summary produced.
    Finished,
}

impl Stage {
    /// Returns true if free-text chat input drives this stage.
    pub fn accepts_user_input(&self) -> bool {
        matches!(
            self,
            Self::Gathering | Self::Confirming | Self::AwaitingEditTarget
        )
    }

    /// Returns true while field collection is still underway (the stages
    /// the original UI showed a progress bar for).
    pub fn shows_progress(&self) -> bool {
        matches!(
            self,
            Self::Gathering | Self::Confirming | Self::AwaitingEditTarget
        )
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upload => "Upload",
            Self::Gathering => "Gathering",
            Self::Confirming => "Confirming",
            Self::AwaitingEditTarget => "Awaiting Edit Target",
            Self::GeneratingQuestions => "Generating Questions",
            Self::Finished => "Finished",
        }
    }
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            // Manual entry chosen or document merged
            (Upload, Gathering) |
            // Validation failure re-prompts the same field
            (Gathering, Gathering) |
            // Last field validated
            (Gathering, Confirming) |
            // "yes"
            (Confirming, GeneratingQuestions) |
            // Anything else
            (Confirming, AwaitingEditTarget) |
            // Named field cleared, back to questioning
            (AwaitingEditTarget, Gathering) |
            // Questions delivered
            (GeneratingQuestions, Finished)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Stage::*;
        match self {
            Upload => vec![Gathering],
            Gathering => vec![Gathering, Confirming],
            Confirming => vec![GeneratingQuestions, AwaitingEditTarget],
            AwaitingEditTarget => vec![Gathering],
            GeneratingQuestions => vec![Finished],
            Finished => vec![],
        }
    }
}
