//! The field registry: required candidate profile fields and their prompts.
//!
//! Variant order is significant: it is the default question sequence, and
//! every registry-order scan in the conversation flow follows it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A required candidate profile field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    FullName,
    Email,
    PhoneNumber,
    YearsExperience,
    DesiredPositions,
    CurrentLocation,
    TechStack,
}

impl FieldName {
    /// All registry fields, in question order.
    pub const ALL: [FieldName; 7] = [
        FieldName::FullName,
        FieldName::Email,
        FieldName::PhoneNumber,
        FieldName::YearsExperience,
        FieldName::DesiredPositions,
        FieldName::CurrentLocation,
        FieldName::TechStack,
    ];

    /// Fields a resume document is expected to yield.
    ///
    /// Experience level and desired positions are conversational answers,
    /// not things a parser can lift from a document reliably.
    pub const DOCUMENT_FIELDS: [FieldName; 5] = [
        FieldName::FullName,
        FieldName::Email,
        FieldName::PhoneNumber,
        FieldName::CurrentLocation,
        FieldName::TechStack,
    ];

    /// The question the assistant asks to collect this field.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::FullName => "To start, what is your full name?",
            Self::Email => "Thank you. What is your email address?",
            Self::PhoneNumber => "Got it. And what is your phone number?",
            Self::YearsExperience => {
                "Thanks. Which of these best describes your professional experience level? \
                 (e.g., 'Junior: 0-2 years', 'Mid-level: 2-5 years', 'Senior: 5+ years')"
            }
            Self::DesiredPositions => {
                "What position(s) are you looking for (e.g., AI Engineer, Frontend Developer)?"
            }
            Self::CurrentLocation => "And where are you currently located (City, Country)?",
            Self::TechStack => {
                "Finally, please list your primary tech stack (e.g., Python, React, AWS)."
            }
        }
    }

    /// Human-readable label, e.g. "Full Name".
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::PhoneNumber => "Phone Number",
            Self::YearsExperience => "Years Experience",
            Self::DesiredPositions => "Desired Positions",
            Self::CurrentLocation => "Current Location",
            Self::TechStack => "Tech Stack",
        }
    }

    /// Snake_case wire name, e.g. "full_name".
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::YearsExperience => "years_experience",
            Self::DesiredPositions => "desired_positions",
            Self::CurrentLocation => "current_location",
            Self::TechStack => "tech_stack",
        }
    }

    /// Comma-separated list of all wire names, for prompts and error messages.
    pub fn joined_names() -> String {
        Self::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_name" => Ok(Self::FullName),
            "email" => Ok(Self::Email),
            "phone_number" => Ok(Self::PhoneNumber),
            "years_experience" => Ok(Self::YearsExperience),
            "desired_positions" => Ok(Self::DesiredPositions),
            "current_location" => Ok(Self::CurrentLocation),
            "tech_stack" => Ok(Self::TechStack),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Error for a name that matches no registry field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

/// Resolves a user's free-text edit target against the registry.
///
/// Normalizes the way the user is likely to type a field name: trimmed,
/// lowercased, spaces replaced with underscores ("Phone Number" →
/// "phone_number").
pub fn parse_edit_target(input: &str) -> Option<FieldName> {
    let normalized = input.trim().to_lowercase().replace(' ', "_");
    normalized.parse().ok()
}
