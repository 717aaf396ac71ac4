//! Candidate profile: collected field values for one session.
//!
//! A missing key is the absent-marker ("not yet collected") and is
//! distinct from a stored empty string. Keys are typed, so nothing outside
//! the registry can ever be stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::field::FieldName;

/// The mapping of registry field to collected value for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateProfile {
    values: BTreeMap<FieldName, String>,
}

impl CandidateProfile {
    /// Creates an empty profile (every field absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected value for a field, or None if absent.
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Returns true if the field has been collected (even as an empty string).
    pub fn is_set(&self, field: FieldName) -> bool {
        self.values.contains_key(&field)
    }

    /// Stores a value, overwriting any previous one.
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Resets a field to absent.
    pub fn clear(&mut self, field: FieldName) {
        self.values.remove(&field);
    }

    /// Overwrite-merge: every entry replaces whatever the profile held.
    ///
    /// Used for chat-turn extraction, where the user's latest message wins.
    pub fn merge_overwrite(&mut self, fields: BTreeMap<FieldName, String>) {
        for (field, value) in fields {
            self.values.insert(field, value);
        }
    }

    /// Fill-if-absent merge: entries only land on fields not yet collected.
    ///
    /// Used for document pre-fill, which is additive over absence only.
    pub fn merge_if_absent(&mut self, fields: BTreeMap<FieldName, String>) {
        for (field, value) in fields {
            self.values.entry(field).or_insert(value);
        }
    }

    /// First absent field in registry order, if any.
    pub fn first_missing(&self) -> Option<FieldName> {
        FieldName::ALL.into_iter().find(|f| !self.is_set(*f))
    }

    /// Number of collected fields.
    pub fn filled_count(&self) -> usize {
        self.values.len()
    }

    /// Total number of registry fields.
    pub fn total_count() -> usize {
        FieldName::ALL.len()
    }

    /// True once every registry field has been collected.
    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }

    /// Iterates collected entries in registry order.
    pub fn entries(&self) -> impl Iterator<Item = (FieldName, &str)> {
        FieldName::ALL
            .into_iter()
            .filter_map(move |f| self.get(f).map(|v| (f, v)))
    }
}
