use serde::{Deserialize, Serialize};

use crate::state::normalize_phrase;

/// Configuration for a confirmation gate.
///
/// The entity kind drives both the default confirmation phrase and the
/// user-facing messages, so a gate for restaurants asks for
/// `delete my restaurant` and reports "Restaurant deleted successfully".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Kind of entity being destroyed (default: "restaurant")
    pub entity_kind: String,
    /// Explicit confirmation phrase; `None` means `delete my <entity_kind>`
    pub required_phrase: Option<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            entity_kind: "restaurant".into(),
            required_phrase: None,
        }
    }
}

impl GateConfig {
    pub fn for_kind(entity_kind: impl Into<String>) -> Self {
        Self {
            entity_kind: entity_kind.into(),
            required_phrase: None,
        }
    }

    pub fn with_required_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.required_phrase = Some(phrase.into());
        self
    }

    /// The phrase the user must type, already normalized for comparison.
    pub fn required_phrase(&self) -> String {
        match &self.required_phrase {
            Some(phrase) => normalize_phrase(phrase),
            None => normalize_phrase(&format!("delete my {}", self.entity_kind)),
        }
    }

    pub fn name_mismatch_message(&self) -> String {
        format!(
            "Please confirm that you are typing the {} name correctly!",
            self.entity_kind
        )
    }

    pub fn phrase_mismatch_message(&self) -> String {
        format!(
            "Please confirm that you want to delete your {}!",
            self.entity_kind
        )
    }

    pub fn success_message(&self) -> String {
        format!("{} deleted successfully", capitalize(&self.entity_kind))
    }

    pub fn failure_message(&self) -> String {
        format!("Failed to delete {}", self.entity_kind)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
