
use crate::error::ValidationError;

/// Normalize a confirmation phrase for comparison.
///
/// Only case is folded. Whitespace is significant, so `" delete my restaurant"`
/// does not match.
pub fn normalize_phrase(phrase: &str) -> String {
    phrase.to_lowercase()
}

/// Input and submission state of one confirmation gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationState {
    entity_name: String,
    typed_name: String,
    typed_phrase: String,
    required_phrase: String,
    is_submitting: bool,
}

impl ConfirmationState {
    /// Fresh state with empty inputs.
    ///
    /// `required_phrase` is normalized here so comparisons only need to
    /// normalize the typed side.
    pub fn new(entity_name: impl Into<String>, required_phrase: &str) -> Self {
        Self {
            entity_name: entity_name.into(),
            typed_name: String::new(),
            typed_phrase: String::new(),
            required_phrase: normalize_phrase(required_phrase),
            is_submitting: false,
        }
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn typed_name(&self) -> &str {
        &self.typed_name
    }

    pub fn typed_phrase(&self) -> &str {
        &self.typed_phrase
    }

    pub fn required_phrase(&self) -> &str {
        &self.required_phrase
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn name_matches(&self) -> bool {
        self.typed_name == self.entity_name
    }

    pub fn phrase_matches(&self) -> bool {
        normalize_phrase(&self.typed_phrase) == self.required_phrase
    }

    pub fn is_valid(&self) -> bool {
        self.name_matches() && self.phrase_matches()
    }

    pub fn set_typed_name(&mut self, value: impl Into<String>) {
        self.typed_name = value.into();
    }

    pub fn set_typed_phrase(&mut self, value: impl Into<String>) {
        self.typed_phrase = value.into();
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
    }

    /// Clear both inputs. The entity name and phrase stay fixed.
    pub fn reset_inputs(&mut self) {
        self.typed_name.clear();
        self.typed_phrase.clear();
    }
}

/// Per-field validation result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<ValidationError>,
    pub phrase: Option<ValidationError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phrase.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = ValidationError> + '_ {
        self.name.iter().chain(self.phrase.iter()).copied()
    }
}

/// Validate both typed confirmations against the state.
pub fn validate(state: &ConfirmationState) -> FieldErrors {
    FieldErrors {
        name: (!state.name_matches()).then_some(ValidationError::NameMismatch),
        phrase: (!state.phrase_matches()).then_some(ValidationError::PhraseMismatch),
    }
}
