use thiserror::Error;

/// A typed confirmation that does not match what the gate expects.
///
/// Surfaced inline next to the offending field; never propagated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("typed name does not match the entity name")]
    NameMismatch,

    #[error("typed phrase does not match the confirmation phrase")]
    PhraseMismatch,
}

/// The destructive action did not complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("destructive action failed: {0}")]
    Failed(String),

    #[error("destructive action panicked: {0}")]
    Panicked(String),

    #[error("destructive action was aborted: {0}")]
    Aborted(String),
}

impl ActionError {
    pub fn failed(reason: impl Into<String>) -> Self {
        ActionError::Failed(reason.into())
    }
}

/// A request the gate refuses to act on in its current state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionViolation {
    #[error("a destructive action is already in flight")]
    AlreadySubmitting,

    #[error("the confirmation gate is closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_error_display() {
        let e = ActionError::failed("restaurant not found");
        assert!(e.to_string().contains("restaurant not found"));
    }

    #[test]
    fn precondition_display() {
        let e = PreconditionViolation::AlreadySubmitting;
        assert!(e.to_string().contains("in flight"));
    }
}
