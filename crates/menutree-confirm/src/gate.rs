use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use menutree_types::Notification;
use tracing::{debug, info, warn};

use crate::config::GateConfig;
use crate::error::{ActionError, PreconditionViolation};
use crate::state::{validate, ConfirmationState, FieldErrors};
use crate::traits::{DestructiveAction, NotificationSink};

/// Result of a [`GateHandle::submit`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The action succeeded; the gate is now closed and reset
    Confirmed,
    /// The action failed; the gate is open again with inputs kept
    Failed(ActionError),
    /// At least one confirmation did not match; the action was not invoked
    Rejected(FieldErrors),
    /// The gate could not accept a submission in its current state
    Ignored(PreconditionViolation),
}

impl SubmitOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SubmitOutcome::Confirmed)
    }
}

/// Result of a [`GateHandle::cancel`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The gate was open and is now closed
    Closed,
    /// The gate was already closed; nothing changed
    AlreadyClosed,
    /// An action is in flight; the gate stays open until it settles
    Busy,
}

/// Render-ready snapshot of a gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateView {
    pub entity_name: String,
    pub required_phrase: String,
    pub typed_name: String,
    pub typed_phrase: String,
    pub is_valid: bool,
    pub is_submitting: bool,
    pub is_open: bool,
    /// Message for the name field, shown once a submission has been rejected
    pub name_error: Option<String>,
    /// Message for the phrase field, shown once a submission has been rejected
    pub phrase_error: Option<String>,
}

impl GateView {
    /// Inputs and the cancel control are disabled while submitting.
    pub fn inputs_disabled(&self) -> bool {
        self.is_submitting || !self.is_open
    }
}

struct GateInner {
    state: ConfirmationState,
    open: bool,
    /// Set by a rejected submission; field errors are surfaced from then on
    show_errors: bool,
}

struct GateShared {
    inner: Mutex<GateInner>,
    action: Arc<dyn DestructiveAction>,
    notifier: Arc<dyn NotificationSink>,
    config: GateConfig,
}

impl GateShared {
    fn lock(&self) -> MutexGuard<'_, GateInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the action to completion and settle the gate.
    ///
    /// A panic inside the action is caught and treated as a failure so the
    /// submitting flag is always cleared.
    async fn run(self: Arc<Self>) -> SubmitOutcome {
        let result = AssertUnwindSafe(self.action.execute())
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(ActionError::Panicked(panic_message(&*panic))));
        self.settle(result)
    }

    fn settle(&self, result: Result<(), ActionError>) -> SubmitOutcome {
        let mut inner = self.lock();
        if !inner.state.is_submitting() {
            // The action ran and settled the gate, but its task died afterwards.
            let err = result
                .err()
                .unwrap_or_else(|| ActionError::Aborted("gate already settled".to_string()));
            return SubmitOutcome::Failed(err);
        }
        inner.state.set_submitting(false);
        let entity = inner.state.entity_name().to_string();

        match result {
            Ok(()) => {
                inner.state.reset_inputs();
                inner.open = false;
                inner.show_errors = false;
                drop(inner);

                info!(
                    entity = %entity,
                    kind = %self.config.entity_kind,
                    "Destructive action confirmed"
                );
                self.notifier
                    .notify(Notification::success(self.config.success_message()));
                SubmitOutcome::Confirmed
            }
            Err(err) => {
                drop(inner);

                warn!(
                    entity = %entity,
                    kind = %self.config.entity_kind,
                    error = %err,
                    "Destructive action failed; gate left open for retry"
                );
                self.notifier
                    .notify(Notification::error(self.config.failure_message()));
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn view(&self) -> GateView {
        let inner = self.lock();
        let errors = validate(&inner.state);
        let show = inner.show_errors;
        GateView {
            entity_name: inner.state.entity_name().to_string(),
            required_phrase: inner.state.required_phrase().to_string(),
            typed_name: inner.state.typed_name().to_string(),
            typed_phrase: inner.state.typed_phrase().to_string(),
            is_valid: errors.is_empty(),
            is_submitting: inner.state.is_submitting(),
            is_open: inner.open,
            name_error: (show && errors.name.is_some())
                .then(|| self.config.name_mismatch_message()),
            phrase_error: (show && errors.phrase.is_some())
                .then(|| self.config.phrase_mismatch_message()),
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Entry point for creating confirmation gates.
pub struct ConfirmationGate;

impl ConfirmationGate {
    /// Open a fresh gate for `entity_name`.
    ///
    /// The entity name is fixed for the lifetime of the returned handle.
    pub fn open(
        entity_name: impl Into<String>,
        action: Arc<dyn DestructiveAction>,
        notifier: Arc<dyn NotificationSink>,
        config: GateConfig,
    ) -> GateHandle {
        let state = ConfirmationState::new(entity_name, &config.required_phrase());

        info!(
            entity = %state.entity_name(),
            kind = %config.entity_kind,
            "Confirmation gate opened"
        );

        GateHandle {
            shared: Arc::new(GateShared {
                inner: Mutex::new(GateInner {
                    state,
                    open: true,
                    show_errors: false,
                }),
                action,
                notifier,
                config,
            }),
        }
    }
}

/// Handle to one open confirmation gate.
///
/// Cheap to clone; clones drive the same gate, which is how concurrent
/// submissions (double clicks) are observed and suppressed.
#[derive(Clone)]
pub struct GateHandle {
    shared: Arc<GateShared>,
}

impl GateHandle {
    /// Replace the typed name. Ignored while submitting or closed.
    pub fn update_typed_name(&self, value: impl Into<String>) -> bool {
        let mut inner = self.shared.lock();
        if !inner.open || inner.state.is_submitting() {
            return false;
        }
        inner.state.set_typed_name(value);
        true
    }

    /// Replace the typed phrase. Ignored while submitting or closed.
    pub fn update_typed_phrase(&self, value: impl Into<String>) -> bool {
        let mut inner = self.shared.lock();
        if !inner.open || inner.state.is_submitting() {
            return false;
        }
        inner.state.set_typed_phrase(value);
        true
    }

    /// Submit the confirmation.
    ///
    /// Invokes the action exactly once when both confirmations match and no
    /// other action is in flight. The action runs on the tokio runtime and
    /// settles the gate even if this future is dropped before it completes.
    pub async fn submit(&self) -> SubmitOutcome {
        {
            let mut inner = self.shared.lock();
            if !inner.open {
                debug!("Submit ignored: gate closed");
                return SubmitOutcome::Ignored(PreconditionViolation::Closed);
            }
            if inner.state.is_submitting() {
                debug!("Submit ignored: action already in flight");
                return SubmitOutcome::Ignored(PreconditionViolation::AlreadySubmitting);
            }

            let errors = validate(&inner.state);
            if !errors.is_empty() {
                inner.show_errors = true;
                debug!(
                    name_ok = errors.name.is_none(),
                    phrase_ok = errors.phrase.is_none(),
                    "Submit rejected: confirmation mismatch"
                );
                return SubmitOutcome::Rejected(errors);
            }

            inner.state.set_submitting(true);
            info!(entity = %inner.state.entity_name(), "Destructive action submitted");
        }

        let task = tokio::spawn(Arc::clone(&self.shared).run());
        match task.await {
            Ok(outcome) => outcome,
            Err(join_err) => self
                .shared
                .settle(Err(ActionError::Aborted(join_err.to_string()))),
        }
    }

    /// Close the gate and discard typed input.
    ///
    /// Refused while an action is in flight; a no-op on a closed gate.
    pub fn cancel(&self) -> CancelOutcome {
        let mut inner = self.shared.lock();
        if !inner.open {
            return CancelOutcome::AlreadyClosed;
        }
        if inner.state.is_submitting() {
            debug!("Cancel refused: action in flight");
            return CancelOutcome::Busy;
        }
        inner.state.reset_inputs();
        inner.open = false;
        inner.show_errors = false;
        debug!(entity = %inner.state.entity_name(), "Confirmation gate cancelled");
        CancelOutcome::Closed
    }

    /// Reopen a closed gate with empty inputs. Returns false if already open.
    pub fn reopen(&self) -> bool {
        let mut inner = self.shared.lock();
        if inner.open {
            return false;
        }
        inner.state.reset_inputs();
        inner.open = true;
        inner.show_errors = false;
        debug!(entity = %inner.state.entity_name(), "Confirmation gate reopened");
        true
    }

    pub fn view(&self) -> GateView {
        self.shared.view()
    }

    /// Copy of the current input state.
    pub fn state(&self) -> ConfirmationState {
        self.shared.lock().state.clone()
    }

    pub fn is_open(&self) -> bool {
        self.shared.lock().open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::mocks::{RecordingNotifier, ScriptedAction};
    use menutree_types::NotificationKind;

    const NAME: &str = "Joe's Diner";
    const PHRASE: &str = "delete my restaurant";

    fn setup(action: ScriptedAction) -> (GateHandle, Arc<ScriptedAction>, Arc<RecordingNotifier>) {
        let action = Arc::new(action);
        let notifier = Arc::new(RecordingNotifier::new());
        let gate = ConfirmationGate::open(
            NAME,
            action.clone(),
            notifier.clone(),
            GateConfig::default(),
        );
        (gate, action, notifier)
    }

    fn fill_valid(gate: &GateHandle) {
        assert!(gate.update_typed_name(NAME));
        assert!(gate.update_typed_phrase(PHRASE));
    }

    async fn wait_until_submitting(gate: &GateHandle) {
        while !gate.view().is_submitting {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn opens_with_empty_inputs() {
        let (gate, _, _) = setup(ScriptedAction::succeeding());
        let view = gate.view();
        assert!(view.is_open);
        assert!(!view.is_valid);
        assert!(!view.is_submitting);
        assert_eq!(view.typed_name, "");
        assert_eq!(view.typed_phrase, "");
        assert_eq!(view.required_phrase, PHRASE);
        assert!(view.name_error.is_none());
    }

    #[tokio::test]
    async fn submit_while_invalid_never_invokes_action() {
        let (gate, action, notifier) = setup(ScriptedAction::succeeding());
        gate.update_typed_name("Joe's diner");
        gate.update_typed_phrase(PHRASE);

        let outcome = gate.submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(FieldErrors {
                name: Some(ValidationError::NameMismatch),
                phrase: None,
            })
        );
        assert_eq!(action.calls(), 0);
        assert!(notifier.notifications().is_empty());

        let view = gate.view();
        assert_eq!(
            view.name_error.as_deref(),
            Some("Please confirm that you are typing the restaurant name correctly!")
        );
        assert!(view.phrase_error.is_none());
    }

    #[tokio::test]
    async fn errors_track_edits_after_rejection() {
        let (gate, _, _) = setup(ScriptedAction::succeeding());
        gate.submit().await;
        assert!(gate.view().phrase_error.is_some());

        gate.update_typed_phrase("DELETE MY RESTAURANT");
        assert!(gate.view().phrase_error.is_none());
        assert!(gate.view().name_error.is_some());
    }

    #[tokio::test]
    async fn successful_submit_notifies_closes_and_resets() {
        let (gate, action, notifier) = setup(ScriptedAction::succeeding());
        fill_valid(&gate);
        assert!(gate.view().is_valid);

        let outcome = gate.submit().await;
        assert_eq!(outcome, SubmitOutcome::Confirmed);
        assert_eq!(action.calls(), 1);

        let view = gate.view();
        assert!(!view.is_open);
        assert!(!view.is_submitting);
        assert_eq!(view.typed_name, "");
        assert_eq!(view.typed_phrase, "");
        assert_eq!(
            notifier.notifications(),
            vec![Notification::success("Restaurant deleted successfully")]
        );
    }

    #[tokio::test]
    async fn failed_submit_keeps_inputs_for_retry() {
        let (gate, action, notifier) = setup(ScriptedAction::failing("database unavailable"));
        fill_valid(&gate);

        let outcome = gate.submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed(ActionError::failed("database unavailable"))
        );

        let view = gate.view();
        assert!(view.is_open);
        assert!(!view.is_submitting);
        assert_eq!(view.typed_name, NAME);
        assert_eq!(view.typed_phrase, PHRASE);

        let sent = notifier.notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::Error);
        assert_eq!(sent[0].message, "Failed to delete restaurant");

        // Retry without retyping.
        assert_eq!(
            gate.submit().await,
            SubmitOutcome::Failed(ActionError::failed("database unavailable"))
        );
        assert_eq!(action.calls(), 2);
    }

    #[tokio::test]
    async fn double_submit_invokes_action_once() {
        let (action, release) = ScriptedAction::succeeding().held();
        let (gate, action, _) = setup(action);
        fill_valid(&gate);

        let first = tokio::spawn({
            let gate = gate.clone();
            async move { gate.submit().await }
        });
        wait_until_submitting(&gate).await;

        assert_eq!(
            gate.submit().await,
            SubmitOutcome::Ignored(PreconditionViolation::AlreadySubmitting)
        );

        release.notify_one();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Confirmed);
        assert_eq!(action.calls(), 1);
    }

    #[tokio::test]
    async fn inputs_and_cancel_are_frozen_while_submitting() {
        let (action, release) = ScriptedAction::failing("boom").held();
        let (gate, _, _) = setup(action);
        fill_valid(&gate);

        let pending = tokio::spawn({
            let gate = gate.clone();
            async move { gate.submit().await }
        });
        wait_until_submitting(&gate).await;

        assert!(gate.view().inputs_disabled());
        assert!(!gate.update_typed_name("something else"));
        assert!(!gate.update_typed_phrase("nope"));
        assert_eq!(gate.cancel(), CancelOutcome::Busy);

        release.notify_one();
        assert!(matches!(pending.await.unwrap(), SubmitOutcome::Failed(_)));
        assert_eq!(gate.view().typed_name, NAME);
        assert_eq!(gate.cancel(), CancelOutcome::Closed);
    }

    #[tokio::test]
    async fn action_completes_after_submit_future_is_dropped() {
        let (action, release) = ScriptedAction::succeeding().held();
        let (gate, action, notifier) = setup(action);
        fill_valid(&gate);

        let pending = tokio::spawn({
            let gate = gate.clone();
            async move { gate.submit().await }
        });
        wait_until_submitting(&gate).await;
        pending.abort();
        let _ = pending.await;

        release.notify_one();
        while gate.view().is_submitting {
            tokio::task::yield_now().await;
        }

        assert_eq!(action.calls(), 1);
        assert!(!gate.is_open());
        assert_eq!(notifier.notifications().len(), 1);
    }

    #[tokio::test]
    async fn panicking_action_is_reported_as_failure() {
        let (gate, action, notifier) = setup(ScriptedAction::panicking("connection reset"));
        fill_valid(&gate);

        let outcome = gate.submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed(ActionError::Panicked("connection reset".into()))
        );
        assert!(!gate.view().is_submitting);
        assert!(gate.is_open());
        assert!(!notifier.notifications()[0].is_success());
        assert_eq!(action.calls(), 1);
    }

    struct CrashingNotifier;

    impl NotificationSink for CrashingNotifier {
        fn notify(&self, _notification: Notification) {
            panic!("sink crashed");
        }
    }

    #[tokio::test]
    async fn crash_after_settling_reports_aborted_failure() {
        let action = Arc::new(ScriptedAction::succeeding());
        let gate = ConfirmationGate::open(
            NAME,
            action.clone(),
            Arc::new(CrashingNotifier),
            GateConfig::default(),
        );
        fill_valid(&gate);

        let outcome = gate.submit().await;
        assert!(
            matches!(outcome, SubmitOutcome::Failed(ActionError::Aborted(_))),
            "unexpected outcome: {outcome:?}"
        );
        assert_eq!(action.calls(), 1);
        assert!(!gate.view().is_submitting);
        assert!(!gate.is_open());
    }

    #[tokio::test]
    async fn repeated_cancel_is_a_noop() {
        let (gate, action, notifier) = setup(ScriptedAction::succeeding());
        gate.update_typed_name("Joe");

        assert_eq!(gate.cancel(), CancelOutcome::Closed);
        assert_eq!(gate.cancel(), CancelOutcome::AlreadyClosed);
        assert_eq!(gate.cancel(), CancelOutcome::AlreadyClosed);

        assert_eq!(gate.view().typed_name, "");
        assert_eq!(action.calls(), 0);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn closed_gate_ignores_input_and_submit() {
        let (gate, action, _) = setup(ScriptedAction::succeeding());
        gate.cancel();

        assert!(!gate.update_typed_name(NAME));
        assert_eq!(
            gate.submit().await,
            SubmitOutcome::Ignored(PreconditionViolation::Closed)
        );
        assert_eq!(action.calls(), 0);
    }

    #[tokio::test]
    async fn reopen_resets_inputs() {
        let (gate, _, _) = setup(ScriptedAction::succeeding());
        gate.update_typed_name("Joe");
        assert!(!gate.reopen());

        gate.cancel();
        assert!(gate.reopen());
        let view = gate.view();
        assert!(view.is_open);
        assert_eq!(view.typed_name, "");
        assert_eq!(view.entity_name, NAME);
    }
}
