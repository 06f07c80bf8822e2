use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use menutree_types::Notification;
use tokio::sync::Notify;

use crate::error::ActionError;
use crate::traits::{DestructiveAction, NotificationSink};

/// Notification sink that keeps everything it receives, for testing.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, in order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// How a [`ScriptedAction`] settles.
#[derive(Debug, Clone)]
enum Script {
    Settle(Result<(), ActionError>),
    Panic(String),
}

/// Destructive action with a fixed outcome, for testing.
///
/// Counts invocations. A held action waits for its release handle to be
/// notified before settling, which keeps it in flight for as long as a
/// test needs.
#[derive(Debug)]
pub struct ScriptedAction {
    script: Script,
    calls: AtomicUsize,
    release: Option<Arc<Notify>>,
}

impl ScriptedAction {
    /// An action that always succeeds.
    pub fn succeeding() -> Self {
        Self::scripted(Script::Settle(Ok(())))
    }

    /// An action that always fails with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::scripted(Script::Settle(Err(ActionError::failed(reason))))
    }

    /// An action that panics with the given message.
    pub fn panicking(message: impl Into<String>) -> Self {
        Self::scripted(Script::Panic(message.into()))
    }

    fn scripted(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            release: None,
        }
    }

    /// Hold every invocation until the returned handle is notified.
    pub fn held(mut self) -> (Self, Arc<Notify>) {
        let release = Arc::new(Notify::new());
        self.release = Some(release.clone());
        (self, release)
    }

    /// Number of times the action has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DestructiveAction for ScriptedAction {
    async fn execute(&self) -> Result<(), ActionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(release) = &self.release {
            release.notified().await;
        }
        match &self.script {
            Script::Settle(outcome) => outcome.clone(),
            Script::Panic(message) => panic!("{message}"),
        }
    }
}
