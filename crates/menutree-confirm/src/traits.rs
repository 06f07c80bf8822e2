use std::future::Future;

use async_trait::async_trait;
use menutree_types::Notification;
use tokio::sync::mpsc;

use crate::error::ActionError;

/// The irreversible operation a gate protects.
///
/// Invoked with no arguments once both confirmations match. Any
/// `Fn() -> impl Future<Output = Result<(), ActionError>>` closure
/// implements this trait.
#[async_trait]
pub trait DestructiveAction: Send + Sync {
    async fn execute(&self) -> Result<(), ActionError>;
}

#[async_trait]
impl<F, Fut> DestructiveAction for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), ActionError>> + Send,
{
    async fn execute(&self) -> Result<(), ActionError> {
        (self)().await
    }
}

/// Where the gate reports how an action settled.
///
/// Called outside the gate's lock, so implementations may read the gate.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl NotificationSink for mpsc::UnboundedSender<Notification> {
    fn notify(&self, notification: Notification) {
        // A dropped receiver means nobody is listening anymore.
        let _ = self.send(notification);
    }
}
