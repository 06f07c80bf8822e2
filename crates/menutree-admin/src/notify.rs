//! Terminal notification sink

use colored::Colorize;
use menutree_confirm::NotificationSink;
use menutree_types::{Notification, NotificationKind};
use tracing::{info, warn};

/// Prints notifications to the terminal, toast style, and logs them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    /// Line printed for a notification
    pub fn render(notification: &Notification) -> String {
        match notification.kind {
            NotificationKind::Success => format!("{} {}", "✓".green(), notification.message),
            NotificationKind::Error => {
                format!("{} {}", "✗".red(), notification.message.as_str().red())
            }
        }
    }
}

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!(message = %notification.message, "Notification"),
            NotificationKind::Error => warn!(message = %notification.message, "Notification"),
        }
        println!("{}", Self::render(&notification));
    }
}
