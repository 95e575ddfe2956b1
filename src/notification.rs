//! Transient notifications
//!
//! Messages raised by services (a failed submission, a finished setup) are
//! queued here and printed by the CLI.

use std::fmt;

/// Type of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    /// Get the icon/prefix for this notification type
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "+",
            Self::Warning => "!",
            Self::Error => "x",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// A transient notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
}

impl Notification {
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    pub fn is_error(&self) -> bool {
        self.notification_type == NotificationType::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.notification_type.icon(),
            self.notification_type.title(),
            self.message
        )
    }
}

/// A queue of notifications to display
#[derive(Debug, Default)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        match notification.notification_type {
            NotificationType::Error => {
                tracing::warn!(message = %notification.message, "error notification")
            }
            _ => tracing::debug!(message = %notification.message, "notification"),
        }
        self.notifications.push(notification);
    }

    /// Take every queued notification, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let n = Notification::info("Test message");
        assert_eq!(n.message, "Test message");
        assert_eq!(n.notification_type, NotificationType::Info);
        assert!(!n.is_error());
    }

    #[test]
    fn test_display_includes_icon_and_title() {
        let n = Notification::error("must select at least one account");
        assert_eq!(n.to_string(), "[x] Error: must select at least one account");
    }

    #[test]
    fn test_notification_queue_drain() {
        let mut queue = NotificationQueue::new();
        assert!(queue.drain().is_empty());

        queue.push(Notification::info("First"));
        queue.push(Notification::success("Second"));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "First");
        assert_eq!(drained[1].notification_type, NotificationType::Success);
        assert!(queue.drain().is_empty());
    }
}
