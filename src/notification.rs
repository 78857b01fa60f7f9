//! Non-fatal diagnostics collected while reading, etching or writing.
//!
//! Issues that should not abort a run (an entity type the reader keeps as raw
//! code pairs, a degenerate bend line, a section recovered in failsafe mode)
//! are recorded as [`Notification`] items on the document instead of being
//! dropped or turned into hard errors.

use std::fmt;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Data was carried through untouched because it is not modeled.
    Passthrough,
    /// Something was skipped (e.g. a zero-length bend line).
    Skipped,
    /// Non-fatal warning (e.g. missing handle, duplicate layer).
    Warning,
    /// Error that was recovered from (e.g. bad group code value).
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passthrough => write!(f, "Passthrough"),
            Self::Skipped => write!(f, "Skipped"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub notification_type: NotificationType,
    /// A human-readable description of the issue.
    pub message: String,
}

impl Notification {
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Ordered list of notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification and mirror it to the log.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        let notification = Notification::new(notification_type, message);
        match notification_type {
            NotificationType::Error | NotificationType::Warning => log::warn!("{}", notification),
            NotificationType::Skipped => log::info!("{}", notification),
            NotificationType::Passthrough => log::debug!("{}", notification),
        }
        self.items.push(notification);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// Consume the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_basics() {
        let mut c = NotificationCollection::new();
        assert!(c.is_empty());

        c.notify(NotificationType::Skipped, "zero-length bend line 2F");
        c.notify(NotificationType::Error, "bad value for code 10");
        c.notify(NotificationType::Skipped, "zero-length bend line 30");

        assert_eq!(c.len(), 3);
        assert_eq!(c.of_type(NotificationType::Skipped).len(), 2);
        assert!(c.has_type(NotificationType::Error));
        assert!(!c.has_type(NotificationType::Passthrough));
    }

    #[test]
    fn test_iteration_keeps_order() {
        let mut c = NotificationCollection::new();
        c.notify(NotificationType::Warning, "first");
        c.notify(NotificationType::Passthrough, "second");

        let messages: Vec<&str> = (&c).into_iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
        assert_eq!(c.into_vec().len(), 2);
    }

    #[test]
    fn test_display() {
        let n = Notification::new(NotificationType::Passthrough, "HATCH kept as raw pairs");
        assert_eq!(format!("{}", n), "[Passthrough] HATCH kept as raw pairs");
    }
}
