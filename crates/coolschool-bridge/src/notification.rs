use std::fmt;
use std::time::Duration;

/// Category of a user-visible notification.
///
/// This enum classifies notifications by their intent and visual styling,
/// allowing the UI to display them appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationKind {
    /// An operation failed unexpectedly (network error, server rejection).
    /// Used when the producer does not specify a kind.
    #[default]
    Exception,
    /// User input did not satisfy a declared rule.
    Validation,
    /// Neutral informational message that does not indicate success or failure.
    Info,
    /// Indicates a successful operation or positive outcome.
    Success,
}

/// Opaque, unique token identifying a single notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationId(String);

impl NotificationId {
    /// Generates a fresh id of the form `error-<uuid>`.
    pub fn generate() -> Self {
        Self(format!("error-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NotificationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A notification payload intended for the user interface. Entries are never
/// mutated once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    /// The text content to display to the user.
    pub message: String,
    /// The category of the notification, determining its visual style.
    pub kind: NotificationKind,
    /// Lifetime after which the entry is removed automatically.
    pub expires_after: Duration,
}
