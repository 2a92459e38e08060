//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Severity/kind of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Informational.
    #[default]
    Info,
    /// Warning.
    Warning,
    /// Error.
    Error,
    /// Success confirmation.
    Success,
}

impl NotificationKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

/// A per-user alert.
///
/// Expired notifications are filtered at read time; there is no background
/// sweeper.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient.
    pub user_id: Uuid,
    /// The user who triggered the notification, if any.
    pub sender_id: Option<Uuid>,
    /// The school context, if any.
    pub school_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Kind.
    pub kind: NotificationKind,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// When it was read.
    pub read_at: Option<DateTime<Utc>>,
    /// Whether it is flagged as important.
    pub is_important: bool,
    /// Whether it requires the recipient to act.
    pub requires_action: bool,
    /// Link to navigate to when acted on.
    pub action_url: Option<String>,
    /// Label for the action link.
    pub action_text: Option<String>,
    /// When the notification stops being shown.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Whether the notification has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    /// Whether the notification has expired as of the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Data for creating a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// The recipient.
    pub user_id: Uuid,
    /// The triggering user (optional).
    pub sender_id: Option<Uuid>,
    /// The school context (optional).
    pub school_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Kind.
    pub kind: NotificationKind,
    /// Important flag.
    pub is_important: bool,
    /// Requires-action flag.
    pub requires_action: bool,
    /// Action link (optional).
    pub action_url: Option<String>,
    /// Action label (optional).
    pub action_text: Option<String>,
    /// Expiry (optional).
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn notification(expires: Option<DateTime<Utc>>) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            sender_id: None,
            school_id: None,
            title: "t".into(),
            message: "m".into(),
            kind: NotificationKind::Info,
            is_read: false,
            read_at: None,
            is_important: false,
            requires_action: false,
            action_url: None,
            action_text: None,
            expires_at: expires,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn expiry_is_a_pure_function_of_expires_at() {
        let now = Utc::now();
        assert!(!notification(None).is_expired_at(now));
        assert!(!notification(Some(now + Duration::hours(1))).is_expired_at(now));
        assert!(notification(Some(now - Duration::hours(1))).is_expired_at(now));
    }
}
