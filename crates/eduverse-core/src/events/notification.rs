//! Notification-related domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to notification delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NotificationEvent {
    /// A notification was persisted for a user.
    Created {
        /// The notification ID.
        notification_id: Uuid,
        /// The recipient's user ID.
        user_id: Uuid,
        /// Notification title.
        title: String,
        /// Notification body.
        message: String,
        /// Kind: info, warning, error, success.
        kind: String,
        /// When the notification was created.
        created_at: DateTime<Utc>,
    },
}
