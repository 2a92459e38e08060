//! Chat message entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// How long a sender may edit their own message.
pub const EDIT_WINDOW_MINUTES: i64 = 5;

/// The kind of message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "message_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Ordinary user message.
    Text,
    /// Server-generated message (joins, leaves).
    System,
}

/// A persisted chat message.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: Uuid,
    /// The chat this message belongs to.
    pub chat_id: Uuid,
    /// The sending user.
    pub sender_id: Uuid,
    /// Message body.
    pub content: String,
    /// Message kind.
    pub message_type: MessageType,
    /// Message this one replies to, if any.
    pub reply_to_id: Option<Uuid>,
    /// Whether the sender has edited the message.
    pub is_edited: bool,
    /// Soft-delete flag; deleted messages stay in history.
    pub is_deleted: bool,
    /// Whether the message is pinned in the chat.
    pub is_pinned: bool,
    /// When the message was persisted.
    pub created_at: DateTime<Utc>,
    /// When the message was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Whether `user_id` may still edit this message.
    ///
    /// Only the sender, only within the edit window, and never once deleted.
    pub fn can_edit_at(&self, user_id: Uuid, now: DateTime<Utc>) -> bool {
        user_id == self.sender_id
            && !self.is_deleted
            && now - self.created_at < Duration::minutes(EDIT_WINDOW_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender: Uuid, age_minutes: i64, deleted: bool) -> ChatMessage {
        let created = Utc::now() - Duration::minutes(age_minutes);
        ChatMessage {
            id: Uuid::new_v4(),
            chat_id: Uuid::new_v4(),
            sender_id: sender,
            content: "hi".into(),
            message_type: MessageType::Text,
            reply_to_id: None,
            is_edited: false,
            is_deleted: deleted,
            is_pinned: false,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn edit_window_applies_to_sender_only() {
        let sender = Uuid::new_v4();
        let now = Utc::now();
        assert!(message(sender, 1, false).can_edit_at(sender, now));
        assert!(!message(sender, 1, false).can_edit_at(Uuid::new_v4(), now));
        assert!(!message(sender, 10, false).can_edit_at(sender, now));
        assert!(!message(sender, 1, true).can_edit_at(sender, now));
    }
}
