//! Chat-related domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to chat operations.
///
/// `MessageSent` is published *after* the message row is committed, so a
/// client that receives the broadcast and later queries history will always
/// find the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChatEvent {
    /// A message was persisted to a chat.
    MessageSent {
        /// The chat ID (also the room key).
        chat_id: Uuid,
        /// The message ID.
        message_id: Uuid,
        /// The sender's user ID.
        sender_id: Uuid,
        /// The sender's username.
        sender_name: String,
        /// Message body.
        content: String,
        /// Message this one replies to, if any.
        reply_to: Option<Uuid>,
        /// When the message was persisted.
        sent_at: DateTime<Utc>,
    },
    /// A message was edited by its sender.
    MessageEdited {
        /// The chat ID.
        chat_id: Uuid,
        /// The message ID.
        message_id: Uuid,
        /// New message body.
        content: String,
    },
    /// A message was soft-deleted.
    MessageDeleted {
        /// The chat ID.
        chat_id: Uuid,
        /// The message ID.
        message_id: Uuid,
    },
    /// A participant joined or was re-activated.
    ParticipantAdded {
        /// The chat ID.
        chat_id: Uuid,
        /// The added user's ID.
        user_id: Uuid,
        /// The added user's username.
        username: String,
    },
    /// A participant left or was removed.
    ParticipantRemoved {
        /// The chat ID.
        chat_id: Uuid,
        /// The removed user's ID.
        user_id: Uuid,
    },
}

impl ChatEvent {
    /// The chat this event belongs to.
    pub fn chat_id(&self) -> Uuid {
        match self {
            Self::MessageSent { chat_id, .. }
            | Self::MessageEdited { chat_id, .. }
            | Self::MessageDeleted { chat_id, .. }
            | Self::ParticipantAdded { chat_id, .. }
            | Self::ParticipantRemoved { chat_id, .. } => *chat_id,
        }
    }
}
