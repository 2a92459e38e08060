//! Chat entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The kind of chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "chat_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    /// Direct chat between two users.
    Private,
    /// Ad-hoc group chat.
    Group,
    /// Chat attached to a subject.
    Subject,
    /// Chat attached to a class group.
    Class,
    /// School administration channel.
    Administrative,
}

/// A chat room with durable participants and messages.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Chat {
    /// Unique chat identifier; also the live-channel room key.
    pub id: Uuid,
    /// Display name; unnamed chats fall back to their scope.
    pub name: Option<String>,
    /// The kind of chat.
    pub chat_type: ChatType,
    /// Free-form description.
    pub description: Option<String>,
    /// School scope (optional).
    pub school_id: Option<Uuid>,
    /// Subject scope (optional).
    pub subject_id: Option<Uuid>,
    /// Class-group scope (optional).
    pub class_group_id: Option<Uuid>,
    /// Whether the chat is open.
    pub is_active: bool,
    /// Whether the chat has been archived.
    pub is_archived: bool,
    /// Timestamp of the most recent message.
    pub last_message_at: Option<DateTime<Utc>>,
    /// When the chat was created.
    pub created_at: DateTime<Utc>,
    /// When the chat was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    /// Display name with a fallback for unnamed chats.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Chat #{}", self.id),
        }
    }
}

/// Data for creating a chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChat {
    /// Display name (optional).
    pub name: Option<String>,
    /// The kind of chat.
    pub chat_type: ChatType,
    /// Description (optional).
    pub description: Option<String>,
    /// School scope (optional).
    pub school_id: Option<Uuid>,
    /// Subject scope (optional).
    pub subject_id: Option<Uuid>,
    /// Class-group scope (optional).
    pub class_group_id: Option<Uuid>,
}
