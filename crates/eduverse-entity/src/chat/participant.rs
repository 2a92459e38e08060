//! Chat participant entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The role a participant holds inside a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "participant_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    /// Ordinary participant.
    Member,
    /// May add and remove participants.
    Moderator,
    /// Full control over the chat.
    Admin,
}

impl ParticipantRole {
    /// Whether this role may manage the participant list.
    pub fn can_manage_participants(&self) -> bool {
        matches!(self, Self::Admin | Self::Moderator)
    }
}

/// A user's durable membership in a chat.
///
/// One row per (chat, user); removal deactivates the row, re-adding
/// reactivates it with a fresh `joined_at` and cleared `last_read_at`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatParticipant {
    /// Unique participant identifier.
    pub id: Uuid,
    /// The member user.
    pub user_id: Uuid,
    /// The chat.
    pub chat_id: Uuid,
    /// Role inside the chat.
    pub role: ParticipantRole,
    /// Whether the membership is current.
    pub is_active: bool,
    /// When the user joined (or last rejoined).
    pub joined_at: DateTime<Utc>,
    /// When the user left, if they have.
    pub left_at: Option<DateTime<Utc>>,
    /// Whether the user receives notifications for this chat.
    pub notifications_enabled: bool,
    /// High-water mark for read messages; NULL means nothing read yet.
    pub last_read_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_and_moderator_manage_participants() {
        assert!(ParticipantRole::Admin.can_manage_participants());
        assert!(ParticipantRole::Moderator.can_manage_participants());
        assert!(!ParticipantRole::Member.can_manage_participants());
    }
}
