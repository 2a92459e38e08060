//! Room join authorization.
//!
//! A socket may only subscribe to a chat room if the user is an active
//! participant of that chat at join time. Membership is checked against the
//! database on every join rather than cached, so a removed participant cannot
//! rejoin through a stale socket.

use async_trait::async_trait;
use uuid::Uuid;

use eduverse_core::AppResult;
use eduverse_database::repositories::chat::ChatRepository;

/// Decides whether a user may subscribe to a chat room.
#[async_trait]
pub trait RoomAuthorizer: Send + Sync {
    /// Whether `user_id` may join the room for `chat_id`.
    async fn can_join(&self, user_id: Uuid, chat_id: Uuid) -> AppResult<bool>;
}

/// Authorizer backed by the chat participant table.
pub struct ParticipantGuard {
    chat_repo: ChatRepository,
}

impl ParticipantGuard {
    pub fn new(chat_repo: ChatRepository) -> Self {
        Self { chat_repo }
    }
}

#[async_trait]
impl RoomAuthorizer for ParticipantGuard {
    async fn can_join(&self, user_id: Uuid, chat_id: Uuid) -> AppResult<bool> {
        self.chat_repo.is_active_participant(chat_id, user_id).await
    }
}
