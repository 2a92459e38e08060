//! Chat repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use eduverse_core::error::{AppError, ErrorKind};
use eduverse_core::result::AppResult;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_entity::chat::message::{ChatMessage, MessageType};
use eduverse_entity::chat::model::{Chat, CreateChat};
use eduverse_entity::chat::participant::{ChatParticipant, ParticipantRole};

/// Repository for chats, participants, and messages.
#[derive(Debug, Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    /// Create a new chat repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a chat by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Chat>> {
        sqlx::query_as::<_, Chat>("SELECT * FROM chats WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find chat", e))
    }

    /// List the chats a user actively participates in, most recently
    /// active first.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Chat>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM chats c \
             JOIN chat_participants cp ON cp.chat_id = c.id \
             WHERE cp.user_id = $1 AND cp.is_active AND c.is_active",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count chats", e))?;

        let chats = sqlx::query_as::<_, Chat>(
            "SELECT c.* FROM chats c \
             JOIN chat_participants cp ON cp.chat_id = c.id \
             WHERE cp.user_id = $1 AND cp.is_active AND c.is_active \
             ORDER BY c.last_message_at DESC NULLS LAST, c.created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list chats", e))?;

        Ok(PageResponse::new(
            chats,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Find an existing private chat between two users, if any.
    pub async fn find_private_between(&self, a: Uuid, b: Uuid) -> AppResult<Option<Chat>> {
        sqlx::query_as::<_, Chat>(
            "SELECT c.* FROM chats c \
             WHERE c.chat_type = 'private' AND c.is_active \
               AND EXISTS (SELECT 1 FROM chat_participants WHERE chat_id = c.id AND user_id = $1) \
               AND EXISTS (SELECT 1 FROM chat_participants WHERE chat_id = c.id AND user_id = $2) \
             LIMIT 1",
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find private chat", e)
        })
    }

    /// Create a chat with its initial participant set, atomically.
    ///
    /// The creator is added as `admin`; everyone else as `member`.
    pub async fn create_with_participants(
        &self,
        data: &CreateChat,
        creator_id: Uuid,
        member_ids: &[Uuid],
    ) -> AppResult<Chat> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let chat = sqlx::query_as::<_, Chat>(
            "INSERT INTO chats (name, chat_type, description, school_id, subject_id, class_group_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(data.chat_type)
        .bind(&data.description)
        .bind(data.school_id)
        .bind(data.subject_id)
        .bind(data.class_group_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create chat", e))?;

        sqlx::query("INSERT INTO chat_participants (user_id, chat_id, role) VALUES ($1, $2, $3)")
            .bind(creator_id)
            .bind(chat.id)
            .bind(ParticipantRole::Admin)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to add chat creator", e)
            })?;

        for member_id in member_ids {
            if *member_id == creator_id {
                continue;
            }
            sqlx::query(
                "INSERT INTO chat_participants (user_id, chat_id, role) VALUES ($1, $2, $3) \
                 ON CONFLICT (chat_id, user_id) DO NOTHING",
            )
            .bind(member_id)
            .bind(chat.id)
            .bind(ParticipantRole::Member)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to add chat participant", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit chat creation", e)
        })?;

        Ok(chat)
    }

    /// Find a participant row, active or not.
    pub async fn find_participant(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<ChatParticipant>> {
        sqlx::query_as::<_, ChatParticipant>(
            "SELECT * FROM chat_participants WHERE chat_id = $1 AND user_id = $2",
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find participant", e))
    }

    /// Whether a user is an active participant of a chat.
    pub async fn is_active_participant(&self, chat_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM chat_participants \
             WHERE chat_id = $1 AND user_id = $2 AND is_active",
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check participation", e)
        })?;
        Ok(count > 0)
    }

    /// List the active participants of a chat.
    pub async fn participants(&self, chat_id: Uuid) -> AppResult<Vec<ChatParticipant>> {
        sqlx::query_as::<_, ChatParticipant>(
            "SELECT * FROM chat_participants WHERE chat_id = $1 AND is_active \
             ORDER BY joined_at ASC",
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list participants", e))
    }

    /// List the user ids of a chat's active participants.
    pub async fn participant_ids(&self, chat_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar(
            "SELECT user_id FROM chat_participants WHERE chat_id = $1 AND is_active",
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list participant ids", e)
        })
    }

    /// Add a participant, reactivating a previously removed membership.
    ///
    /// Reactivation clears `last_read_at` so history accumulated while the
    /// user was out counts as unread.
    pub async fn add_participant(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
        role: ParticipantRole,
    ) -> AppResult<ChatParticipant> {
        sqlx::query_as::<_, ChatParticipant>(
            "INSERT INTO chat_participants (user_id, chat_id, role) VALUES ($1, $2, $3) \
             ON CONFLICT (chat_id, user_id) \
             DO UPDATE SET is_active = TRUE, left_at = NULL, joined_at = NOW(), \
                           last_read_at = NULL, role = EXCLUDED.role \
             RETURNING *",
        )
        .bind(user_id)
        .bind(chat_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add participant", e))
    }

    /// Remove a participant by deactivating the membership.
    pub async fn remove_participant(&self, chat_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE chat_participants SET is_active = FALSE, left_at = NOW() \
             WHERE chat_id = $1 AND user_id = $2 AND is_active",
        )
        .bind(chat_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to remove participant", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Persist a message and bump the chat's last-activity marker, atomically.
    pub async fn add_message(
        &self,
        chat_id: Uuid,
        sender_id: Uuid,
        content: &str,
        message_type: MessageType,
        reply_to_id: Option<Uuid>,
    ) -> AppResult<ChatMessage> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let message = sqlx::query_as::<_, ChatMessage>(
            "INSERT INTO chat_messages (chat_id, sender_id, content, message_type, reply_to_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(chat_id)
        .bind(sender_id)
        .bind(content)
        .bind(message_type)
        .bind(reply_to_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create message", e))?;

        sqlx::query(
            "UPDATE chats SET last_message_at = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(chat_id)
        .bind(message.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bump chat activity", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit message", e)
        })?;

        Ok(message)
    }

    /// Find a message by primary key.
    pub async fn find_message_by_id(&self, id: Uuid) -> AppResult<Option<ChatMessage>> {
        sqlx::query_as::<_, ChatMessage>("SELECT * FROM chat_messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find message", e))
    }

    /// List a chat's messages, newest first, excluding deleted ones.
    pub async fn messages(
        &self,
        chat_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ChatMessage>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM chat_messages WHERE chat_id = $1 AND NOT is_deleted",
        )
        .bind(chat_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count messages", e))?;

        let messages = sqlx::query_as::<_, ChatMessage>(
            "SELECT * FROM chat_messages WHERE chat_id = $1 AND NOT is_deleted \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(chat_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))?;

        Ok(PageResponse::new(
            messages,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Replace a message's content and flag it as edited.
    pub async fn edit_message(&self, message_id: Uuid, content: &str) -> AppResult<ChatMessage> {
        sqlx::query_as::<_, ChatMessage>(
            "UPDATE chat_messages SET content = $2, is_edited = TRUE, updated_at = NOW() \
             WHERE id = $1 AND NOT is_deleted RETURNING *",
        )
        .bind(message_id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to edit message", e))?
        .ok_or_else(|| AppError::not_found(format!("Message {message_id} not found")))
    }

    /// Soft-delete a message; content is retained but hidden from listings.
    pub async fn delete_message(&self, message_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE chat_messages SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND NOT is_deleted",
        )
        .bind(message_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete message", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Record that a user has read a chat up to the given instant.
    pub async fn mark_read(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE chat_participants SET last_read_at = $3 \
             WHERE chat_id = $1 AND user_id = $2 AND is_active",
        )
        .bind(chat_id)
        .bind(user_id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark chat read", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "User {user_id} is not a participant of chat {chat_id}"
            )));
        }
        Ok(())
    }

    /// Count messages a user has not read yet.
    ///
    /// A never-read chat counts every message, the user's own included;
    /// sending does not advance the read marker.
    pub async fn unread_count(&self, chat_id: Uuid, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM chat_messages m \
             JOIN chat_participants cp ON cp.chat_id = m.chat_id AND cp.user_id = $2 \
             WHERE m.chat_id = $1 AND NOT m.is_deleted \
               AND (cp.last_read_at IS NULL OR m.created_at > cp.last_read_at)",
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }
}
