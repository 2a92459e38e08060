//! Chat rooms, membership, and messaging.
//!
//! Every mutation is committed to the database before the corresponding
//! event is published, so real-time listeners never see a message that a
//! later history query would miss.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use eduverse_auth::policy::AuthorizationPolicy;
use eduverse_core::error::AppError;
use eduverse_core::events::{ChatEvent, DomainEvent, EventPayload};
use eduverse_core::traits::EventPublisher;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_database::repositories::chat::ChatRepository;
use eduverse_database::repositories::user::UserRepository;
use eduverse_entity::chat::{
    Chat, ChatMessage, ChatParticipant, ChatType, CreateChat, MessageType, ParticipantRole,
};

use crate::context::RequestContext;

/// Maximum accepted message length in characters.
const MAX_MESSAGE_LENGTH: usize = 4000;

/// Handles chats, participants, and messages.
#[derive(Clone)]
pub struct ChatService {
    /// Chat repository.
    chat_repo: Arc<ChatRepository>,
    /// User repository (to name participants in events).
    user_repo: Arc<UserRepository>,
    /// Authorization policy.
    policy: Arc<AuthorizationPolicy>,
    /// Domain event publisher.
    publisher: Arc<dyn EventPublisher>,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(
        chat_repo: Arc<ChatRepository>,
        user_repo: Arc<UserRepository>,
        policy: Arc<AuthorizationPolicy>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            chat_repo,
            user_repo,
            policy,
            publisher,
        }
    }

    /// Creates a chat; the creator becomes its admin participant.
    ///
    /// A private chat between two users is deduplicated: creating a second
    /// one returns the existing room instead.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: &CreateChat,
        member_ids: &[Uuid],
    ) -> Result<Chat, AppError> {
        if let Some(school_id) = data.school_id {
            if !ctx.school_ids().contains(&school_id)
                && !self.policy.is_platform_admin(&ctx.assignments)
            {
                return Err(AppError::authorization(
                    "Cannot create a chat in a school you are not part of".to_string(),
                ));
            }
        }

        if data.chat_type == ChatType::Private {
            if member_ids.len() != 1 || member_ids[0] == ctx.user_id() {
                return Err(AppError::validation(
                    "A private chat needs exactly one other participant".to_string(),
                ));
            }
            if let Some(existing) = self
                .chat_repo
                .find_private_between(ctx.user_id(), member_ids[0])
                .await?
            {
                return Ok(existing);
            }
        }

        for member_id in member_ids {
            if self.user_repo.find_by_id(*member_id).await?.is_none() {
                return Err(AppError::not_found(format!("User {member_id} not found")));
            }
        }

        let chat = self
            .chat_repo
            .create_with_participants(data, ctx.user_id(), member_ids)
            .await?;
        info!(chat_id = %chat.id, chat_type = ?chat.chat_type, creator = %ctx.user_id(), "Chat created");
        Ok(chat)
    }

    /// Lists the current user's chats, most recently active first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Chat>, AppError> {
        self.chat_repo.find_for_user(ctx.user_id(), page).await
    }

    /// Gets a chat the current user participates in.
    pub async fn get(&self, ctx: &RequestContext, chat_id: Uuid) -> Result<Chat, AppError> {
        let chat = self
            .chat_repo
            .find_by_id(chat_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Chat {chat_id} not found")))?;
        self.require_participant(ctx, chat_id).await?;
        Ok(chat)
    }

    /// Lists the active participants of a chat.
    pub async fn participants(
        &self,
        ctx: &RequestContext,
        chat_id: Uuid,
    ) -> Result<Vec<ChatParticipant>, AppError> {
        self.require_participant(ctx, chat_id).await?;
        self.chat_repo.participants(chat_id).await
    }

    /// Adds a user to a chat; requires moderator standing in the chat.
    ///
    /// Re-adding a removed participant reactivates the membership with a
    /// cleared read marker.
    pub async fn add_participant(
        &self,
        ctx: &RequestContext,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> Result<ChatParticipant, AppError> {
        let chat = self.get(ctx, chat_id).await?;
        if chat.chat_type == ChatType::Private {
            return Err(AppError::validation(
                "Cannot add participants to a private chat".to_string(),
            ));
        }
        self.require_manager(ctx, chat_id).await?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        let participant = self
            .chat_repo
            .add_participant(chat_id, user_id, ParticipantRole::Member)
            .await?;

        self.publish_chat(
            ctx,
            ChatEvent::ParticipantAdded {
                chat_id,
                user_id,
                username: user.username,
            },
        )
        .await;

        info!(chat_id = %chat_id, user_id = %user_id, added_by = %ctx.user_id(), "Participant added");
        Ok(participant)
    }

    /// Removes a user from a chat.
    ///
    /// Users may leave on their own; removing someone else requires
    /// moderator standing.
    pub async fn remove_participant(
        &self,
        ctx: &RequestContext,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        self.require_participant(ctx, chat_id).await?;
        if user_id != ctx.user_id() {
            self.require_manager(ctx, chat_id).await?;
        }

        if !self.chat_repo.remove_participant(chat_id, user_id).await? {
            return Err(AppError::not_found(
                "User is not a participant of this chat".to_string(),
            ));
        }

        self.publish_chat(ctx, ChatEvent::ParticipantRemoved { chat_id, user_id })
            .await;

        info!(chat_id = %chat_id, user_id = %user_id, removed_by = %ctx.user_id(), "Participant removed");
        Ok(())
    }

    /// Sends a message; the broadcast goes out only after the row commits.
    pub async fn send_message(
        &self,
        ctx: &RequestContext,
        chat_id: Uuid,
        content: &str,
        reply_to_id: Option<Uuid>,
    ) -> Result<ChatMessage, AppError> {
        let chat = self.get(ctx, chat_id).await?;
        if chat.is_archived {
            return Err(AppError::conflict("Chat is archived".to_string()));
        }
        validate_content(content)?;

        if let Some(reply_to) = reply_to_id {
            let parent = self
                .chat_repo
                .find_message_by_id(reply_to)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Message {reply_to} not found")))?;
            if parent.chat_id != chat_id {
                return Err(AppError::validation(
                    "Reply target belongs to another chat".to_string(),
                ));
            }
        }

        let message = self
            .chat_repo
            .add_message(
                chat_id,
                ctx.user_id(),
                content.trim(),
                MessageType::Text,
                reply_to_id,
            )
            .await?;

        self.publish_chat(
            ctx,
            ChatEvent::MessageSent {
                chat_id,
                message_id: message.id,
                sender_id: message.sender_id,
                sender_name: ctx.username().to_string(),
                content: message.content.clone(),
                reply_to: message.reply_to_id,
                sent_at: message.created_at,
            },
        )
        .await;

        Ok(message)
    }

    /// Lists a chat's messages, newest first.
    pub async fn messages(
        &self,
        ctx: &RequestContext,
        chat_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<ChatMessage>, AppError> {
        self.require_participant(ctx, chat_id).await?;
        self.chat_repo.messages(chat_id, page).await
    }

    /// Edits a message. Only the sender may edit, and only within the
    /// edit window.
    pub async fn edit_message(
        &self,
        ctx: &RequestContext,
        message_id: Uuid,
        content: &str,
    ) -> Result<ChatMessage, AppError> {
        validate_content(content)?;

        let message = self
            .chat_repo
            .find_message_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Message {message_id} not found")))?;
        self.require_participant(ctx, message.chat_id).await?;

        if !message.can_edit_at(ctx.user_id(), Utc::now()) {
            return Err(AppError::authorization(
                "Message can no longer be edited".to_string(),
            ));
        }

        let updated = self
            .chat_repo
            .edit_message(message_id, content.trim())
            .await?;

        self.publish_chat(
            ctx,
            ChatEvent::MessageEdited {
                chat_id: updated.chat_id,
                message_id: updated.id,
                content: updated.content.clone(),
            },
        )
        .await;

        Ok(updated)
    }

    /// Soft-deletes a message. The sender or a chat moderator may delete.
    pub async fn delete_message(
        &self,
        ctx: &RequestContext,
        message_id: Uuid,
    ) -> Result<(), AppError> {
        let message = self
            .chat_repo
            .find_message_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Message {message_id} not found")))?;
        self.require_participant(ctx, message.chat_id).await?;

        if message.sender_id != ctx.user_id() {
            self.require_manager(ctx, message.chat_id).await?;
        }

        if !self.chat_repo.delete_message(message_id).await? {
            return Err(AppError::conflict("Message is already deleted".to_string()));
        }

        self.publish_chat(
            ctx,
            ChatEvent::MessageDeleted {
                chat_id: message.chat_id,
                message_id,
            },
        )
        .await;

        info!(message_id = %message_id, deleted_by = %ctx.user_id(), "Message deleted");
        Ok(())
    }

    /// Marks a chat read up to now for the current user.
    pub async fn mark_read(&self, ctx: &RequestContext, chat_id: Uuid) -> Result<(), AppError> {
        self.chat_repo
            .mark_read(chat_id, ctx.user_id(), Utc::now())
            .await
    }

    /// Unread message count for the current user in one chat.
    pub async fn unread_count(&self, ctx: &RequestContext, chat_id: Uuid) -> Result<i64, AppError> {
        self.require_participant(ctx, chat_id).await?;
        self.chat_repo.unread_count(chat_id, ctx.user_id()).await
    }

    async fn require_participant(
        &self,
        ctx: &RequestContext,
        chat_id: Uuid,
    ) -> Result<(), AppError> {
        if self
            .chat_repo
            .is_active_participant(chat_id, ctx.user_id())
            .await?
        {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Not a participant of this chat".to_string(),
            ))
        }
    }

    async fn require_manager(&self, ctx: &RequestContext, chat_id: Uuid) -> Result<(), AppError> {
        let participant = self
            .chat_repo
            .find_participant(chat_id, ctx.user_id())
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| {
                AppError::authorization("Not a participant of this chat".to_string())
            })?;

        if participant.role.can_manage_participants() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Moderator standing required".to_string(),
            ))
        }
    }

    async fn publish_chat(&self, ctx: &RequestContext, event: ChatEvent) {
        self.publisher
            .publish(DomainEvent::new(
                Some(ctx.user_id()),
                EventPayload::Chat(event),
            ))
            .await;
    }
}

fn validate_content(content: &str) -> Result<(), AppError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Message cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(AppError::validation(format!(
            "Message exceeds {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_oversized_messages_rejected() {
        assert!(validate_content("").is_err());
        assert!(validate_content("   \n\t ").is_err());
        assert!(validate_content("hello").is_ok());
        assert!(validate_content(&"x".repeat(MAX_MESSAGE_LENGTH)).is_ok());
        assert!(validate_content(&"x".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
    }
}
