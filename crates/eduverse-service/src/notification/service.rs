//! Notification inbox and administrative sending.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use eduverse_auth::policy::AuthorizationPolicy;
use eduverse_core::error::AppError;
use eduverse_core::events::{DomainEvent, EventPayload, NotificationEvent};
use eduverse_core::traits::EventPublisher;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_database::repositories::notification::NotificationRepository;
use eduverse_entity::notification::{CreateNotification, Notification, NotificationKind};

use crate::context::RequestContext;

/// Manages user notification inboxes.
#[derive(Clone)]
pub struct NotificationService {
    /// Notification repository.
    notification_repo: Arc<NotificationRepository>,
    /// Authorization policy.
    policy: Arc<AuthorizationPolicy>,
    /// Domain event publisher.
    publisher: Arc<dyn EventPublisher>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notification_repo: Arc<NotificationRepository>,
        policy: Arc<AuthorizationPolicy>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            notification_repo,
            policy,
            publisher,
        }
    }

    /// Lists the current user's notifications, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        unread_only: bool,
        page: &PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notification_repo
            .find_by_user(ctx.user_id(), unread_only, page)
            .await
    }

    /// Unread notification count for the current user.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notification_repo.count_unread(ctx.user_id()).await
    }

    /// Marks one notification as read.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<Notification, AppError> {
        self.notification_repo
            .mark_read(notification_id, ctx.user_id())
            .await
    }

    /// Marks all of the current user's notifications as read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.notification_repo.mark_all_read(ctx.user_id()).await
    }

    /// Deletes one of the current user's notifications.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<(), AppError> {
        self.notification_repo
            .delete(notification_id, ctx.user_id())
            .await
    }

    /// Sends a notification to a set of users within a school.
    ///
    /// School admin only. Each recipient's row is committed before its
    /// event is published.
    #[allow(clippy::too_many_arguments)]
    pub async fn send(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        recipient_ids: &[Uuid],
        title: &str,
        message: &str,
        kind: NotificationKind,
        is_important: bool,
    ) -> Result<Vec<Notification>, AppError> {
        self.policy
            .require_school_admin(&ctx.assignments, school_id)?;

        if title.trim().is_empty() || message.trim().is_empty() {
            return Err(AppError::validation(
                "Notification title and message cannot be empty".to_string(),
            ));
        }
        if recipient_ids.is_empty() {
            return Err(AppError::validation(
                "Notification needs at least one recipient".to_string(),
            ));
        }

        let mut sent = Vec::with_capacity(recipient_ids.len());
        for recipient in recipient_ids {
            let saved = self
                .notification_repo
                .create(&CreateNotification {
                    user_id: *recipient,
                    sender_id: Some(ctx.user_id()),
                    school_id: Some(school_id),
                    title: title.to_string(),
                    message: message.to_string(),
                    kind,
                    is_important,
                    requires_action: false,
                    action_url: None,
                    action_text: None,
                    expires_at: None,
                })
                .await?;

            self.publisher
                .publish(DomainEvent::new(
                    Some(ctx.user_id()),
                    EventPayload::Notification(NotificationEvent::Created {
                        notification_id: saved.id,
                        user_id: saved.user_id,
                        title: saved.title.clone(),
                        message: saved.message.clone(),
                        kind: saved.kind.as_str().to_string(),
                        created_at: saved.created_at,
                    }),
                ))
                .await;

            sent.push(saved);
        }

        info!(
            school_id = %school_id,
            recipients = sent.len(),
            sent_by = %ctx.user_id(),
            "Notifications sent"
        );
        Ok(sent)
    }
}
