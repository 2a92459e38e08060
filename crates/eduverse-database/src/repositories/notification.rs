//! Notification repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use eduverse_core::error::{AppError, ErrorKind};
use eduverse_core::result::AppResult;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_entity::notification::model::{CreateNotification, Notification};

/// Repository for notification CRUD operations.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a notification by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })
    }

    /// List a user's notifications, newest first, skipping expired ones.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE user_id = $1 AND (expires_at IS NULL OR expires_at > NOW()) \
               AND (NOT $2 OR NOT is_read)",
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
        })?;

        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications \
             WHERE user_id = $1 AND (expires_at IS NULL OR expires_at > NOW()) \
               AND (NOT $2 OR NOT is_read) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(user_id)
        .bind(unread_only)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            notifications,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count unread, unexpired notifications for a user.
    pub async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE user_id = $1 AND NOT is_read \
               AND (expires_at IS NULL OR expires_at > NOW())",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Create a notification.
    pub async fn create(&self, data: &CreateNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications \
             (user_id, sender_id, school_id, title, message, kind, is_important, \
              requires_action, action_url, action_text, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.sender_id)
        .bind(data.school_id)
        .bind(&data.title)
        .bind(&data.message)
        .bind(data.kind)
        .bind(data.is_important)
        .bind(data.requires_action)
        .bind(&data.action_url)
        .bind(&data.action_text)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    /// Mark a single notification as read.
    ///
    /// Only the recipient's own notifications can be marked; someone
    /// else's notification is an authorization error, not a missing row.
    pub async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<Notification> {
        let updated = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark notification read", e)
        })?;

        match updated {
            Some(notification) => Ok(notification),
            None => Err(self.classify_miss(notification_id).await?),
        }
    }

    /// Mark all of a user's notifications as read; returns how many changed.
    pub async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW() \
             WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark notifications read", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Delete a notification owned by the user.
    pub async fn delete(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(notification_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(self.classify_miss(notification_id).await?);
        }
        Ok(())
    }

    /// Tell a missing notification apart from one owned by someone else.
    async fn classify_miss(&self, notification_id: Uuid) -> AppResult<AppError> {
        let owner: Option<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM notifications WHERE id = $1")
                .bind(notification_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to look up notification", e)
                })?;

        Ok(match owner {
            Some(_) => {
                AppError::authorization("Notification belongs to another user".to_string())
            }
            None => AppError::not_found(format!("Notification {notification_id} not found")),
        })
    }
}
