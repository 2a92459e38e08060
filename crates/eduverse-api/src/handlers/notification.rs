//! Notification inbox and sending handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use eduverse_core::types::pagination::PageResponse;
use eduverse_entity::notification::Notification;

use crate::dto::request::{SendNotificationRequest, UnreadFilter};
use crate::dto::response::{AffectedResponse, ApiResponse, CountResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/notifications?unread_only=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<UnreadFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Notification>>>, ApiError> {
    let page = state
        .notification_service
        .list(&auth, filter.unread_only, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let notification = state
        .notification_service
        .mark_read(&auth, notification_id)
        .await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<AffectedResponse>>, ApiError> {
    let affected = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(ApiResponse::ok(AffectedResponse { affected })))
}

/// DELETE /api/notifications/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .notification_service
        .delete(&auth, notification_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Notification deleted",
    ))))
}

/// POST /api/schools/{id}/notifications
pub async fn send(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Json(req): Json<SendNotificationRequest>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let sent = state
        .notification_service
        .send(
            &auth,
            school_id,
            &req.recipient_ids,
            &req.title,
            &req.message,
            req.kind,
            req.is_important,
        )
        .await?;
    Ok(Json(ApiResponse::ok(sent)))
}
