//! Chat, message, and participant handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use eduverse_core::types::pagination::PageResponse;
use eduverse_entity::chat::{Chat, ChatMessage, ChatParticipant};

use crate::dto::request::{
    AddParticipantRequest, CreateChatRequest, EditMessageRequest, SendMessageRequest,
};
use crate::dto::response::{ApiResponse, CountResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/chats
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateChatRequest>,
) -> Result<Json<ApiResponse<Chat>>, ApiError> {
    let chat = state
        .chat_service
        .create(&auth, &req.chat, &req.member_ids)
        .await?;
    Ok(Json(ApiResponse::ok(chat)))
}

/// GET /api/chats
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Chat>>>, ApiError> {
    let page = state
        .chat_service
        .list(&auth, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/chats/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Chat>>, ApiError> {
    let chat = state.chat_service.get(&auth, chat_id).await?;
    Ok(Json(ApiResponse::ok(chat)))
}

/// GET /api/chats/{id}/participants
pub async fn participants(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ChatParticipant>>>, ApiError> {
    let participants = state.chat_service.participants(&auth, chat_id).await?;
    Ok(Json(ApiResponse::ok(participants)))
}

/// POST /api/chats/{id}/participants
pub async fn add_participant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<Uuid>,
    Json(req): Json<AddParticipantRequest>,
) -> Result<Json<ApiResponse<ChatParticipant>>, ApiError> {
    let participant = state
        .chat_service
        .add_participant(&auth, chat_id, req.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(participant)))
}

/// DELETE /api/chats/{id}/participants/{user_id}
pub async fn remove_participant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((chat_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .chat_service
        .remove_participant(&auth, chat_id, user_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Participant removed",
    ))))
}

/// POST /api/chats/{id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<ChatMessage>>, ApiError> {
    let message = state
        .chat_service
        .send_message(&auth, chat_id, &req.content, req.reply_to_id)
        .await?;
    Ok(Json(ApiResponse::ok(message)))
}

/// GET /api/chats/{id}/messages
pub async fn messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ChatMessage>>>, ApiError> {
    let page = state
        .chat_service
        .messages(&auth, chat_id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// PUT /api/chats/messages/{id}
pub async fn edit_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(message_id): Path<Uuid>,
    Json(req): Json<EditMessageRequest>,
) -> Result<Json<ApiResponse<ChatMessage>>, ApiError> {
    let message = state
        .chat_service
        .edit_message(&auth, message_id, &req.content)
        .await?;
    Ok(Json(ApiResponse::ok(message)))
}

/// DELETE /api/chats/messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(message_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.chat_service.delete_message(&auth, message_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Message deleted",
    ))))
}

/// POST /api/chats/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.chat_service.mark_read(&auth, chat_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Marked read"))))
}

/// GET /api/chats/{id}/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.chat_service.unread_count(&auth, chat_id).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}
