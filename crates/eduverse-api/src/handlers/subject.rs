//! Subject catalog handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use eduverse_core::types::pagination::PageResponse;
use eduverse_entity::subject::{CreateSubject, Subject};

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/schools/{id}/subjects
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Subject>>>, ApiError> {
    let page = state
        .subject_service
        .list(&auth, school_id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/schools/{id}/subjects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Json(req): Json<CreateSubject>,
) -> Result<Json<ApiResponse<Subject>>, ApiError> {
    let subject = state.subject_service.create(&auth, school_id, &req).await?;
    Ok(Json(ApiResponse::ok(subject)))
}

/// GET /api/subjects/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Subject>>, ApiError> {
    let subject = state.subject_service.get(&auth, subject_id).await?;
    Ok(Json(ApiResponse::ok(subject)))
}

/// PUT /api/subjects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subject_id): Path<Uuid>,
    Json(req): Json<CreateSubject>,
) -> Result<Json<ApiResponse<Subject>>, ApiError> {
    let subject = state.subject_service.update(&auth, subject_id, &req).await?;
    Ok(Json(ApiResponse::ok(subject)))
}

/// DELETE /api/subjects/{id}
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.subject_service.remove(&auth, subject_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Subject removed",
    ))))
}
