//! Class group and enrollment handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use eduverse_core::types::pagination::PageResponse;
use eduverse_entity::class_group::{ClassEnrollment, ClassGroup, CreateClassGroup};
use eduverse_entity::user::User;

use crate::dto::request::EnrollRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/schools/{id}/classes
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ClassGroup>>>, ApiError> {
    let page = state
        .class_group_service
        .list(&auth, school_id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/schools/{id}/classes
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Json(req): Json<CreateClassGroup>,
) -> Result<Json<ApiResponse<ClassGroup>>, ApiError> {
    let class = state
        .class_group_service
        .create(&auth, school_id, &req)
        .await?;
    Ok(Json(ApiResponse::ok(class)))
}

/// GET /api/classes/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(class_group_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ClassGroup>>, ApiError> {
    let class = state.class_group_service.get(&auth, class_group_id).await?;
    Ok(Json(ApiResponse::ok(class)))
}

/// DELETE /api/classes/{id}
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(class_group_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .class_group_service
        .remove(&auth, class_group_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Class removed"))))
}

/// POST /api/classes/{id}/students
pub async fn enroll(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(class_group_id): Path<Uuid>,
    Json(req): Json<EnrollRequest>,
) -> Result<Json<ApiResponse<ClassEnrollment>>, ApiError> {
    let enrollment = state
        .class_group_service
        .enroll(&auth, class_group_id, req.student_id)
        .await?;
    Ok(Json(ApiResponse::ok(enrollment)))
}

/// DELETE /api/classes/{id}/students/{student_id}
pub async fn unenroll(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((class_group_id, student_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .class_group_service
        .unenroll(&auth, class_group_id, student_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Student unenrolled",
    ))))
}

/// GET /api/classes/{id}/roster
pub async fn roster(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(class_group_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let students = state
        .class_group_service
        .roster(&auth, class_group_id)
        .await?;
    Ok(Json(ApiResponse::ok(students)))
}
