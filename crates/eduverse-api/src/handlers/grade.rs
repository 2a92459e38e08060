//! Grade handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use eduverse_core::types::pagination::PageResponse;
use eduverse_entity::grade::Grade;

use crate::dto::request::{CorrectGradeRequest, IssueGradeRequest, SubjectFilter};
use crate::dto::response::{ApiResponse, AverageResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/grades
pub async fn issue(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<IssueGradeRequest>,
) -> Result<Json<ApiResponse<Grade>>, ApiError> {
    let grade = state
        .grade_service
        .issue(
            &auth,
            req.subject_id,
            req.student_id,
            req.value,
            req.grade_type,
            req.comment,
            req.date_given,
        )
        .await?;
    Ok(Json(ApiResponse::ok(grade)))
}

/// PUT /api/grades/{id}
pub async fn correct(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(grade_id): Path<Uuid>,
    Json(req): Json<CorrectGradeRequest>,
) -> Result<Json<ApiResponse<Grade>>, ApiError> {
    let grade = state
        .grade_service
        .correct(&auth, grade_id, req.value, req.comment)
        .await?;
    Ok(Json(ApiResponse::ok(grade)))
}

/// DELETE /api/grades/{id}
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(grade_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.grade_service.delete(&auth, grade_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Grade deleted"))))
}

/// GET /api/students/{id}/grades?subject_id=
pub async fn list_for_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_id): Path<Uuid>,
    Query(filter): Query<SubjectFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Grade>>>, ApiError> {
    let page = state
        .grade_service
        .list_for_student(
            &auth,
            student_id,
            filter.subject_id,
            &params.into_page_request(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/students/{id}/grades/average?subject_id=
pub async fn average_for_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_id): Path<Uuid>,
    Query(filter): Query<SubjectFilter>,
) -> Result<Json<ApiResponse<AverageResponse>>, ApiError> {
    let average = state
        .grade_service
        .average_for_student(&auth, student_id, filter.subject_id)
        .await?;
    Ok(Json(ApiResponse::ok(AverageResponse { average })))
}
