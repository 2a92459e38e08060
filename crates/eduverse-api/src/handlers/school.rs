//! School lifecycle, settings, statistics, and membership handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use eduverse_core::types::pagination::PageResponse;
use eduverse_entity::school::{
    CreateSchool, School, SchoolSettings, SchoolStatistics, UpdateSchool,
};
use eduverse_entity::school::settings::UpdateSchoolSettings;
use eduverse_entity::user::User;

use crate::dto::request::{RoleFilter, SetActiveRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/schools
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSchool>,
) -> Result<Json<ApiResponse<School>>, ApiError> {
    let school = state.school_service.create(&auth, &req).await?;
    Ok(Json(ApiResponse::ok(school)))
}

/// GET /api/schools
pub async fn list_all(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<School>>>, ApiError> {
    let page = state
        .school_service
        .list_all(&auth, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/schools/mine
pub async fn list_administered(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<School>>>, ApiError> {
    let schools = state.school_service.list_administered(&auth).await?;
    Ok(Json(ApiResponse::ok(schools)))
}

/// GET /api/schools/{id}
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(school_id): Path<Uuid>,
) -> Result<Json<ApiResponse<School>>, ApiError> {
    let school = state.school_service.get(school_id).await?;
    Ok(Json(ApiResponse::ok(school)))
}

/// GET /api/schools/slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<School>>, ApiError> {
    let school = state.school_service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::ok(school)))
}

/// PUT /api/schools/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Json(req): Json<UpdateSchool>,
) -> Result<Json<ApiResponse<School>>, ApiError> {
    let school = state.school_service.update(&auth, school_id, &req).await?;
    Ok(Json(ApiResponse::ok(school)))
}

/// PUT /api/schools/{id}/status
pub async fn set_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<ApiResponse<School>>, ApiError> {
    let school = state
        .school_service
        .set_active(&auth, school_id, req.is_active)
        .await?;
    Ok(Json(ApiResponse::ok(school)))
}

/// POST /api/schools/{id}/verify
pub async fn verify(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
) -> Result<Json<ApiResponse<School>>, ApiError> {
    let school = state.school_service.verify(&auth, school_id).await?;
    Ok(Json(ApiResponse::ok(school)))
}

/// GET /api/schools/{id}/settings
pub async fn settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
) -> Result<Json<ApiResponse<SchoolSettings>>, ApiError> {
    let settings = state.school_service.settings(&auth, school_id).await?;
    Ok(Json(ApiResponse::ok(settings)))
}

/// PUT /api/schools/{id}/settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Json(req): Json<UpdateSchoolSettings>,
) -> Result<Json<ApiResponse<SchoolSettings>>, ApiError> {
    let settings = state
        .school_service
        .update_settings(&auth, school_id, &req)
        .await?;
    Ok(Json(ApiResponse::ok(settings)))
}

/// GET /api/schools/{id}/statistics
pub async fn statistics(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
) -> Result<Json<ApiResponse<SchoolStatistics>>, ApiError> {
    let stats = state.school_service.statistics(&auth, school_id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/schools/{id}/members?role=
pub async fn members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Query(filter): Query<RoleFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<User>>>, ApiError> {
    let page = state
        .user_service
        .list_school_members(&auth, school_id, filter.role, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}
