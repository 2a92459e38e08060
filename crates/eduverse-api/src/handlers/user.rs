//! User profile and role assignment handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use eduverse_core::types::pagination::PageResponse;
use eduverse_entity::role::RoleAssignment;
use eduverse_entity::user::{UpdateProfile, User};

use crate::dto::request::{GrantRoleRequest, SearchQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/users/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.get_profile(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfile>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.update_own_profile(&auth, &req).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// GET /api/users/search?q=
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SearchQuery>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<User>>>, ApiError> {
    let page = state
        .user_service
        .search(&auth, &query.q, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/users/{id}/roles
pub async fn list_roles(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<RoleAssignment>>>, ApiError> {
    let roles = state.user_service.list_roles(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(roles)))
}

/// POST /api/users/{id}/roles
pub async fn grant_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<GrantRoleRequest>,
) -> Result<Json<ApiResponse<RoleAssignment>>, ApiError> {
    let assignment = state
        .user_service
        .grant_role(&auth, user_id, req.role, req.school_id)
        .await?;
    Ok(Json(ApiResponse::ok(assignment)))
}

/// DELETE /api/roles/{assignment_id}
pub async fn revoke_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(assignment_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.user_service.revoke_role(&auth, assignment_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Role revoked"))))
}
