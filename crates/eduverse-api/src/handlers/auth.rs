//! Auth handlers — register, login, refresh, password change, me.

use axum::Json;
use axum::extract::State;

use eduverse_entity::user::User;
use eduverse_service::auth::RegisterRequest;

use crate::dto::request::{ChangePasswordRequest, LoginRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.auth_service.register(req).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let outcome = state.auth_service.login(&req.username, &req.password).await?;
    Ok(Json(ApiResponse::ok(LoginResponse {
        tokens: outcome.tokens,
        user: outcome.user,
    })))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let outcome = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(LoginResponse {
        tokens: outcome.tokens,
        user: outcome.user,
    })))
}

/// PUT /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .auth_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed",
    ))))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<User>> {
    Json(ApiResponse::ok(auth.0.user))
}
