//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! validates it, and loads the caller's fresh role assignments.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use eduverse_core::error::AppError;
use eduverse_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// Role assignments come from the database, not the token, so a revoked
/// role takes effect on the next request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;
        let ctx = state.auth_service.load_context(claims.user_id()).await?;

        Ok(AuthUser(ctx))
    }
}
