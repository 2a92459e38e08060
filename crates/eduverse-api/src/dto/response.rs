//! Response DTOs.

use serde::{Deserialize, Serialize};

use eduverse_auth::TokenPair;
use eduverse_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Login and refresh response: tokens plus the user.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Access and refresh tokens with their expirations.
    #[serde(flatten)]
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: User,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Count response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Count value.
    pub count: i64,
}

/// Affected-rows response for bulk operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffectedResponse {
    /// Number of rows affected.
    pub affected: u64,
}

/// Average grade response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AverageResponse {
    /// Mean grade value, absent when the student has no grades.
    pub average: Option<f64>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Database reachability.
    pub database: String,
}
