//! School entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An educational institution — the tenant boundary.
///
/// A school owns its subjects, class groups, schedules, payments, and chats;
/// deleting a school cascades to all of them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct School {
    /// Unique school identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique URL-safe slug, generated from the name.
    pub slug: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Public website.
    pub website: Option<String>,
    /// Whether the school is visible and operational.
    pub is_active: bool,
    /// Whether the school has been verified by the platform.
    pub is_verified: bool,
    /// The user who created the school.
    pub owner_id: Uuid,
    /// When the school was created.
    pub created_at: DateTime<Utc>,
    /// When the school was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a school. The slug is generated, not supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSchool {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Public website.
    pub website: Option<String>,
}

/// Data for updating a school's attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSchool {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New website.
    pub website: Option<String>,
}
