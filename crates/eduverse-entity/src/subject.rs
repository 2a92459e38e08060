//! Subject catalog entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A subject taught at one school.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: Uuid,
    /// The owning school.
    pub school_id: Uuid,
    /// Display name.
    pub name: String,
    /// Short code like "MATH".
    pub code: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Hex color for UI display.
    pub color: String,
    /// Whether the subject is active.
    pub is_active: bool,
    /// When the subject was created.
    pub created_at: DateTime<Utc>,
    /// When the subject was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubject {
    /// Display name.
    pub name: String,
    /// Short code (optional).
    pub code: Option<String>,
    /// Description (optional).
    pub description: Option<String>,
    /// Hex color (optional, defaults in the database).
    pub color: Option<String>,
}
