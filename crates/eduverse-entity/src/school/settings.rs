//! Per-school settings record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Settings owned 1:1 by a school, created together with it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SchoolSettings {
    /// Unique settings identifier.
    pub id: Uuid,
    /// The owning school.
    pub school_id: Uuid,
    /// IANA timezone name.
    pub timezone: String,
    /// UI language code.
    pub language: String,
    /// ISO 4217 currency code for payments.
    pub currency: String,
    /// Grading system identifier (e.g. "10-point").
    pub grading_system: String,
    /// Day of month tuition payments fall due.
    pub payment_due_day: i32,
    /// Days before the due date to remind about payment.
    pub payment_reminder_days: i32,
    /// Whether chat is enabled for this school.
    pub chat_enabled: bool,
    /// Whether email notifications are enabled.
    pub email_notifications: bool,
    /// When the settings row was created.
    pub created_at: DateTime<Utc>,
    /// When the settings row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Mutable subset of school settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSchoolSettings {
    /// New timezone.
    pub timezone: Option<String>,
    /// New language code.
    pub language: Option<String>,
    /// New currency code.
    pub currency: Option<String>,
    /// New grading system.
    pub grading_system: Option<String>,
    /// New payment due day.
    pub payment_due_day: Option<i32>,
    /// New reminder offset.
    pub payment_reminder_days: Option<i32>,
    /// Toggle chat.
    pub chat_enabled: Option<bool>,
    /// Toggle email notifications.
    pub email_notifications: Option<bool>,
}
