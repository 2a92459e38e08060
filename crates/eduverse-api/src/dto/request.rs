//! Request DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eduverse_entity::chat::CreateChat;
use eduverse_entity::grade::GradeType;
use eduverse_entity::notification::NotificationKind;
use eduverse_entity::payment::PaymentStatus;
use eduverse_entity::role::RoleName;

/// Body for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Body for `POST /api/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token from a previous login or refresh.
    pub refresh_token: String,
}

/// Body for `PUT /api/auth/password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password for re-authentication.
    pub current_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// Body for `POST /api/users/{id}/roles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantRoleRequest {
    /// Role to grant.
    pub role: RoleName,
    /// School scope; must be absent for platform roles.
    pub school_id: Option<Uuid>,
}

/// Body for `POST /api/chats` — the chat fields plus the initial members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChatRequest {
    /// Chat fields.
    #[serde(flatten)]
    pub chat: CreateChat,
    /// Initial member user IDs (the creator is added automatically).
    #[serde(default)]
    pub member_ids: Vec<Uuid>,
}

/// Body for `POST /api/chats/{id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Message body.
    pub content: String,
    /// Message being replied to, if any.
    pub reply_to_id: Option<Uuid>,
}

/// Body for `PUT /api/chats/messages/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditMessageRequest {
    /// Replacement body.
    pub content: String,
}

/// Body for `POST /api/chats/{id}/participants`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddParticipantRequest {
    /// User to add.
    pub user_id: Uuid,
}

/// Body for `POST /api/grades`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueGradeRequest {
    /// Subject the grade applies to.
    pub subject_id: Uuid,
    /// Graded student.
    pub student_id: Uuid,
    /// Grade value, 1 through 10.
    pub value: i32,
    /// Kind of assessment.
    pub grade_type: GradeType,
    /// Teacher comment.
    pub comment: Option<String>,
    /// Date of the assessment.
    pub date_given: NaiveDate,
}

/// Body for `PUT /api/grades/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectGradeRequest {
    /// New value, 1 through 10.
    pub value: i32,
    /// New comment.
    pub comment: Option<String>,
}

/// Body for `POST /api/schools/{id}/schedules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    /// Schedule name, e.g. "Grade 5A, fall term".
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Academic year label, e.g. "2025-2026".
    pub academic_year: Option<String>,
}

/// Body for `POST /api/classes/{id}/students`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    /// Student to enroll.
    pub student_id: Uuid,
}

/// Body for `POST /api/payments/{id}/record`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    /// Amount received, in the payment's currency.
    pub sum: f64,
}

/// Body for `PUT /api/schools/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveRequest {
    /// New active flag.
    pub is_active: bool,
}

/// Body for `POST /api/schools/{id}/notifications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendNotificationRequest {
    /// Recipient user IDs.
    pub recipient_ids: Vec<Uuid>,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub message: String,
    /// Severity kind.
    #[serde(default)]
    pub kind: NotificationKind,
    /// Whether the notification is pinned as important.
    #[serde(default)]
    pub is_important: bool,
}

/// Query for `GET /api/users/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Substring matched against username, email, and names.
    pub q: String,
}

/// Query for member listing with an optional role filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleFilter {
    /// Restrict to one role.
    pub role: Option<RoleName>,
}

/// Query for payment listing with an optional status filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusFilter {
    /// Restrict to one status.
    pub status: Option<PaymentStatus>,
}

/// Query for grade listing with an optional subject filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectFilter {
    /// Restrict to one subject.
    pub subject_id: Option<Uuid>,
}

/// Query for the notification inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadFilter {
    /// Show unread notifications only.
    #[serde(default)]
    pub unread_only: bool,
}

/// Query for schedule event listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateFilter {
    /// Restrict to events occurring on this date.
    pub date: Option<NaiveDate>,
}
