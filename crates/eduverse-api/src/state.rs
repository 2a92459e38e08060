//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use eduverse_auth::jwt::decoder::JwtDecoder;
use eduverse_core::config::AppConfig;
use eduverse_realtime::RealtimeHub;
use eduverse_service::{
    AuthService, ChatService, ClassGroupService, GradeService, NotificationService,
    PaymentService, ScheduleService, SchoolService, SubjectService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool, used by health checks.
    pub db_pool: PgPool,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// WebSocket hub.
    pub hub: Arc<RealtimeHub>,

    /// Registration, login, token refresh, password changes.
    pub auth_service: Arc<AuthService>,
    /// Profiles and role assignments.
    pub user_service: Arc<UserService>,
    /// School lifecycle and settings.
    pub school_service: Arc<SchoolService>,
    /// Subject catalog.
    pub subject_service: Arc<SubjectService>,
    /// Class groups and enrollment.
    pub class_group_service: Arc<ClassGroupService>,
    /// Grade issuing and queries.
    pub grade_service: Arc<GradeService>,
    /// Schedules and events.
    pub schedule_service: Arc<ScheduleService>,
    /// Payment lifecycle.
    pub payment_service: Arc<PaymentService>,
    /// Chats, messages, participants.
    pub chat_service: Arc<ChatService>,
    /// Notification inbox and sending.
    pub notification_service: Arc<NotificationService>,
}
