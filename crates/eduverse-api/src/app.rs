//! State wiring — constructs repositories, services, and the realtime hub.

use std::sync::Arc;

use sqlx::PgPool;

use eduverse_auth::jwt::decoder::JwtDecoder;
use eduverse_auth::jwt::encoder::JwtEncoder;
use eduverse_auth::password::hasher::PasswordHasher;
use eduverse_auth::password::policy::PasswordPolicy;
use eduverse_auth::policy::AuthorizationPolicy;
use eduverse_core::config::AppConfig;
use eduverse_core::traits::EventPublisher;
use eduverse_database::repositories::chat::ChatRepository;
use eduverse_database::repositories::class_group::ClassGroupRepository;
use eduverse_database::repositories::grade::GradeRepository;
use eduverse_database::repositories::notification::NotificationRepository;
use eduverse_database::repositories::payment::PaymentRepository;
use eduverse_database::repositories::role::RoleRepository;
use eduverse_database::repositories::schedule::ScheduleRepository;
use eduverse_database::repositories::school::SchoolRepository;
use eduverse_database::repositories::subject::SubjectRepository;
use eduverse_database::repositories::user::UserRepository;
use eduverse_realtime::{EventBridge, ParticipantGuard, RealtimeHub, RoomAuthorizer};
use eduverse_service::{
    AuthService, ChatService, ClassGroupService, GradeService, NotificationService,
    PaymentService, ScheduleService, SchoolService, SubjectService, UserService,
};

use crate::state::AppState;

/// Wire every repository, service, and the realtime hub into an [`AppState`].
///
/// Construction order matters only for the event path: the hub exists
/// first, the [`EventBridge`] wraps it, and every publishing service gets
/// the bridge as its [`EventPublisher`].
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    let config = Arc::new(config);

    // Repositories
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let role_repo = Arc::new(RoleRepository::new(db_pool.clone()));
    let school_repo = Arc::new(SchoolRepository::new(db_pool.clone()));
    let subject_repo = Arc::new(SubjectRepository::new(db_pool.clone()));
    let class_repo = Arc::new(ClassGroupRepository::new(db_pool.clone()));
    let grade_repo = Arc::new(GradeRepository::new(db_pool.clone()));
    let schedule_repo = Arc::new(ScheduleRepository::new(db_pool.clone()));
    let payment_repo = Arc::new(PaymentRepository::new(db_pool.clone()));
    let chat_repo = Arc::new(ChatRepository::new(db_pool.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(db_pool.clone()));

    // Auth
    let hasher = Arc::new(PasswordHasher::new());
    let password_policy = Arc::new(PasswordPolicy::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let policy = Arc::new(AuthorizationPolicy::new());

    // Realtime: membership is re-checked against the database on every
    // room join, so a removed participant loses the live feed too.
    let guard = Arc::new(ParticipantGuard::new(ChatRepository::new(db_pool.clone())));
    let hub = Arc::new(RealtimeHub::new(
        guard as Arc<dyn RoomAuthorizer>,
        config.realtime.clone(),
    ));
    let publisher: Arc<dyn EventPublisher> = Arc::new(EventBridge::new(Arc::clone(&hub)));

    // Services
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&role_repo),
        Arc::clone(&hasher),
        Arc::clone(&password_policy),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&role_repo),
        Arc::clone(&policy),
    ));
    let school_service = Arc::new(SchoolService::new(
        Arc::clone(&school_repo),
        Arc::clone(&policy),
    ));
    let subject_service = Arc::new(SubjectService::new(
        Arc::clone(&subject_repo),
        Arc::clone(&policy),
    ));
    let class_group_service = Arc::new(ClassGroupService::new(
        Arc::clone(&class_repo),
        Arc::clone(&role_repo),
        Arc::clone(&policy),
    ));
    let grade_service = Arc::new(GradeService::new(
        Arc::clone(&grade_repo),
        Arc::clone(&subject_repo),
        Arc::clone(&notification_repo),
        Arc::clone(&role_repo),
        Arc::clone(&policy),
        Arc::clone(&publisher),
    ));
    let schedule_service = Arc::new(ScheduleService::new(
        Arc::clone(&schedule_repo),
        Arc::clone(&policy),
    ));
    let payment_service = Arc::new(PaymentService::new(
        Arc::clone(&payment_repo),
        Arc::clone(&notification_repo),
        Arc::clone(&role_repo),
        Arc::clone(&policy),
        Arc::clone(&publisher),
    ));
    let chat_service = Arc::new(ChatService::new(
        Arc::clone(&chat_repo),
        Arc::clone(&user_repo),
        Arc::clone(&policy),
        Arc::clone(&publisher),
    ));
    let notification_service = Arc::new(NotificationService::new(
        Arc::clone(&notification_repo),
        Arc::clone(&policy),
        Arc::clone(&publisher),
    ));

    AppState {
        config,
        db_pool,
        jwt_decoder,
        hub,
        auth_service,
        user_service,
        school_service,
        subject_service,
        class_group_service,
        grade_service,
        schedule_service,
        payment_service,
        chat_service,
        notification_service,
    }
}
