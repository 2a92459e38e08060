//! Route definitions for the Eduverse HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`; the
//! WebSocket upgrade lives at `/ws`.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(school_routes())
        .merge(subject_routes())
        .merge(class_routes())
        .merge(grade_routes())
        .merge(schedule_routes())
        .merge(payment_routes())
        .merge(chat_routes())
        .merge(notification_routes())
        .route("/health", get(handlers::health::health));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::upgrade))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/password", put(handlers::auth::change_password))
        .route("/auth/me", get(handlers::auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", put(handlers::user::update_profile))
        .route("/users/search", get(handlers::user::search))
        .route("/users/{id}", get(handlers::user::get_profile))
        .route("/users/{id}/roles", get(handlers::user::list_roles))
        .route("/users/{id}/roles", post(handlers::user::grant_role))
        .route("/roles/{id}", delete(handlers::user::revoke_role))
}

fn school_routes() -> Router<AppState> {
    Router::new()
        .route("/schools", get(handlers::school::list_all))
        .route("/schools", post(handlers::school::create))
        .route("/schools/mine", get(handlers::school::list_administered))
        .route("/schools/slug/{slug}", get(handlers::school::get_by_slug))
        .route("/schools/{id}", get(handlers::school::get))
        .route("/schools/{id}", put(handlers::school::update))
        .route("/schools/{id}/status", put(handlers::school::set_active))
        .route("/schools/{id}/verify", post(handlers::school::verify))
        .route("/schools/{id}/settings", get(handlers::school::settings))
        .route(
            "/schools/{id}/settings",
            put(handlers::school::update_settings),
        )
        .route(
            "/schools/{id}/statistics",
            get(handlers::school::statistics),
        )
        .route("/schools/{id}/members", get(handlers::school::members))
        .route(
            "/schools/{id}/payments",
            get(handlers::payment::list_for_school),
        )
        .route(
            "/schools/{id}/notifications",
            post(handlers::notification::send),
        )
}

fn subject_routes() -> Router<AppState> {
    Router::new()
        .route("/schools/{id}/subjects", get(handlers::subject::list))
        .route("/schools/{id}/subjects", post(handlers::subject::create))
        .route("/subjects/{id}", get(handlers::subject::get))
        .route("/subjects/{id}", put(handlers::subject::update))
        .route("/subjects/{id}", delete(handlers::subject::remove))
}

fn class_routes() -> Router<AppState> {
    Router::new()
        .route("/schools/{id}/classes", get(handlers::class_group::list))
        .route("/schools/{id}/classes", post(handlers::class_group::create))
        .route("/classes/{id}", get(handlers::class_group::get))
        .route("/classes/{id}", delete(handlers::class_group::remove))
        .route(
            "/classes/{id}/students",
            post(handlers::class_group::enroll),
        )
        .route(
            "/classes/{id}/students/{student_id}",
            delete(handlers::class_group::unenroll),
        )
        .route("/classes/{id}/roster", get(handlers::class_group::roster))
}

fn grade_routes() -> Router<AppState> {
    Router::new()
        .route("/grades", post(handlers::grade::issue))
        .route("/grades/{id}", put(handlers::grade::correct))
        .route("/grades/{id}", delete(handlers::grade::remove))
        .route(
            "/students/{id}/grades",
            get(handlers::grade::list_for_student),
        )
        .route(
            "/students/{id}/grades/average",
            get(handlers::grade::average_for_student),
        )
}

fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/schools/{id}/schedules", get(handlers::schedule::list))
        .route("/schools/{id}/schedules", post(handlers::schedule::create))
        .route("/schedules/{id}", get(handlers::schedule::get))
        .route("/schedules/{id}", delete(handlers::schedule::remove))
        .route("/schedules/{id}/events", get(handlers::schedule::events))
        .route(
            "/schedules/{id}/events",
            post(handlers::schedule::add_event),
        )
        .route(
            "/schedule-events/{id}",
            delete(handlers::schedule::remove_event),
        )
}

fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payments", post(handlers::payment::create))
        .route("/payments/{id}", get(handlers::payment::get))
        .route("/payments/{id}/record", post(handlers::payment::record))
        .route("/payments/{id}/cancel", post(handlers::payment::cancel))
        .route(
            "/students/{id}/payments",
            get(handlers::payment::list_for_student),
        )
}

fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chats", get(handlers::chat::list))
        .route("/chats", post(handlers::chat::create))
        .route("/chats/messages/{id}", put(handlers::chat::edit_message))
        .route(
            "/chats/messages/{id}",
            delete(handlers::chat::delete_message),
        )
        .route("/chats/{id}", get(handlers::chat::get))
        .route("/chats/{id}/participants", get(handlers::chat::participants))
        .route(
            "/chats/{id}/participants",
            post(handlers::chat::add_participant),
        )
        .route(
            "/chats/{id}/participants/{user_id}",
            delete(handlers::chat::remove_participant),
        )
        .route("/chats/{id}/messages", get(handlers::chat::messages))
        .route("/chats/{id}/messages", post(handlers::chat::send_message))
        .route("/chats/{id}/read", post(handlers::chat::mark_read))
        .route(
            "/chats/{id}/unread-count",
            get(handlers::chat::unread_count),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list))
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete),
        )
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::HeaderValue;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;
    let mut cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
