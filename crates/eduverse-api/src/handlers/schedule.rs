//! Schedule and schedule event handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use eduverse_core::types::pagination::PageResponse;
use eduverse_entity::schedule::{CreateScheduleEvent, Schedule, ScheduleEvent};

use crate::dto::request::{CreateScheduleRequest, DateFilter};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/schools/{id}/schedules
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Schedule>>>, ApiError> {
    let page = state
        .schedule_service
        .list(&auth, school_id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/schools/{id}/schedules
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(school_id): Path<Uuid>,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<Json<ApiResponse<Schedule>>, ApiError> {
    let schedule = state
        .schedule_service
        .create(
            &auth,
            school_id,
            &req.name,
            req.description.as_deref(),
            req.academic_year.as_deref(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(schedule)))
}

/// GET /api/schedules/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Schedule>>, ApiError> {
    let schedule = state.schedule_service.get(&auth, schedule_id).await?;
    Ok(Json(ApiResponse::ok(schedule)))
}

/// DELETE /api/schedules/{id}
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.schedule_service.remove(&auth, schedule_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Schedule removed",
    ))))
}

/// GET /api/schedules/{id}/events?date=
///
/// Without `date`, returns the full weekly template. With `date`, returns
/// only the events that occur on that calendar day.
pub async fn events(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(schedule_id): Path<Uuid>,
    Query(filter): Query<DateFilter>,
) -> Result<Json<ApiResponse<Vec<ScheduleEvent>>>, ApiError> {
    let events = match filter.date {
        Some(date) => {
            state
                .schedule_service
                .events_on(&auth, schedule_id, date)
                .await?
        }
        None => state.schedule_service.events(&auth, schedule_id).await?,
    };
    Ok(Json(ApiResponse::ok(events)))
}

/// POST /api/schedules/{id}/events
pub async fn add_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(schedule_id): Path<Uuid>,
    Json(req): Json<CreateScheduleEvent>,
) -> Result<Json<ApiResponse<ScheduleEvent>>, ApiError> {
    let event = state
        .schedule_service
        .add_event(&auth, schedule_id, &req)
        .await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// DELETE /api/schedule-events/{id}
pub async fn remove_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.schedule_service.remove_event(&auth, event_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Event removed"))))
}
