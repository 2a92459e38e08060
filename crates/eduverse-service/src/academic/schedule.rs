//! Timetable management.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use eduverse_auth::policy::AuthorizationPolicy;
use eduverse_core::error::AppError;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_database::repositories::schedule::ScheduleRepository;
use eduverse_entity::role::RoleName;
use eduverse_entity::schedule::{CreateScheduleEvent, Schedule, ScheduleEvent};

use crate::context::RequestContext;

/// Handles schedules and their timetable events.
#[derive(Clone)]
pub struct ScheduleService {
    /// Schedule repository.
    schedule_repo: Arc<ScheduleRepository>,
    /// Authorization policy.
    policy: Arc<AuthorizationPolicy>,
}

impl ScheduleService {
    /// Creates a new schedule service.
    pub fn new(schedule_repo: Arc<ScheduleRepository>, policy: Arc<AuthorizationPolicy>) -> Self {
        Self {
            schedule_repo,
            policy,
        }
    }

    /// Lists a school's active schedules. Any member may read.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<Schedule>, AppError> {
        self.policy
            .require_role_at_least(&ctx.assignments, school_id, RoleName::Parent)?;
        self.schedule_repo.find_by_school(school_id, page).await
    }

    /// Gets a schedule by ID, checking school membership.
    pub async fn get(&self, ctx: &RequestContext, schedule_id: Uuid) -> Result<Schedule, AppError> {
        let schedule = self
            .schedule_repo
            .find_by_id(schedule_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Schedule {schedule_id} not found")))?;
        self.policy
            .require_role_at_least(&ctx.assignments, schedule.school_id, RoleName::Parent)?;
        Ok(schedule)
    }

    /// Creates a schedule. School admin only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        name: &str,
        description: Option<&str>,
        academic_year: Option<&str>,
    ) -> Result<Schedule, AppError> {
        self.policy
            .require_school_admin(&ctx.assignments, school_id)?;
        if name.trim().is_empty() {
            return Err(AppError::validation("Schedule name cannot be empty".to_string()));
        }

        let schedule = self
            .schedule_repo
            .create(school_id, name, description, academic_year)
            .await?;
        info!(schedule_id = %schedule.id, school_id = %school_id, "Schedule created");
        Ok(schedule)
    }

    /// Deactivates a schedule. School admin only.
    pub async fn remove(&self, ctx: &RequestContext, schedule_id: Uuid) -> Result<(), AppError> {
        let schedule = self.get(ctx, schedule_id).await?;
        self.policy
            .require_school_admin(&ctx.assignments, schedule.school_id)?;

        if !self.schedule_repo.deactivate(schedule_id).await? {
            return Err(AppError::conflict("Schedule is already inactive".to_string()));
        }
        info!(schedule_id = %schedule_id, "Schedule deactivated");
        Ok(())
    }

    /// Adds a timetable event to a schedule. School admin only.
    pub async fn add_event(
        &self,
        ctx: &RequestContext,
        schedule_id: Uuid,
        data: &CreateScheduleEvent,
    ) -> Result<ScheduleEvent, AppError> {
        let schedule = self.get(ctx, schedule_id).await?;
        self.policy
            .require_school_admin(&ctx.assignments, schedule.school_id)?;

        if data.title.trim().is_empty() {
            return Err(AppError::validation("Event title cannot be empty".to_string()));
        }
        if !(0..=6).contains(&data.day_of_week) {
            return Err(AppError::validation(
                "Day of week must be 0 (Monday) through 6 (Sunday)".to_string(),
            ));
        }
        if data.end_time <= data.start_time {
            return Err(AppError::validation(
                "Event must end after it starts".to_string(),
            ));
        }
        if !data.is_recurring && data.start_date.is_none() {
            return Err(AppError::validation(
                "One-time events need a date".to_string(),
            ));
        }

        let event = self.schedule_repo.create_event(schedule_id, data).await?;
        info!(event_id = %event.id, schedule_id = %schedule_id, "Schedule event added");
        Ok(event)
    }

    /// Lists the events of a schedule in timetable order.
    pub async fn events(
        &self,
        ctx: &RequestContext,
        schedule_id: Uuid,
    ) -> Result<Vec<ScheduleEvent>, AppError> {
        self.get(ctx, schedule_id).await?;
        self.schedule_repo.events(schedule_id).await
    }

    /// Lists the events a schedule produces on one calendar date.
    pub async fn events_on(
        &self,
        ctx: &RequestContext,
        schedule_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleEvent>, AppError> {
        let all = self.events(ctx, schedule_id).await?;
        Ok(all.into_iter().filter(|e| e.occurs_on(date)).collect())
    }

    /// Removes a timetable event. School admin only.
    pub async fn remove_event(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> Result<(), AppError> {
        let event = self
            .schedule_repo
            .find_event_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Schedule event {event_id} not found")))?;
        let schedule = self.get(ctx, event.schedule_id).await?;
        self.policy
            .require_school_admin(&ctx.assignments, schedule.school_id)?;

        if !self.schedule_repo.remove_event(event_id).await? {
            return Err(AppError::conflict("Event is already removed".to_string()));
        }
        info!(event_id = %event_id, "Schedule event removed");
        Ok(())
    }
}
