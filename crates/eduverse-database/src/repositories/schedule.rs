//! Schedule repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use eduverse_core::error::{AppError, ErrorKind};
use eduverse_core::result::AppResult;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_entity::schedule::event::{CreateScheduleEvent, ScheduleEvent};
use eduverse_entity::schedule::model::Schedule;

/// Repository for schedules and their timetable events.
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Create a new schedule repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a schedule by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Schedule>> {
        sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find schedule", e))
    }

    /// List active schedules for a school.
    pub async fn find_by_school(
        &self,
        school_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Schedule>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM schedules WHERE school_id = $1 AND is_active",
        )
        .bind(school_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count schedules", e))?;

        let schedules = sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedules WHERE school_id = $1 AND is_active \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(school_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list schedules", e))?;

        Ok(PageResponse::new(
            schedules,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a schedule inside a school.
    pub async fn create(
        &self,
        school_id: Uuid,
        name: &str,
        description: Option<&str>,
        academic_year: Option<&str>,
    ) -> AppResult<Schedule> {
        sqlx::query_as::<_, Schedule>(
            "INSERT INTO schedules (school_id, name, description, academic_year) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(school_id)
        .bind(name)
        .bind(description)
        .bind(academic_year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create schedule", e))
    }

    /// Deactivate a schedule.
    pub async fn deactivate(&self, schedule_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE schedules SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active",
        )
        .bind(schedule_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate schedule", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Add a timetable event to a schedule.
    pub async fn create_event(
        &self,
        schedule_id: Uuid,
        data: &CreateScheduleEvent,
    ) -> AppResult<ScheduleEvent> {
        sqlx::query_as::<_, ScheduleEvent>(
            "INSERT INTO schedule_events \
             (schedule_id, title, description, event_type, day_of_week, start_time, end_time, \
              start_date, is_recurring, subject_id, class_group_id, teacher_id, room) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING *",
        )
        .bind(schedule_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.event_type)
        .bind(data.day_of_week)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.start_date)
        .bind(data.is_recurring)
        .bind(data.subject_id)
        .bind(data.class_group_id)
        .bind(data.teacher_id)
        .bind(&data.room)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create schedule event", e)
        })
    }

    /// Find a timetable event by primary key.
    pub async fn find_event_by_id(&self, id: Uuid) -> AppResult<Option<ScheduleEvent>> {
        sqlx::query_as::<_, ScheduleEvent>("SELECT * FROM schedule_events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find schedule event", e)
            })
    }

    /// List the active events of a schedule in timetable order.
    pub async fn events(&self, schedule_id: Uuid) -> AppResult<Vec<ScheduleEvent>> {
        sqlx::query_as::<_, ScheduleEvent>(
            "SELECT * FROM schedule_events WHERE schedule_id = $1 AND is_active \
             ORDER BY day_of_week ASC, start_time ASC",
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list schedule events", e)
        })
    }

    /// Remove a timetable event by deactivating it.
    pub async fn remove_event(&self, event_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE schedule_events SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active",
        )
        .bind(event_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to remove schedule event", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
