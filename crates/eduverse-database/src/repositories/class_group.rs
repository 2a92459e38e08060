//! Class group and enrollment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use eduverse_core::error::{AppError, ErrorKind};
use eduverse_core::result::AppResult;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_entity::class_group::model::{ClassEnrollment, ClassGroup, CreateClassGroup};
use eduverse_entity::user::User;

/// Repository for class groups and student enrollments.
#[derive(Debug, Clone)]
pub struct ClassGroupRepository {
    pool: PgPool,
}

impl ClassGroupRepository {
    /// Create a new class group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a class group by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ClassGroup>> {
        sqlx::query_as::<_, ClassGroup>("SELECT * FROM class_groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find class group", e)
            })
    }

    /// List active class groups for a school.
    pub async fn find_by_school(
        &self,
        school_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ClassGroup>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM class_groups WHERE school_id = $1 AND is_active",
        )
        .bind(school_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count class groups", e)
        })?;

        let classes = sqlx::query_as::<_, ClassGroup>(
            "SELECT * FROM class_groups WHERE school_id = $1 AND is_active \
             ORDER BY name ASC LIMIT $2 OFFSET $3",
        )
        .bind(school_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list class groups", e)
        })?;

        Ok(PageResponse::new(
            classes,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a class group inside a school.
    pub async fn create(&self, school_id: Uuid, data: &CreateClassGroup) -> AppResult<ClassGroup> {
        sqlx::query_as::<_, ClassGroup>(
            "INSERT INTO class_groups (school_id, name, description, academic_year, max_students) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(school_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.academic_year)
        .bind(data.max_students)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create class group", e))
    }

    /// Deactivate a class group.
    pub async fn deactivate(&self, class_group_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE class_groups SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active",
        )
        .bind(class_group_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate class group", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Count active enrollments in a class.
    pub async fn count_active_enrollments(&self, class_group_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM class_enrollments WHERE class_group_id = $1 AND is_active",
        )
        .bind(class_group_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count enrollments", e)
        })
    }

    /// Enroll a student, enforcing the class capacity atomically.
    ///
    /// Locks the class row so concurrent enrollments cannot oversubscribe a
    /// full class. A student who previously left is reactivated.
    pub async fn enroll(
        &self,
        class_group_id: Uuid,
        student_id: Uuid,
    ) -> AppResult<ClassEnrollment> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let class = sqlx::query_as::<_, ClassGroup>(
            "SELECT * FROM class_groups WHERE id = $1 FOR UPDATE",
        )
        .bind(class_group_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock class group", e))?
        .ok_or_else(|| AppError::not_found(format!("Class group {class_group_id} not found")))?;

        if !class.is_active {
            return Err(AppError::validation("Class group is not active".to_string()));
        }

        let current: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM class_enrollments \
             WHERE class_group_id = $1 AND is_active AND student_id <> $2",
        )
        .bind(class_group_id)
        .bind(student_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count enrollments", e)
        })?;

        if !class.has_capacity(current) {
            return Err(AppError::conflict(format!(
                "Class group '{}' is full",
                class.name
            )));
        }

        let enrollment = sqlx::query_as::<_, ClassEnrollment>(
            "INSERT INTO class_enrollments (student_id, class_group_id) \
             VALUES ($1, $2) \
             ON CONFLICT (student_id, class_group_id) \
             DO UPDATE SET is_active = TRUE, left_at = NULL, joined_at = NOW() \
             RETURNING *",
        )
        .bind(student_id)
        .bind(class_group_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to enroll student", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit enrollment", e)
        })?;

        Ok(enrollment)
    }

    /// Remove a student from a class by deactivating the enrollment.
    pub async fn unenroll(&self, class_group_id: Uuid, student_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE class_enrollments SET is_active = FALSE, left_at = NOW() \
             WHERE class_group_id = $1 AND student_id = $2 AND is_active",
        )
        .bind(class_group_id)
        .bind(student_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unenroll student", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// List the active roster of a class.
    pub async fn roster(&self, class_group_id: Uuid) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u \
             JOIN class_enrollments ce ON ce.student_id = u.id \
             WHERE ce.class_group_id = $1 AND ce.is_active \
             ORDER BY u.last_name ASC, u.first_name ASC",
        )
        .bind(class_group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roster", e))
    }
}
