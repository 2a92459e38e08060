//! Subject repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use eduverse_core::error::{AppError, ErrorKind};
use eduverse_core::result::AppResult;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_entity::subject::{CreateSubject, Subject};

/// Repository for subject CRUD operations.
#[derive(Debug, Clone)]
pub struct SubjectRepository {
    pool: PgPool,
}

impl SubjectRepository {
    /// Create a new subject repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a subject by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Subject>> {
        sqlx::query_as::<_, Subject>("SELECT * FROM subjects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find subject", e))
    }

    /// List active subjects for a school.
    pub async fn find_by_school(
        &self,
        school_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Subject>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM subjects WHERE school_id = $1 AND is_active",
        )
        .bind(school_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count subjects", e))?;

        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT * FROM subjects WHERE school_id = $1 AND is_active \
             ORDER BY name ASC LIMIT $2 OFFSET $3",
        )
        .bind(school_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list subjects", e))?;

        Ok(PageResponse::new(
            subjects,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a subject inside a school.
    pub async fn create(&self, school_id: Uuid, data: &CreateSubject) -> AppResult<Subject> {
        sqlx::query_as::<_, Subject>(
            "INSERT INTO subjects (school_id, name, code, description, color) \
             VALUES ($1, $2, $3, $4, COALESCE($5, '#007bff')) \
             RETURNING *",
        )
        .bind(school_id)
        .bind(&data.name)
        .bind(&data.code)
        .bind(&data.description)
        .bind(&data.color)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create subject", e))
    }

    /// Update a subject's fields.
    pub async fn update(&self, subject_id: Uuid, data: &CreateSubject) -> AppResult<Subject> {
        sqlx::query_as::<_, Subject>(
            "UPDATE subjects SET name = $2, \
                                 code = COALESCE($3, code), \
                                 description = COALESCE($4, description), \
                                 color = COALESCE($5, color), \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(subject_id)
        .bind(&data.name)
        .bind(&data.code)
        .bind(&data.description)
        .bind(&data.color)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update subject", e))?
        .ok_or_else(|| AppError::not_found(format!("Subject {subject_id} not found")))
    }

    /// Deactivate a subject.
    pub async fn deactivate(&self, subject_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE subjects SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active",
        )
        .bind(subject_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate subject", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
