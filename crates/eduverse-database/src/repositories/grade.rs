//! Grade repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use eduverse_core::error::{AppError, ErrorKind};
use eduverse_core::result::AppResult;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_entity::grade::{CreateGrade, Grade};

/// Repository for grade CRUD and aggregate queries.
#[derive(Debug, Clone)]
pub struct GradeRepository {
    pool: PgPool,
}

impl GradeRepository {
    /// Create a new grade repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a grade by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Grade>> {
        sqlx::query_as::<_, Grade>("SELECT * FROM grades WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find grade", e))
    }

    /// Issue a grade.
    pub async fn create(&self, data: &CreateGrade) -> AppResult<Grade> {
        sqlx::query_as::<_, Grade>(
            "INSERT INTO grades (student_id, subject_id, teacher_id, value, grade_type, comment, date_given) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(data.student_id)
        .bind(data.subject_id)
        .bind(data.teacher_id)
        .bind(data.value)
        .bind(data.grade_type)
        .bind(&data.comment)
        .bind(data.date_given)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create grade", e))
    }

    /// Correct a grade's value and comment.
    pub async fn update(
        &self,
        grade_id: Uuid,
        value: i32,
        comment: Option<&str>,
    ) -> AppResult<Grade> {
        sqlx::query_as::<_, Grade>(
            "UPDATE grades SET value = $2, comment = COALESCE($3, comment), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(grade_id)
        .bind(value)
        .bind(comment)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update grade", e))?
        .ok_or_else(|| AppError::not_found(format!("Grade {grade_id} not found")))
    }

    /// Delete a grade.
    pub async fn delete(&self, grade_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
            .bind(grade_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete grade", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// List a student's grades, newest first, optionally scoped to a subject.
    pub async fn find_by_student(
        &self,
        student_id: Uuid,
        subject_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Grade>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM grades \
             WHERE student_id = $1 AND ($2::uuid IS NULL OR subject_id = $2)",
        )
        .bind(student_id)
        .bind(subject_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count grades", e))?;

        let grades = sqlx::query_as::<_, Grade>(
            "SELECT * FROM grades \
             WHERE student_id = $1 AND ($2::uuid IS NULL OR subject_id = $2) \
             ORDER BY date_given DESC, created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(student_id)
        .bind(subject_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list grades", e))?;

        Ok(PageResponse::new(
            grades,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List grades a teacher issued within one subject.
    pub async fn find_by_teacher_subject(
        &self,
        teacher_id: Uuid,
        subject_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Grade>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM grades WHERE teacher_id = $1 AND subject_id = $2",
        )
        .bind(teacher_id)
        .bind(subject_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count grades", e))?;

        let grades = sqlx::query_as::<_, Grade>(
            "SELECT * FROM grades WHERE teacher_id = $1 AND subject_id = $2 \
             ORDER BY date_given DESC, created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(teacher_id)
        .bind(subject_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list grades", e))?;

        Ok(PageResponse::new(
            grades,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Average grade value for a student, optionally scoped to a subject.
    ///
    /// Returns `None` when the student has no grades in scope.
    pub async fn average_for_student(
        &self,
        student_id: Uuid,
        subject_id: Option<Uuid>,
    ) -> AppResult<Option<f64>> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(value)::float8 FROM grades \
             WHERE student_id = $1 AND ($2::uuid IS NULL OR subject_id = $2)",
        )
        .bind(student_id)
        .bind(subject_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to average grades", e))
    }
}
