//! School repository implementation.

use std::collections::BTreeMap;

use sqlx::PgPool;
use uuid::Uuid;

use eduverse_core::error::{AppError, ErrorKind};
use eduverse_core::result::AppResult;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_entity::role::RoleName;
use eduverse_entity::school::model::{CreateSchool, School, UpdateSchool};
use eduverse_entity::school::settings::{SchoolSettings, UpdateSchoolSettings};
use eduverse_entity::school::statistics::SchoolStatistics;

/// Repository for school, settings, and statistics operations.
#[derive(Debug, Clone)]
pub struct SchoolRepository {
    pool: PgPool,
}

impl SchoolRepository {
    /// Create a new school repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a school by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<School>> {
        sqlx::query_as::<_, School>("SELECT * FROM schools WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find school", e))
    }

    /// Find an active school by its URL slug.
    ///
    /// Deactivated schools are hidden from the public slug lookup; fetch
    /// by id for admin views.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<School>> {
        sqlx::query_as::<_, School>("SELECT * FROM schools WHERE slug = $1 AND is_active")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find school by slug", e)
            })
    }

    /// Whether a slug is already taken.
    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schools WHERE slug = $1")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check slug", e))?;
        Ok(count > 0)
    }

    /// List schools with pagination.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<School>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schools")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count schools", e)
            })?;

        let schools = sqlx::query_as::<_, School>(
            "SELECT * FROM schools ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list schools", e))?;

        Ok(PageResponse::new(
            schools,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List schools owned or administered by a user.
    pub async fn find_for_admin(&self, user_id: Uuid) -> AppResult<Vec<School>> {
        sqlx::query_as::<_, School>(
            "SELECT DISTINCT s.* FROM schools s \
             JOIN role_assignments ra ON ra.school_id = s.id \
             WHERE ra.user_id = $1 AND ra.role = 'school_admin' AND ra.is_active \
             ORDER BY s.name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list administered schools", e)
        })
    }

    /// Create a school together with default settings and the owner's
    /// `school_admin` assignment, atomically.
    pub async fn create_with_defaults(
        &self,
        data: &CreateSchool,
        slug: &str,
        owner_id: Uuid,
    ) -> AppResult<School> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let school = sqlx::query_as::<_, School>(
            "INSERT INTO schools (name, slug, description, address, phone, email, website, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(slug)
        .bind(&data.description)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.website)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("schools_slug_key") =>
            {
                AppError::conflict(format!("School slug '{slug}' already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create school", e),
        })?;

        sqlx::query("INSERT INTO school_settings (school_id) VALUES ($1)")
            .bind(school.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create school settings", e)
            })?;

        sqlx::query(
            "INSERT INTO role_assignments (user_id, role, school_id, assigned_by) \
             VALUES ($1, $2, $3, $1)",
        )
        .bind(owner_id)
        .bind(RoleName::SchoolAdmin)
        .bind(school.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to assign school admin", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit school creation", e)
        })?;

        Ok(school)
    }

    /// Update a school's profile fields.
    pub async fn update(&self, school_id: Uuid, data: &UpdateSchool) -> AppResult<School> {
        sqlx::query_as::<_, School>(
            "UPDATE schools SET name = COALESCE($2, name), \
                                description = COALESCE($3, description), \
                                address = COALESCE($4, address), \
                                phone = COALESCE($5, phone), \
                                email = COALESCE($6, email), \
                                website = COALESCE($7, website), \
                                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(school_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.website)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update school", e))?
        .ok_or_else(|| AppError::not_found(format!("School {school_id} not found")))
    }

    /// Activate or deactivate a school.
    pub async fn set_active(&self, school_id: Uuid, is_active: bool) -> AppResult<School> {
        sqlx::query_as::<_, School>(
            "UPDATE schools SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(school_id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update school state", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("School {school_id} not found")))
    }

    /// Mark a school as verified by a platform admin.
    pub async fn mark_verified(&self, school_id: Uuid) -> AppResult<School> {
        sqlx::query_as::<_, School>(
            "UPDATE schools SET is_verified = TRUE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(school_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to verify school", e))?
        .ok_or_else(|| AppError::not_found(format!("School {school_id} not found")))
    }

    /// Fetch a school's settings row.
    pub async fn settings(&self, school_id: Uuid) -> AppResult<SchoolSettings> {
        sqlx::query_as::<_, SchoolSettings>("SELECT * FROM school_settings WHERE school_id = $1")
            .bind(school_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch school settings", e)
            })?
            .ok_or_else(|| {
                AppError::not_found(format!("Settings for school {school_id} not found"))
            })
    }

    /// Update a school's settings.
    pub async fn update_settings(
        &self,
        school_id: Uuid,
        data: &UpdateSchoolSettings,
    ) -> AppResult<SchoolSettings> {
        sqlx::query_as::<_, SchoolSettings>(
            "UPDATE school_settings SET timezone = COALESCE($2, timezone), \
                                        language = COALESCE($3, language), \
                                        currency = COALESCE($4, currency), \
                                        grading_system = COALESCE($5, grading_system), \
                                        payment_due_day = COALESCE($6, payment_due_day), \
                                        payment_reminder_days = COALESCE($7, payment_reminder_days), \
                                        chat_enabled = COALESCE($8, chat_enabled), \
                                        email_notifications = COALESCE($9, email_notifications), \
                                        updated_at = NOW() \
             WHERE school_id = $1 RETURNING *",
        )
        .bind(school_id)
        .bind(&data.timezone)
        .bind(&data.language)
        .bind(&data.currency)
        .bind(&data.grading_system)
        .bind(data.payment_due_day)
        .bind(data.payment_reminder_days)
        .bind(data.chat_enabled)
        .bind(data.email_notifications)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update school settings", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Settings for school {school_id} not found")))
    }

    /// Aggregate per-school counters for the admin dashboard.
    pub async fn statistics(&self, school_id: Uuid) -> AppResult<SchoolStatistics> {
        let role_rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT role::text, COUNT(DISTINCT user_id) FROM role_assignments \
             WHERE school_id = $1 AND is_active GROUP BY role",
        )
        .bind(school_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count users by role", e)
        })?;

        let subject_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM subjects WHERE school_id = $1 AND is_active",
        )
        .bind(school_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count subjects", e))?;

        let class_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM class_groups WHERE school_id = $1 AND is_active",
        )
        .bind(school_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count classes", e))?;

        let payment_rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT status::text, COUNT(*) FROM payments WHERE school_id = $1 GROUP BY status",
        )
        .bind(school_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count payments by status", e)
        })?;

        Ok(SchoolStatistics {
            users_by_role: role_rows.into_iter().collect::<BTreeMap<_, _>>(),
            subject_count,
            class_count,
            payments_by_status: payment_rows.into_iter().collect::<BTreeMap<_, _>>(),
        })
    }
}
