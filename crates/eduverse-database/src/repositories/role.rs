//! Role catalog and assignment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use eduverse_core::error::{AppError, ErrorKind};
use eduverse_core::result::AppResult;
use eduverse_entity::role::{NewRoleAssignment, Role, RoleAssignment};

/// Repository for the role catalog and user-role assignments.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the fixed role catalog, highest priority first.
    pub async fn catalog(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY priority DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list role catalog", e)
            })
    }

    /// List a user's active role assignments.
    pub async fn find_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<RoleAssignment>> {
        sqlx::query_as::<_, RoleAssignment>(
            "SELECT * FROM role_assignments WHERE user_id = $1 AND is_active \
             ORDER BY assigned_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list role assignments", e)
        })
    }

    /// Find an assignment by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RoleAssignment>> {
        sqlx::query_as::<_, RoleAssignment>("SELECT * FROM role_assignments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find role assignment", e)
            })
    }

    /// Grant a role to a user.
    ///
    /// The partial unique index rejects a second active assignment of the
    /// same (user, role, school) triple.
    pub async fn assign(&self, data: &NewRoleAssignment) -> AppResult<RoleAssignment> {
        sqlx::query_as::<_, RoleAssignment>(
            "INSERT INTO role_assignments (user_id, role, school_id, assigned_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.role)
        .bind(data.school_id)
        .bind(data.assigned_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("idx_role_assignments_unique_active") =>
            {
                AppError::conflict("Role is already assigned to this user".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to assign role", e),
        })
    }

    /// Revoke an assignment by deactivating it.
    ///
    /// Returns `false` when the assignment does not exist or is already
    /// inactive.
    pub async fn revoke(&self, assignment_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE role_assignments SET is_active = FALSE WHERE id = $1 AND is_active",
        )
        .bind(assignment_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke role", e))?;

        Ok(result.rows_affected() > 0)
    }
}
