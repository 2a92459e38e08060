//! Database migration runner and role-catalog seeding.

use sqlx::PgPool;
use tracing::info;

use eduverse_core::error::{AppError, ErrorKind};
use eduverse_entity::role::RoleName;

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Insert the fixed role catalog, skipping roles that already exist.
///
/// Safe to call on every startup.
pub async fn seed_roles(pool: &PgPool) -> Result<(), AppError> {
    for role in RoleName::all() {
        sqlx::query(
            "INSERT INTO roles (name, description, priority) VALUES ($1, $2, $3) \
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(role)
        .bind(role_description(role))
        .bind(role.priority())
        .execute(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed roles", e))?;
    }

    info!("Role catalog seeded");
    Ok(())
}

fn role_description(role: RoleName) -> &'static str {
    match role {
        RoleName::SuperAdmin => "Platform owner with unrestricted access",
        RoleName::ProjectAdmin => "Platform operator managing schools",
        RoleName::SchoolAdmin => "Administrator of a single school",
        RoleName::Teacher => "Teaching staff member",
        RoleName::Student => "Enrolled student",
        RoleName::Parent => "Parent or guardian of a student",
    }
}
