//! School lifecycle, settings, and statistics.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use eduverse_auth::policy::AuthorizationPolicy;
use eduverse_core::error::AppError;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_database::repositories::school::SchoolRepository;
use eduverse_entity::school::{
    CreateSchool, School, SchoolSettings, SchoolStatistics, UpdateSchool,
};
use eduverse_entity::school::settings::UpdateSchoolSettings;

use crate::context::RequestContext;
use crate::school::slug;

/// Handles school creation, settings, and admin views.
#[derive(Clone)]
pub struct SchoolService {
    /// School repository.
    school_repo: Arc<SchoolRepository>,
    /// Authorization policy.
    policy: Arc<AuthorizationPolicy>,
}

impl SchoolService {
    /// Creates a new school service.
    pub fn new(school_repo: Arc<SchoolRepository>, policy: Arc<AuthorizationPolicy>) -> Self {
        Self {
            school_repo,
            policy,
        }
    }

    /// Creates a school with default settings; the caller becomes its
    /// school admin. Platform admins only.
    ///
    /// The slug is derived from the name; a random suffix resolves
    /// collisions.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: &CreateSchool,
    ) -> Result<School, AppError> {
        self.policy.require_platform_admin(&ctx.assignments)?;

        if data.name.trim().is_empty() {
            return Err(AppError::validation("School name cannot be empty".to_string()));
        }

        let base = slug::slugify(&data.name);
        if base.is_empty() {
            return Err(AppError::validation(
                "School name must contain letters or digits".to_string(),
            ));
        }

        let candidate = if self.school_repo.slug_exists(&base).await? {
            format!("{base}-{}", slug::random_suffix())
        } else {
            base
        };

        let school = self
            .school_repo
            .create_with_defaults(data, &candidate, ctx.user_id())
            .await?;

        info!(school_id = %school.id, slug = %school.slug, owner = %ctx.user_id(), "School created");
        Ok(school)
    }

    /// Gets a school by ID.
    pub async fn get(&self, school_id: Uuid) -> Result<School, AppError> {
        self.school_repo
            .find_by_id(school_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("School {school_id} not found")))
    }

    /// Gets a school by slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<School, AppError> {
        self.school_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("School '{slug}' not found")))
    }

    /// Lists all schools. Platform admin only.
    pub async fn list_all(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<School>, AppError> {
        self.policy.require_platform_admin(&ctx.assignments)?;
        self.school_repo.find_all(page).await
    }

    /// Lists the schools the current user administers.
    pub async fn list_administered(&self, ctx: &RequestContext) -> Result<Vec<School>, AppError> {
        self.school_repo.find_for_admin(ctx.user_id()).await
    }

    /// Updates a school's profile. School admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        data: &UpdateSchool,
    ) -> Result<School, AppError> {
        self.policy
            .require_school_admin(&ctx.assignments, school_id)?;
        let school = self.school_repo.update(school_id, data).await?;
        info!(school_id = %school_id, updated_by = %ctx.user_id(), "School updated");
        Ok(school)
    }

    /// Activates or deactivates a school. Platform admin only.
    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        is_active: bool,
    ) -> Result<School, AppError> {
        self.policy.require_platform_admin(&ctx.assignments)?;
        let school = self.school_repo.set_active(school_id, is_active).await?;
        info!(school_id = %school_id, is_active, "School activation changed");
        Ok(school)
    }

    /// Marks a school as verified. Platform admin only.
    pub async fn verify(&self, ctx: &RequestContext, school_id: Uuid) -> Result<School, AppError> {
        self.policy.require_platform_admin(&ctx.assignments)?;
        let school = self.school_repo.mark_verified(school_id).await?;
        info!(school_id = %school_id, verified_by = %ctx.user_id(), "School verified");
        Ok(school)
    }

    /// Gets a school's settings. Any member of the school may read them.
    pub async fn settings(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
    ) -> Result<SchoolSettings, AppError> {
        self.require_membership(ctx, school_id)?;
        self.school_repo.settings(school_id).await
    }

    /// Updates a school's settings. School admin only.
    pub async fn update_settings(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        data: &UpdateSchoolSettings,
    ) -> Result<SchoolSettings, AppError> {
        self.policy
            .require_school_admin(&ctx.assignments, school_id)?;

        if let Some(day) = data.payment_due_day {
            if !(1..=28).contains(&day) {
                return Err(AppError::validation(
                    "Payment due day must be between 1 and 28".to_string(),
                ));
            }
        }

        let settings = self.school_repo.update_settings(school_id, data).await?;
        info!(school_id = %school_id, updated_by = %ctx.user_id(), "School settings updated");
        Ok(settings)
    }

    /// Aggregated school statistics. School admin only.
    pub async fn statistics(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
    ) -> Result<SchoolStatistics, AppError> {
        self.policy
            .require_school_admin(&ctx.assignments, school_id)?;
        self.school_repo.statistics(school_id).await
    }

    fn require_membership(&self, ctx: &RequestContext, school_id: Uuid) -> Result<(), AppError> {
        if self.policy.is_platform_admin(&ctx.assignments)
            || ctx.school_ids().contains(&school_id)
        {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Not a member of this school".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use eduverse_core::error::ErrorKind;
    use eduverse_entity::role::{RoleAssignment, RoleName};
    use eduverse_entity::user::User;

    use super::*;

    // A lazy pool never connects unless a query actually runs; these tests
    // only exercise checks that reject before reaching the repository.
    fn service() -> SchoolService {
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/unused")
            .expect("lazy pool");
        SchoolService::new(
            Arc::new(SchoolRepository::new(pool)),
            Arc::new(AuthorizationPolicy::new()),
        )
    }

    fn ctx_with_role(role: RoleName, school_id: Option<Uuid>) -> RequestContext {
        let user = User {
            id: Uuid::new_v4(),
            username: "boris".to_string(),
            email: "boris@example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Boris".to_string(),
            last_name: "Petrov".to_string(),
            middle_name: None,
            phone: None,
            is_active: true,
            is_verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let assignment = RoleAssignment {
            id: Uuid::new_v4(),
            user_id: user.id,
            role,
            school_id,
            is_active: true,
            assigned_by: None,
            assigned_at: Utc::now(),
        };
        RequestContext::new(user, vec![assignment])
    }

    fn create_data(name: &str) -> CreateSchool {
        CreateSchool {
            name: name.to_string(),
            description: None,
            address: None,
            phone: None,
            email: None,
            website: None,
        }
    }

    #[tokio::test]
    async fn create_requires_platform_admin() {
        let service = service();
        let ctx = ctx_with_role(RoleName::Student, None);
        let err = service
            .create(&ctx, &create_data("Hilltop Academy"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn school_admin_cannot_create_schools() {
        let service = service();
        let ctx = ctx_with_role(RoleName::SchoolAdmin, Some(Uuid::new_v4()));
        let err = service
            .create(&ctx, &create_data("Hilltop Academy"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
