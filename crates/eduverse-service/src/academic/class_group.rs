//! Class group and enrollment management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use eduverse_auth::policy::AuthorizationPolicy;
use eduverse_core::error::AppError;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_database::repositories::class_group::ClassGroupRepository;
use eduverse_database::repositories::role::RoleRepository;
use eduverse_entity::class_group::{ClassEnrollment, ClassGroup, CreateClassGroup};
use eduverse_entity::role::RoleName;
use eduverse_entity::user::User;

use crate::context::RequestContext;

/// Handles class groups and student enrollment.
#[derive(Clone)]
pub struct ClassGroupService {
    /// Class group repository.
    class_repo: Arc<ClassGroupRepository>,
    /// Role assignment repository.
    role_repo: Arc<RoleRepository>,
    /// Authorization policy.
    policy: Arc<AuthorizationPolicy>,
}

impl ClassGroupService {
    /// Creates a new class group service.
    pub fn new(
        class_repo: Arc<ClassGroupRepository>,
        role_repo: Arc<RoleRepository>,
        policy: Arc<AuthorizationPolicy>,
    ) -> Self {
        Self {
            class_repo,
            role_repo,
            policy,
        }
    }

    /// Lists a school's active class groups. Any member may read.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<ClassGroup>, AppError> {
        self.policy
            .require_role_at_least(&ctx.assignments, school_id, RoleName::Parent)?;
        self.class_repo.find_by_school(school_id, page).await
    }

    /// Gets a class group by ID, checking school membership.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        class_group_id: Uuid,
    ) -> Result<ClassGroup, AppError> {
        let class = self
            .class_repo
            .find_by_id(class_group_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Class group {class_group_id} not found"))
            })?;
        self.policy
            .require_role_at_least(&ctx.assignments, class.school_id, RoleName::Parent)?;
        Ok(class)
    }

    /// Creates a class group. School admin only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        data: &CreateClassGroup,
    ) -> Result<ClassGroup, AppError> {
        self.policy
            .require_school_admin(&ctx.assignments, school_id)?;

        if data.name.trim().is_empty() {
            return Err(AppError::validation("Class name cannot be empty".to_string()));
        }
        if let Some(max) = data.max_students {
            if max <= 0 {
                return Err(AppError::validation(
                    "Maximum roster size must be positive".to_string(),
                ));
            }
        }

        let class = self.class_repo.create(school_id, data).await?;
        info!(class_group_id = %class.id, school_id = %school_id, "Class group created");
        Ok(class)
    }

    /// Deactivates a class group. School admin only.
    pub async fn remove(
        &self,
        ctx: &RequestContext,
        class_group_id: Uuid,
    ) -> Result<(), AppError> {
        let class = self.get(ctx, class_group_id).await?;
        self.policy
            .require_school_admin(&ctx.assignments, class.school_id)?;

        if !self.class_repo.deactivate(class_group_id).await? {
            return Err(AppError::conflict(
                "Class group is already inactive".to_string(),
            ));
        }
        info!(class_group_id = %class_group_id, "Class group deactivated");
        Ok(())
    }

    /// Enrolls a student into a class.
    ///
    /// Requires school-admin standing; the student must hold the `student`
    /// role in the class's school. Capacity is enforced in the repository
    /// under a row lock.
    pub async fn enroll(
        &self,
        ctx: &RequestContext,
        class_group_id: Uuid,
        student_id: Uuid,
    ) -> Result<ClassEnrollment, AppError> {
        let class = self.get(ctx, class_group_id).await?;
        self.policy
            .require_school_admin(&ctx.assignments, class.school_id)?;

        let student_roles = self.role_repo.find_active_for_user(student_id).await?;
        let is_student = student_roles
            .iter()
            .any(|a| a.role == RoleName::Student && a.applies_to(class.school_id));
        if !is_student {
            return Err(AppError::validation(
                "User is not a student of this school".to_string(),
            ));
        }

        let enrollment = self.class_repo.enroll(class_group_id, student_id).await?;
        info!(
            class_group_id = %class_group_id,
            student_id = %student_id,
            enrolled_by = %ctx.user_id(),
            "Student enrolled"
        );
        Ok(enrollment)
    }

    /// Removes a student from a class. School admin only.
    pub async fn unenroll(
        &self,
        ctx: &RequestContext,
        class_group_id: Uuid,
        student_id: Uuid,
    ) -> Result<(), AppError> {
        let class = self.get(ctx, class_group_id).await?;
        self.policy
            .require_school_admin(&ctx.assignments, class.school_id)?;

        if !self.class_repo.unenroll(class_group_id, student_id).await? {
            return Err(AppError::not_found(
                "Student is not enrolled in this class".to_string(),
            ));
        }
        info!(class_group_id = %class_group_id, student_id = %student_id, "Student unenrolled");
        Ok(())
    }

    /// Lists the active roster of a class. Teacher standing or above.
    pub async fn roster(
        &self,
        ctx: &RequestContext,
        class_group_id: Uuid,
    ) -> Result<Vec<User>, AppError> {
        let class = self.get(ctx, class_group_id).await?;
        self.policy
            .require_role_at_least(&ctx.assignments, class.school_id, RoleName::Teacher)?;
        self.class_repo.roster(class_group_id).await
    }
}
