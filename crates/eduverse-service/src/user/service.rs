//! User self-service and directory operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use eduverse_auth::policy::AuthorizationPolicy;
use eduverse_core::error::AppError;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_database::repositories::role::RoleRepository;
use eduverse_database::repositories::user::UserRepository;
use eduverse_entity::role::{NewRoleAssignment, RoleAssignment, RoleName};
use eduverse_entity::user::{UpdateProfile, User};

use crate::context::RequestContext;

/// Handles user profiles, the school directory, and role grants.
#[derive(Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Role assignment repository.
    role_repo: Arc<RoleRepository>,
    /// Authorization policy.
    policy: Arc<AuthorizationPolicy>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        policy: Arc<AuthorizationPolicy>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            policy,
        }
    }

    /// Gets a user's profile.
    ///
    /// Everyone may load their own profile; loading someone else's requires
    /// sharing a school with them or platform-admin standing.
    pub async fn get_profile(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        if user_id == ctx.user_id() || self.policy.is_platform_admin(&ctx.assignments) {
            return Ok(user);
        }

        let target_assignments = self.role_repo.find_active_for_user(user_id).await?;
        let shares_school = ctx.school_ids().iter().any(|school| {
            target_assignments
                .iter()
                .any(|a| a.school_id == Some(*school))
        });
        if !shares_school {
            return Err(AppError::authorization(
                "No shared school with this user".to_string(),
            ));
        }
        Ok(user)
    }

    /// Updates the current user's own profile fields.
    pub async fn update_own_profile(
        &self,
        ctx: &RequestContext,
        data: &UpdateProfile,
    ) -> Result<User, AppError> {
        if let Some(first_name) = &data.first_name {
            if first_name.trim().is_empty() {
                return Err(AppError::validation("First name cannot be empty".to_string()));
            }
        }
        if let Some(last_name) = &data.last_name {
            if last_name.trim().is_empty() {
                return Err(AppError::validation("Last name cannot be empty".to_string()));
            }
        }

        let user = self.user_repo.update_profile(ctx.user_id(), data).await?;
        info!(user_id = %ctx.user_id(), "Profile updated");
        Ok(user)
    }

    /// Lists members of a school, optionally filtered by role.
    ///
    /// Requires at least teacher standing in the school.
    pub async fn list_school_members(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        role: Option<RoleName>,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.policy
            .require_role_at_least(&ctx.assignments, school_id, RoleName::Teacher)?;
        self.user_repo
            .find_by_school_role(school_id, role, page)
            .await
    }

    /// Lists a user's active role assignments.
    pub async fn list_roles(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<Vec<RoleAssignment>, AppError> {
        if user_id != ctx.user_id() && !self.policy.is_platform_admin(&ctx.assignments) {
            // School admins may inspect members of their own schools.
            let target = self.role_repo.find_active_for_user(user_id).await?;
            let allowed = target.iter().filter_map(|a| a.school_id).any(|school| {
                self.policy
                    .require_school_admin(&ctx.assignments, school)
                    .is_ok()
            });
            if !allowed {
                return Err(AppError::authorization(
                    "Cannot inspect this user's roles".to_string(),
                ));
            }
        }
        self.role_repo.find_active_for_user(user_id).await
    }

    /// Grants a role to a user.
    ///
    /// Platform roles require platform-admin standing; school roles require
    /// school-admin standing in the target school. Nobody can grant a role
    /// above their own highest priority.
    pub async fn grant_role(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        role: RoleName,
        school_id: Option<Uuid>,
    ) -> Result<RoleAssignment, AppError> {
        if !role.accepts_school_scope(school_id.is_some()) {
            return Err(AppError::validation(if role.is_platform() {
                format!("Role '{role}' is platform-wide and takes no school")
            } else {
                format!("Role '{role}' requires a school scope")
            }));
        }

        match school_id {
            None => self.policy.require_platform_admin(&ctx.assignments)?,
            Some(school) => {
                self.policy.require_school_admin(&ctx.assignments, school)?;
                let own_best = if self.policy.is_platform_admin(&ctx.assignments) {
                    i32::MAX
                } else {
                    self.policy
                        .max_priority_in_school(&ctx.assignments, school)
                        .unwrap_or(0)
                };
                if role.priority() > own_best {
                    return Err(AppError::authorization(format!(
                        "Cannot grant role '{role}' above your own standing"
                    )));
                }
            }
        }

        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }

        let assignment = self
            .role_repo
            .assign(&NewRoleAssignment {
                user_id,
                role,
                school_id,
                assigned_by: Some(ctx.user_id()),
            })
            .await?;

        info!(
            user_id = %user_id,
            role = %role,
            school_id = ?school_id,
            granted_by = %ctx.user_id(),
            "Role granted"
        );
        Ok(assignment)
    }

    /// Revokes a role assignment.
    pub async fn revoke_role(
        &self,
        ctx: &RequestContext,
        assignment_id: Uuid,
    ) -> Result<(), AppError> {
        let assignment = self
            .role_repo
            .find_by_id(assignment_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Role assignment {assignment_id} not found"))
            })?;

        match assignment.school_id {
            None => self.policy.require_platform_admin(&ctx.assignments)?,
            Some(school) => self.policy.require_school_admin(&ctx.assignments, school)?,
        }

        if !self.role_repo.revoke(assignment_id).await? {
            return Err(AppError::conflict(
                "Role assignment is already inactive".to_string(),
            ));
        }

        info!(
            assignment_id = %assignment_id,
            revoked_by = %ctx.user_id(),
            "Role revoked"
        );
        Ok(())
    }

    /// Searches users by name, username, or email. Platform admin only.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        query: &str,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.policy.require_platform_admin(&ctx.assignments)?;
        self.user_repo.search(query, page).await
    }
}
