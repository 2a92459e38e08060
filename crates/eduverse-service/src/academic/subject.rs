//! Subject management within a school.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use eduverse_auth::policy::AuthorizationPolicy;
use eduverse_core::error::AppError;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_database::repositories::subject::SubjectRepository;
use eduverse_entity::role::RoleName;
use eduverse_entity::subject::{CreateSubject, Subject};

use crate::context::RequestContext;

/// Handles the subject catalog of a school.
#[derive(Clone)]
pub struct SubjectService {
    /// Subject repository.
    subject_repo: Arc<SubjectRepository>,
    /// Authorization policy.
    policy: Arc<AuthorizationPolicy>,
}

impl SubjectService {
    /// Creates a new subject service.
    pub fn new(subject_repo: Arc<SubjectRepository>, policy: Arc<AuthorizationPolicy>) -> Self {
        Self {
            subject_repo,
            policy,
        }
    }

    /// Lists a school's active subjects. Any member may read.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<Subject>, AppError> {
        self.policy
            .require_role_at_least(&ctx.assignments, school_id, RoleName::Parent)?;
        self.subject_repo.find_by_school(school_id, page).await
    }

    /// Gets a subject by ID, checking school membership.
    pub async fn get(&self, ctx: &RequestContext, subject_id: Uuid) -> Result<Subject, AppError> {
        let subject = self
            .subject_repo
            .find_by_id(subject_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Subject {subject_id} not found")))?;
        self.policy
            .require_role_at_least(&ctx.assignments, subject.school_id, RoleName::Parent)?;
        Ok(subject)
    }

    /// Creates a subject. School admin only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        data: &CreateSubject,
    ) -> Result<Subject, AppError> {
        self.policy
            .require_school_admin(&ctx.assignments, school_id)?;

        if data.name.trim().is_empty() {
            return Err(AppError::validation("Subject name cannot be empty".to_string()));
        }
        if let Some(color) = &data.color {
            validate_color(color)?;
        }

        let subject = self.subject_repo.create(school_id, data).await?;
        info!(subject_id = %subject.id, school_id = %school_id, "Subject created");
        Ok(subject)
    }

    /// Updates a subject. School admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        subject_id: Uuid,
        data: &CreateSubject,
    ) -> Result<Subject, AppError> {
        let existing = self.get(ctx, subject_id).await?;
        self.policy
            .require_school_admin(&ctx.assignments, existing.school_id)?;

        if data.name.trim().is_empty() {
            return Err(AppError::validation("Subject name cannot be empty".to_string()));
        }
        if let Some(color) = &data.color {
            validate_color(color)?;
        }

        self.subject_repo.update(subject_id, data).await
    }

    /// Deactivates a subject. School admin only.
    pub async fn remove(&self, ctx: &RequestContext, subject_id: Uuid) -> Result<(), AppError> {
        let existing = self.get(ctx, subject_id).await?;
        self.policy
            .require_school_admin(&ctx.assignments, existing.school_id)?;

        if !self.subject_repo.deactivate(subject_id).await? {
            return Err(AppError::conflict("Subject is already inactive".to_string()));
        }
        info!(subject_id = %subject_id, removed_by = %ctx.user_id(), "Subject deactivated");
        Ok(())
    }
}

fn validate_color(color: &str) -> Result<(), AppError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Color '{color}' must be a #rrggbb hex value"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_validation() {
        assert!(validate_color("#007bff").is_ok());
        assert!(validate_color("#ABCDEF").is_ok());
        assert!(validate_color("007bff").is_err());
        assert!(validate_color("#xyzxyz").is_err());
        assert!(validate_color("#fff").is_err());
    }
}
