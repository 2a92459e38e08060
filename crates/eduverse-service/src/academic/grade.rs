//! Grade issuing and the grade book.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use eduverse_auth::policy::AuthorizationPolicy;
use eduverse_core::error::AppError;
use eduverse_core::events::{DomainEvent, EventPayload, NotificationEvent};
use eduverse_core::traits::EventPublisher;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_database::repositories::grade::GradeRepository;
use eduverse_database::repositories::notification::NotificationRepository;
use eduverse_database::repositories::role::RoleRepository;
use eduverse_database::repositories::subject::SubjectRepository;
use eduverse_entity::grade::{self, CreateGrade, Grade, GradeType};
use eduverse_entity::notification::{CreateNotification, NotificationKind};
use eduverse_entity::role::RoleName;

use crate::context::RequestContext;

/// Handles issuing grades and reading the grade book.
#[derive(Clone)]
pub struct GradeService {
    /// Grade repository.
    grade_repo: Arc<GradeRepository>,
    /// Subject repository (to resolve the school scope).
    subject_repo: Arc<SubjectRepository>,
    /// Notification repository for grade notices.
    notification_repo: Arc<NotificationRepository>,
    /// Role repository (to resolve the student's schools on reads).
    role_repo: Arc<RoleRepository>,
    /// Authorization policy.
    policy: Arc<AuthorizationPolicy>,
    /// Domain event publisher.
    publisher: Arc<dyn EventPublisher>,
}

impl GradeService {
    /// Creates a new grade service.
    pub fn new(
        grade_repo: Arc<GradeRepository>,
        subject_repo: Arc<SubjectRepository>,
        notification_repo: Arc<NotificationRepository>,
        role_repo: Arc<RoleRepository>,
        policy: Arc<AuthorizationPolicy>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            grade_repo,
            subject_repo,
            notification_repo,
            role_repo,
            policy,
            publisher,
        }
    }

    /// Issues a grade to a student.
    ///
    /// The caller must hold teacher standing in the subject's school and
    /// becomes the grade's teacher of record. The student is notified after
    /// the grade is committed.
    pub async fn issue(
        &self,
        ctx: &RequestContext,
        subject_id: Uuid,
        student_id: Uuid,
        value: i32,
        grade_type: GradeType,
        comment: Option<String>,
        date_given: chrono::NaiveDate,
    ) -> Result<Grade, AppError> {
        grade::validate_value(value)?;

        let subject = self
            .subject_repo
            .find_by_id(subject_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Subject {subject_id} not found")))?;
        self.policy
            .require_role_at_least(&ctx.assignments, subject.school_id, RoleName::Teacher)?;

        let created = self
            .grade_repo
            .create(&CreateGrade {
                student_id,
                subject_id,
                teacher_id: ctx.user_id(),
                value,
                grade_type,
                comment,
                date_given,
            })
            .await?;

        info!(
            grade_id = %created.id,
            student_id = %student_id,
            subject_id = %subject_id,
            value,
            "Grade issued"
        );

        self.notify_student(ctx, &created, &subject.name).await;
        Ok(created)
    }

    /// Corrects a grade's value and comment.
    ///
    /// Allowed for the issuing teacher and for school admins.
    pub async fn correct(
        &self,
        ctx: &RequestContext,
        grade_id: Uuid,
        value: i32,
        comment: Option<String>,
    ) -> Result<Grade, AppError> {
        grade::validate_value(value)?;
        let existing = self.load_for_write(ctx, grade_id).await?;

        let updated = self
            .grade_repo
            .update(existing.id, value, comment.as_deref())
            .await?;
        info!(grade_id = %grade_id, corrected_by = %ctx.user_id(), "Grade corrected");
        Ok(updated)
    }

    /// Deletes a grade. Issuing teacher or school admin.
    pub async fn delete(&self, ctx: &RequestContext, grade_id: Uuid) -> Result<(), AppError> {
        let existing = self.load_for_write(ctx, grade_id).await?;

        if !self.grade_repo.delete(existing.id).await? {
            return Err(AppError::not_found(format!("Grade {grade_id} not found")));
        }
        info!(grade_id = %grade_id, deleted_by = %ctx.user_id(), "Grade deleted");
        Ok(())
    }

    /// Lists a student's grades.
    ///
    /// Students see their own; staff need teacher standing in one of the
    /// schools the student actually belongs to.
    pub async fn list_for_student(
        &self,
        ctx: &RequestContext,
        student_id: Uuid,
        subject_id: Option<Uuid>,
        page: &PageRequest,
    ) -> Result<PageResponse<Grade>, AppError> {
        self.require_student_read(ctx, student_id).await?;
        self.grade_repo
            .find_by_student(student_id, subject_id, page)
            .await
    }

    /// Average grade for a student, optionally per subject.
    pub async fn average_for_student(
        &self,
        ctx: &RequestContext,
        student_id: Uuid,
        subject_id: Option<Uuid>,
    ) -> Result<Option<f64>, AppError> {
        self.require_student_read(ctx, student_id).await?;
        self.grade_repo
            .average_for_student(student_id, subject_id)
            .await
    }

    async fn load_for_write(
        &self,
        ctx: &RequestContext,
        grade_id: Uuid,
    ) -> Result<Grade, AppError> {
        let existing = self
            .grade_repo
            .find_by_id(grade_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Grade {grade_id} not found")))?;

        if existing.teacher_id == ctx.user_id() {
            return Ok(existing);
        }

        let subject = self
            .subject_repo
            .find_by_id(existing.subject_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Subject {} not found", existing.subject_id))
            })?;
        self.policy
            .require_school_admin(&ctx.assignments, subject.school_id)?;
        Ok(existing)
    }

    async fn require_student_read(
        &self,
        ctx: &RequestContext,
        student_id: Uuid,
    ) -> Result<(), AppError> {
        if student_id == ctx.user_id() || self.policy.is_platform_admin(&ctx.assignments) {
            return Ok(());
        }
        // Staff: teacher standing in a school the student belongs to.
        let student_assignments = self.role_repo.find_active_for_user(student_id).await?;
        if self.policy.shares_school_at_least(
            &ctx.assignments,
            &student_assignments,
            RoleName::Teacher,
        ) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Cannot read this student's grades".to_string(),
            ))
        }
    }

    /// Best-effort grade notice; failure never rolls back the grade.
    async fn notify_student(&self, ctx: &RequestContext, created: &Grade, subject_name: &str) {
        let notification = CreateNotification {
            user_id: created.student_id,
            sender_id: Some(ctx.user_id()),
            school_id: None,
            title: format!("New grade in {subject_name}"),
            message: format!("You received a {} ({})", created.value, created.letter()),
            kind: NotificationKind::Info,
            is_important: false,
            requires_action: false,
            action_url: None,
            action_text: None,
            expires_at: None,
        };

        match self.notification_repo.create(&notification).await {
            Ok(saved) => {
                self.publisher
                    .publish(DomainEvent::new(
                        Some(ctx.user_id()),
                        EventPayload::Notification(NotificationEvent::Created {
                            notification_id: saved.id,
                            user_id: saved.user_id,
                            title: saved.title.clone(),
                            message: saved.message.clone(),
                            kind: saved.kind.as_str().to_string(),
                            created_at: saved.created_at,
                        }),
                    ))
                    .await;
            }
            Err(e) => {
                tracing::warn!(error = %e, grade_id = %created.id, "Failed to create grade notice");
            }
        }
    }
}
