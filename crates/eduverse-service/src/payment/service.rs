//! Payment obligations and received sums.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use eduverse_auth::policy::AuthorizationPolicy;
use eduverse_core::error::AppError;
use eduverse_core::events::{DomainEvent, EventPayload, NotificationEvent};
use eduverse_core::traits::EventPublisher;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_database::repositories::notification::NotificationRepository;
use eduverse_database::repositories::payment::PaymentRepository;
use eduverse_database::repositories::role::RoleRepository;
use eduverse_entity::notification::{CreateNotification, NotificationKind};
use eduverse_entity::payment::{CreatePayment, Payment, PaymentStatus};
use eduverse_entity::role::RoleName;

use crate::context::RequestContext;

/// Handles payment obligations within a school.
#[derive(Clone)]
pub struct PaymentService {
    /// Payment repository.
    payment_repo: Arc<PaymentRepository>,
    /// Notification repository for payment notices.
    notification_repo: Arc<NotificationRepository>,
    /// Role repository (to resolve the student's schools on reads).
    role_repo: Arc<RoleRepository>,
    /// Authorization policy.
    policy: Arc<AuthorizationPolicy>,
    /// Domain event publisher.
    publisher: Arc<dyn EventPublisher>,
}

impl PaymentService {
    /// Creates a new payment service.
    pub fn new(
        payment_repo: Arc<PaymentRepository>,
        notification_repo: Arc<NotificationRepository>,
        role_repo: Arc<RoleRepository>,
        policy: Arc<AuthorizationPolicy>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            payment_repo,
            notification_repo,
            role_repo,
            policy,
            publisher,
        }
    }

    /// Creates a payment obligation for a student. School admin only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: &CreatePayment,
    ) -> Result<Payment, AppError> {
        self.policy
            .require_school_admin(&ctx.assignments, data.school_id)?;

        if data.amount <= 0.0 {
            return Err(AppError::validation(
                "Payment amount must be positive".to_string(),
            ));
        }
        if let Some(month) = data.month {
            if !(1..=12).contains(&month) {
                return Err(AppError::validation(
                    "Billing month must be between 1 and 12".to_string(),
                ));
            }
        }

        let payment = self.payment_repo.create(data).await?;
        info!(
            payment_id = %payment.id,
            student_id = %payment.student_id,
            amount = payment.amount,
            "Payment created"
        );

        self.notify(
            ctx,
            payment.student_id,
            Some(payment.school_id),
            "New payment due".to_string(),
            format!(
                "A payment of {:.2} {} is due on {}",
                payment.amount, payment.currency, payment.due_date
            ),
            NotificationKind::Info,
        )
        .await;

        Ok(payment)
    }

    /// Gets a payment, visible to the student it belongs to and to school
    /// admins.
    pub async fn get(&self, ctx: &RequestContext, payment_id: Uuid) -> Result<Payment, AppError> {
        let payment = self
            .payment_repo
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment {payment_id} not found")))?;

        if payment.student_id != ctx.user_id() {
            self.policy
                .require_school_admin(&ctx.assignments, payment.school_id)?;
        }
        Ok(payment)
    }

    /// Lists a student's payments. Self or an admin of one of the
    /// student's schools.
    pub async fn list_for_student(
        &self,
        ctx: &RequestContext,
        student_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<Payment>, AppError> {
        if student_id != ctx.user_id() && !self.policy.is_platform_admin(&ctx.assignments) {
            let student_assignments = self.role_repo.find_active_for_user(student_id).await?;
            if !self.policy.shares_school_at_least(
                &ctx.assignments,
                &student_assignments,
                RoleName::SchoolAdmin,
            ) {
                return Err(AppError::authorization(
                    "Cannot read this student's payments".to_string(),
                ));
            }
        }
        self.payment_repo.find_by_student(student_id, page).await
    }

    /// Lists a school's payments with an optional status filter. School
    /// admin only.
    pub async fn list_for_school(
        &self,
        ctx: &RequestContext,
        school_id: Uuid,
        status: Option<PaymentStatus>,
        page: &PageRequest,
    ) -> Result<PageResponse<Payment>, AppError> {
        self.policy
            .require_school_admin(&ctx.assignments, school_id)?;
        self.payment_repo
            .find_by_school(school_id, status, page)
            .await
    }

    /// Records a received sum against a payment. School admin only.
    ///
    /// The status moves to `partial` or `paid` depending on the running
    /// total; the student is notified when the payment completes.
    pub async fn record_payment(
        &self,
        ctx: &RequestContext,
        payment_id: Uuid,
        sum: f64,
    ) -> Result<Payment, AppError> {
        let payment = self
            .payment_repo
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment {payment_id} not found")))?;
        self.policy
            .require_school_admin(&ctx.assignments, payment.school_id)?;

        let updated = self
            .payment_repo
            .record_payment(payment_id, sum, Utc::now().date_naive())
            .await?;

        info!(
            payment_id = %payment_id,
            sum,
            status = %updated.status,
            "Payment recorded"
        );

        if updated.status == PaymentStatus::Paid {
            self.notify(
                ctx,
                updated.student_id,
                Some(updated.school_id),
                "Payment completed".to_string(),
                format!(
                    "Your payment of {:.2} {} is fully paid",
                    updated.amount, updated.currency
                ),
                NotificationKind::Success,
            )
            .await;
        }

        Ok(updated)
    }

    /// Cancels a payment that is not fully paid. School admin only.
    pub async fn cancel(&self, ctx: &RequestContext, payment_id: Uuid) -> Result<Payment, AppError> {
        let payment = self
            .payment_repo
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment {payment_id} not found")))?;
        self.policy
            .require_school_admin(&ctx.assignments, payment.school_id)?;

        let cancelled = self.payment_repo.cancel(payment_id).await?;
        info!(payment_id = %payment_id, cancelled_by = %ctx.user_id(), "Payment cancelled");
        Ok(cancelled)
    }

    /// Moves unpaid payments past their due date to `overdue`.
    ///
    /// Run at startup and from the periodic sweep.
    pub async fn sweep_overdue(&self) -> Result<u64, AppError> {
        let count = self
            .payment_repo
            .mark_overdue_before(Utc::now().date_naive())
            .await?;
        if count > 0 {
            info!(count, "Payments marked overdue");
        }
        Ok(count)
    }

    /// Best-effort payment notice; failure never rolls back the payment.
    async fn notify(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        school_id: Option<Uuid>,
        title: String,
        message: String,
        kind: NotificationKind,
    ) {
        let data = CreateNotification {
            user_id,
            sender_id: Some(ctx.user_id()),
            school_id,
            title,
            message,
            kind,
            is_important: false,
            requires_action: false,
            action_url: None,
            action_text: None,
            expires_at: None,
        };

        match self.notification_repo.create(&data).await {
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
                tracing::warn!(error = %e, "Failed to create payment notice");
            }
        }
    }
}
