//! Payment repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use eduverse_core::error::{AppError, ErrorKind};
use eduverse_core::result::AppResult;
use eduverse_core::types::pagination::{PageRequest, PageResponse};
use eduverse_entity::payment::model::{CreatePayment, Payment};
use eduverse_entity::payment::status::PaymentStatus;

/// Repository for payment CRUD and state transitions.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a payment by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find payment", e))
    }

    /// List a student's payments, newest due date first.
    pub async fn find_by_student(
        &self,
        student_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Payment>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE student_id = $1")
            .bind(student_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count payments", e)
            })?;

        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE student_id = $1 \
             ORDER BY due_date DESC LIMIT $2 OFFSET $3",
        )
        .bind(student_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list payments", e))?;

        Ok(PageResponse::new(
            payments,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a school's payments, optionally filtered by status.
    pub async fn find_by_school(
        &self,
        school_id: Uuid,
        status: Option<PaymentStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Payment>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM payments \
             WHERE school_id = $1 AND ($2::payment_status IS NULL OR status = $2)",
        )
        .bind(school_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count payments", e))?;

        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments \
             WHERE school_id = $1 AND ($2::payment_status IS NULL OR status = $2) \
             ORDER BY due_date DESC LIMIT $3 OFFSET $4",
        )
        .bind(school_id)
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list payments", e))?;

        Ok(PageResponse::new(
            payments,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a payment obligation.
    pub async fn create(&self, data: &CreatePayment) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments \
             (student_id, school_id, amount, currency, payment_type, description, due_date, month, year) \
             VALUES ($1, $2, $3, COALESCE($4, 'RUB'), COALESCE($5, 'tuition'), $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(data.student_id)
        .bind(data.school_id)
        .bind(data.amount)
        .bind(&data.currency)
        .bind(&data.payment_type)
        .bind(&data.description)
        .bind(data.due_date)
        .bind(data.month)
        .bind(data.year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create payment", e))
    }

    /// Record money received against a payment.
    ///
    /// Locks the row, adds the sum to `paid_amount`, and moves the status to
    /// `paid` (with today's date) or `partial` accordingly. Cancelled and
    /// fully paid payments reject further sums.
    pub async fn record_payment(
        &self,
        payment_id: Uuid,
        sum: f64,
        today: NaiveDate,
    ) -> AppResult<Payment> {
        if sum <= 0.0 {
            return Err(AppError::validation(
                "Payment sum must be positive".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let payment =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1 FOR UPDATE")
                .bind(payment_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock payment", e)
                })?
                .ok_or_else(|| AppError::not_found(format!("Payment {payment_id} not found")))?;

        match payment.status {
            PaymentStatus::Cancelled => {
                return Err(AppError::conflict(
                    "Cannot record money against a cancelled payment".to_string(),
                ));
            }
            PaymentStatus::Paid => {
                return Err(AppError::conflict(
                    "Payment is already fully paid".to_string(),
                ));
            }
            _ => {}
        }

        let new_paid = payment.paid_amount + sum;
        let (status, paid_date) = if new_paid >= payment.amount {
            (PaymentStatus::Paid, Some(today))
        } else {
            (PaymentStatus::Partial, None)
        };

        let updated = sqlx::query_as::<_, Payment>(
            "UPDATE payments SET paid_amount = $2, status = $3, paid_date = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(payment_id)
        .bind(new_paid)
        .bind(status)
        .bind(paid_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record payment", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit payment", e)
        })?;

        Ok(updated)
    }

    /// Cancel a payment that is not yet fully paid.
    pub async fn cancel(&self, payment_id: Uuid) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>(
            "UPDATE payments SET status = 'cancelled', updated_at = NOW() \
             WHERE id = $1 AND status <> 'paid' RETURNING *",
        )
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel payment", e))?
        .ok_or_else(|| {
            AppError::conflict(format!(
                "Payment {payment_id} does not exist or is already paid"
            ))
        })
    }

    /// Sweep unpaid payments past their due date into `overdue`.
    ///
    /// Returns the number of payments transitioned.
    pub async fn mark_overdue_before(&self, today: NaiveDate) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE payments SET status = 'overdue', updated_at = NOW() \
             WHERE due_date < $1 AND status IN ('pending', 'partial')",
        )
        .bind(today)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark overdue payments", e)
        })?;

        Ok(result.rows_affected())
    }
}
