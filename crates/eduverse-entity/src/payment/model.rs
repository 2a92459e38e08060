//! Payment entity model and derived state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::PaymentStatus;

/// A tuition (or other) payment obligation of a student at a school.
///
/// `status` is a stored fact transitioned by explicit payment events;
/// derived views (`is_overdue`, `is_partial`, `remaining_amount`) are
/// recomputed on read and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique payment identifier.
    pub id: Uuid,
    /// The student who owes the payment.
    pub student_id: Uuid,
    /// The school the payment belongs to.
    pub school_id: Uuid,
    /// Total amount owed.
    pub amount: f64,
    /// Amount actually paid so far.
    pub paid_amount: f64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Payment category like "tuition".
    pub payment_type: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Stored status.
    pub status: PaymentStatus,
    /// The date the payment falls due.
    pub due_date: NaiveDate,
    /// The date the payment was completed, if it was.
    pub paid_date: Option<NaiveDate>,
    /// Billing month (1-12), for monthly payments.
    pub month: Option<i32>,
    /// Billing year.
    pub year: Option<i32>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Remaining amount to be paid.
    pub fn remaining_amount(&self) -> f64 {
        (self.amount - self.paid_amount).max(0.0)
    }

    /// Fraction paid, as a percentage of the total.
    pub fn percentage_paid(&self) -> f64 {
        if self.amount == 0.0 {
            return 0.0;
        }
        (self.paid_amount / self.amount) * 100.0
    }

    /// Whether the payment is overdue as of `today`.
    ///
    /// Becomes false the moment the status is set to paid, independent of
    /// the due date.
    pub fn is_overdue_at(&self, today: NaiveDate) -> bool {
        self.due_date < today && self.status != PaymentStatus::Paid
    }

    /// Whether the payment is overdue as of the current date.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now().date_naive())
    }

    /// Whether the payment is partially paid.
    pub fn is_partial(&self) -> bool {
        self.paid_amount > 0.0 && self.paid_amount < self.amount
    }

    /// Days until due (negative if past due) as of `today`.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }
}

/// Data for creating a payment obligation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayment {
    /// The student who owes the payment.
    pub student_id: Uuid,
    /// The school the payment belongs to.
    pub school_id: Uuid,
    /// Total amount owed.
    pub amount: f64,
    /// Currency code (optional, defaults in the database).
    pub currency: Option<String>,
    /// Payment category (optional).
    pub payment_type: Option<String>,
    /// Description (optional).
    pub description: Option<String>,
    /// Due date.
    pub due_date: NaiveDate,
    /// Billing month (optional).
    pub month: Option<i32>,
    /// Billing year (optional).
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(amount: f64, paid: f64, status: PaymentStatus, due: NaiveDate) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            school_id: Uuid::new_v4(),
            amount,
            paid_amount: paid,
            currency: "RUB".into(),
            payment_type: "tuition".into(),
            description: None,
            status,
            due_date: due,
            paid_date: None,
            month: Some(3),
            year: Some(2026),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn overdue_iff_past_due_and_not_paid() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let tomorrow = today.succ_opt().unwrap();

        assert!(payment(100.0, 0.0, PaymentStatus::Pending, yesterday).is_overdue_at(today));
        assert!(!payment(100.0, 0.0, PaymentStatus::Pending, tomorrow).is_overdue_at(today));
        // Paid kills overdue regardless of the due date.
        assert!(!payment(100.0, 100.0, PaymentStatus::Paid, yesterday).is_overdue_at(today));
    }

    #[test]
    fn partial_means_strictly_between_zero_and_amount() {
        let due = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        assert!(payment(100.0, 40.0, PaymentStatus::Partial, due).is_partial());
        assert!(!payment(100.0, 0.0, PaymentStatus::Pending, due).is_partial());
        assert!(!payment(100.0, 100.0, PaymentStatus::Paid, due).is_partial());
    }

    #[test]
    fn remaining_and_percentage() {
        let due = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let p = payment(200.0, 50.0, PaymentStatus::Partial, due);
        assert_eq!(p.remaining_amount(), 150.0);
        assert_eq!(p.percentage_paid(), 25.0);
        // Zero-amount payment reports 0% instead of dividing by zero.
        assert_eq!(payment(0.0, 0.0, PaymentStatus::Pending, due).percentage_paid(), 0.0);
    }

    #[test]
    fn days_until_due_goes_negative_when_late() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let p = payment(100.0, 0.0, PaymentStatus::Pending, today - chrono::Duration::days(3));
        assert_eq!(p.days_until_due(today), -3);
    }
}
