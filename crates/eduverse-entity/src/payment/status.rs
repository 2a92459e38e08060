//! Payment status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored payment status.
///
/// `Overdue` is stored by the periodic sweep that moves pending and partial
/// payments past their due date; between sweeps overdue-ness is derived at
/// read time via [`super::Payment::is_overdue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting payment.
    Pending,
    /// Partially paid.
    Partial,
    /// Fully paid.
    Paid,
    /// Explicitly marked overdue.
    Overdue,
    /// Cancelled; no payment expected.
    Cancelled,
}

impl PaymentStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Partial => "partial",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
