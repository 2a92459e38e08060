//! Payment entities.

pub mod model;
pub mod status;

pub use model::{CreatePayment, Payment};
pub use status::PaymentStatus;
