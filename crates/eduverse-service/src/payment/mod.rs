//! Payment tracking use cases.

pub mod service;

pub use service::PaymentService;
