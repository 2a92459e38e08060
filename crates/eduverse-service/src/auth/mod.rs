//! Authentication use cases.

pub mod service;

pub use service::{AuthService, LoginOutcome, RegisterRequest};
