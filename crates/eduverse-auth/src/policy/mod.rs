//! Role-based authorization decisions.

pub mod engine;

pub use engine::AuthorizationPolicy;
