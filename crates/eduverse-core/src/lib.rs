//! # eduverse-core
//!
//! Core crate for Eduverse. Contains configuration schemas, pagination
//! types, domain events, the publisher trait seam, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Eduverse crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
