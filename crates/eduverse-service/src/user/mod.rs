//! User profile and directory use cases.

pub mod service;

pub use service::UserService;
