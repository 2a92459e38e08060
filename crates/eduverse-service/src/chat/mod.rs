//! Chat use cases.

pub mod service;

pub use service::ChatService;
