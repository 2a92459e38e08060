//! School (tenant) use cases.

pub mod service;
pub mod slug;

pub use service::SchoolService;
