//! # eduverse-service
//!
//! Business logic service layer for Eduverse. Each service orchestrates
//! repositories, authorization policy, and domain events to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod academic;
pub mod auth;
pub mod chat;
pub mod context;
pub mod notification;
pub mod payment;
pub mod school;
pub mod user;

pub use academic::{ClassGroupService, GradeService, ScheduleService, SubjectService};
pub use auth::AuthService;
pub use chat::ChatService;
pub use context::RequestContext;
pub use notification::NotificationService;
pub use payment::PaymentService;
pub use school::SchoolService;
pub use user::UserService;
