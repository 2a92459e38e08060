//! Repository implementations for all Eduverse entities.

pub mod chat;
pub mod class_group;
pub mod grade;
pub mod notification;
pub mod payment;
pub mod role;
pub mod schedule;
pub mod school;
pub mod subject;
pub mod user;

pub use chat::ChatRepository;
pub use class_group::ClassGroupRepository;
pub use grade::GradeRepository;
pub use notification::NotificationRepository;
pub use payment::PaymentRepository;
pub use role::RoleRepository;
pub use schedule::ScheduleRepository;
pub use school::SchoolRepository;
pub use subject::SubjectRepository;
pub use user::UserRepository;
