//! Academic record use cases: subjects, classes, grades, and timetables.

pub mod class_group;
pub mod grade;
pub mod schedule;
pub mod subject;

pub use class_group::ClassGroupService;
pub use grade::GradeService;
pub use schedule::ScheduleService;
pub use subject::SubjectService;
