//! Schedule and schedule-event entities.

pub mod event;
pub mod model;

pub use event::{CreateScheduleEvent, ScheduleEvent, ScheduleEventType};
pub use model::Schedule;
