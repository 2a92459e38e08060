//! Schedule event entity and occurrence math.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The kind of schedule event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "schedule_event_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScheduleEventType {
    /// A recurring lesson.
    Lesson,
    /// An exam.
    Exam,
    /// A school event.
    Event,
    /// A break between lessons.
    Break,
}

/// A single lesson/exam/event slot in a schedule.
///
/// Recurring events repeat weekly on `day_of_week` (0 = Monday); one-time
/// events use `start_date`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScheduleEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// The owning schedule.
    pub schedule_id: Uuid,
    /// Event title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Event kind.
    pub event_type: ScheduleEventType,
    /// Weekday: 0 = Monday .. 6 = Sunday.
    pub day_of_week: i16,
    /// Start time of the slot.
    pub start_time: NaiveTime,
    /// End time of the slot; must be after `start_time`.
    pub end_time: NaiveTime,
    /// Date for one-time events.
    pub start_date: Option<NaiveDate>,
    /// Whether the event repeats weekly.
    pub is_recurring: bool,
    /// The subject taught, if any.
    pub subject_id: Option<Uuid>,
    /// The class group attending, if any.
    pub class_group_id: Option<Uuid>,
    /// The teacher running the slot, if any.
    pub teacher_id: Option<Uuid>,
    /// Room identifier.
    pub room: Option<String>,
    /// Whether the event is active.
    pub is_active: bool,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ScheduleEvent {
    /// Slot duration in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Whether the event occurs on the given date.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        if !self.is_recurring {
            return self.start_date == Some(date);
        }
        date.weekday().num_days_from_monday() as i16 == self.day_of_week
    }

    /// The next date this event occurs, strictly from `from` onward.
    pub fn next_occurrence(&self, from: NaiveDate) -> Option<NaiveDate> {
        if !self.is_recurring {
            return self.start_date.filter(|d| *d >= from);
        }
        let mut days_ahead =
            self.day_of_week as i64 - from.weekday().num_days_from_monday() as i64;
        if days_ahead < 0 {
            days_ahead += 7;
        }
        Some(from + Duration::days(days_ahead))
    }
}

/// Data for creating a schedule event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleEvent {
    /// Event title.
    pub title: String,
    /// Description (optional).
    pub description: Option<String>,
    /// Event kind.
    pub event_type: ScheduleEventType,
    /// Weekday: 0 = Monday .. 6 = Sunday.
    pub day_of_week: i16,
    /// Start time.
    pub start_time: NaiveTime,
    /// End time.
    pub end_time: NaiveTime,
    /// Date for one-time events.
    pub start_date: Option<NaiveDate>,
    /// Whether the event repeats weekly.
    pub is_recurring: bool,
    /// Subject (optional).
    pub subject_id: Option<Uuid>,
    /// Class group (optional).
    pub class_group_id: Option<Uuid>,
    /// Teacher (optional).
    pub teacher_id: Option<Uuid>,
    /// Room (optional).
    pub room: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(day: i16, recurring: bool, date: Option<NaiveDate>) -> ScheduleEvent {
        ScheduleEvent {
            id: Uuid::new_v4(),
            schedule_id: Uuid::new_v4(),
            title: "Algebra".into(),
            description: None,
            event_type: ScheduleEventType::Lesson,
            day_of_week: day,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 45, 0).unwrap(),
            start_date: date,
            is_recurring: recurring,
            subject_id: None,
            class_group_id: None,
            teacher_id: None,
            room: Some("204".into()),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn duration_is_in_minutes() {
        assert_eq!(lesson(0, true, None).duration_minutes(), 45);
    }

    #[test]
    fn recurring_event_occurs_on_its_weekday() {
        // 2026-03-02 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let tuesday = monday.succ_opt().unwrap();
        let e = lesson(0, true, None);
        assert!(e.occurs_on(monday));
        assert!(!e.occurs_on(tuesday));
    }

    #[test]
    fn next_occurrence_wraps_to_next_week() {
        // From a Wednesday, the next Monday slot is five days out.
        let wednesday = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let e = lesson(0, true, None);
        let next = e.next_occurrence(wednesday).unwrap();
        assert_eq!(next, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
    }

    #[test]
    fn one_time_event_has_no_occurrence_after_its_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let e = lesson(0, false, Some(date));
        assert_eq!(e.next_occurrence(date), Some(date));
        assert_eq!(e.next_occurrence(date.succ_opt().unwrap()), None);
    }
}
