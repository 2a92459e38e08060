//! Grade entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Minimum valid grade value.
pub const GRADE_MIN: i32 = 1;
/// Maximum valid grade value.
pub const GRADE_MAX: i32 = 10;

/// The kind of assessment a grade records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "grade_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GradeType {
    /// Ordinary classwork grade.
    Regular,
    /// Test grade.
    Test,
    /// Exam grade.
    Exam,
    /// Homework grade.
    Homework,
}

/// A grade on the 1–10 scale, issued by a teacher to a student for a subject.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Grade {
    /// Unique grade identifier.
    pub id: Uuid,
    /// The graded student.
    pub student_id: Uuid,
    /// The subject the grade belongs to.
    pub subject_id: Uuid,
    /// The teacher who issued the grade.
    pub teacher_id: Uuid,
    /// Grade value in [1, 10].
    pub value: i32,
    /// Assessment kind.
    pub grade_type: GradeType,
    /// Teacher's comment.
    pub comment: Option<String>,
    /// The date the grade was given for.
    pub date_given: NaiveDate,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Grade {
    /// Whether the grade is passing (5 or higher).
    pub fn is_passing(&self) -> bool {
        self.value >= 5
    }

    /// Letter form of the grade for display.
    pub fn letter(&self) -> &'static str {
        match self.value {
            10 => "A+",
            9 => "A",
            8 => "B+",
            7 => "B",
            6 => "C+",
            5 => "C",
            4 => "D+",
            3 => "D",
            2 => "F+",
            _ => "F",
        }
    }
}

/// Payload for issuing a grade.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGrade {
    /// The graded student.
    pub student_id: Uuid,
    /// The subject the grade belongs to.
    pub subject_id: Uuid,
    /// The issuing teacher.
    pub teacher_id: Uuid,
    /// Grade value in [1, 10].
    pub value: i32,
    /// Assessment kind.
    pub grade_type: GradeType,
    /// Teacher's comment (optional).
    pub comment: Option<String>,
    /// The date the grade was given for.
    pub date_given: NaiveDate,
}

/// Validate a raw grade value against the 1–10 scale.
pub fn validate_value(value: i32) -> Result<(), eduverse_core::AppError> {
    if (GRADE_MIN..=GRADE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(eduverse_core::AppError::validation(format!(
            "Grade value {value} is out of range; expected {GRADE_MIN}..={GRADE_MAX}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_outside_one_to_ten_are_rejected() {
        assert!(validate_value(0).is_err());
        assert!(validate_value(11).is_err());
        assert!(validate_value(-3).is_err());
        for v in GRADE_MIN..=GRADE_MAX {
            assert!(validate_value(v).is_ok());
        }
    }

    #[test]
    fn passing_threshold_is_five() {
        let mut g = Grade {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            subject_id: Uuid::new_v4(),
            teacher_id: Uuid::new_v4(),
            value: 5,
            grade_type: GradeType::Regular,
            comment: None,
            date_given: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(g.is_passing());
        g.value = 4;
        assert!(!g.is_passing());
    }
}
