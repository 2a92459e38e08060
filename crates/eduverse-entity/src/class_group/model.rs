//! Class group entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A class group (e.g. "5A") at one school.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClassGroup {
    /// Unique class group identifier.
    pub id: Uuid,
    /// The owning school.
    pub school_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Academic year like "2025-2026".
    pub academic_year: Option<String>,
    /// Maximum roster size; NULL means unlimited.
    pub max_students: Option<i32>,
    /// Whether the class group is active.
    pub is_active: bool,
    /// When the class group was created.
    pub created_at: DateTime<Utc>,
    /// When the class group was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ClassGroup {
    /// Whether another student fits under `max_students`.
    pub fn has_capacity(&self, current_active: i64) -> bool {
        match self.max_students {
            Some(max) => current_active < max as i64,
            None => true,
        }
    }
}

/// A student's membership in a class group.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClassEnrollment {
    /// Unique enrollment identifier.
    pub id: Uuid,
    /// The enrolled student.
    pub student_id: Uuid,
    /// The class group.
    pub class_group_id: Uuid,
    /// Whether the enrollment is current.
    pub is_active: bool,
    /// When the student joined.
    pub joined_at: DateTime<Utc>,
    /// When the student left, if they have.
    pub left_at: Option<DateTime<Utc>>,
}

/// Data for creating a class group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassGroup {
    /// Display name.
    pub name: String,
    /// Description (optional).
    pub description: Option<String>,
    /// Academic year (optional).
    pub academic_year: Option<String>,
    /// Maximum roster size (optional).
    pub max_students: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(max: Option<i32>) -> ClassGroup {
        ClassGroup {
            id: Uuid::new_v4(),
            school_id: Uuid::new_v4(),
            name: "5A".into(),
            description: None,
            academic_year: Some("2025-2026".into()),
            max_students: max,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn capacity_check_respects_max_students() {
        let c = class(Some(2));
        assert!(c.has_capacity(0));
        assert!(c.has_capacity(1));
        assert!(!c.has_capacity(2));
    }

    #[test]
    fn unlimited_when_max_is_null() {
        assert!(class(None).has_capacity(10_000));
    }
}
