//! Role name enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of roles, seeded at startup.
///
/// Ordered by priority: super_admin > project_admin > school_admin >
/// teacher > student > parent. Platform-level roles (`super_admin`,
/// `project_admin`) are not tied to a school; staff roles are scoped to
/// exactly one school. A student assignment may be school-less: the
/// default student role is granted at registration, before any school
/// ties it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "role_name", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    /// Full platform administrator.
    SuperAdmin,
    /// Platform operator: may create and manage schools.
    ProjectAdmin,
    /// Administrator of one school.
    SchoolAdmin,
    /// Teacher at one school.
    Teacher,
    /// Student at one school.
    Student,
    /// Parent of a student at one school.
    Parent,
}

impl RoleName {
    /// Priority used to select a user's primary role (higher wins).
    /// Matches the `roles.priority` integer column.
    pub fn priority(&self) -> i32 {
        match self {
            Self::SuperAdmin => 100,
            Self::ProjectAdmin => 90,
            Self::SchoolAdmin => 80,
            Self::Teacher => 60,
            Self::Student => 40,
            Self::Parent => 20,
        }
    }

    /// Whether the role is platform-wide rather than school-scoped.
    pub fn is_platform(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::ProjectAdmin)
    }

    /// Whether an assignment of this role may carry the given school
    /// scope.
    ///
    /// Platform roles never take a school and staff roles always do.
    /// Students accept both: the registration-time default is
    /// school-less, an enrollment-time grant is school-scoped.
    pub fn accepts_school_scope(&self, has_school: bool) -> bool {
        match self {
            Self::SuperAdmin | Self::ProjectAdmin => !has_school,
            Self::Student => true,
            _ => has_school,
        }
    }

    /// All roles, in priority order.
    pub fn all() -> [RoleName; 6] {
        [
            Self::SuperAdmin,
            Self::ProjectAdmin,
            Self::SchoolAdmin,
            Self::Teacher,
            Self::Student,
            Self::Parent,
        ]
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::ProjectAdmin => "project_admin",
            Self::SchoolAdmin => "school_admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Parent => "parent",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = eduverse_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super_admin" => Ok(Self::SuperAdmin),
            "project_admin" => Ok(Self::ProjectAdmin),
            "school_admin" => Ok(Self::SchoolAdmin),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            "parent" => Ok(Self::Parent),
            _ => Err(eduverse_core::AppError::validation(format!(
                "Invalid role name: '{s}'. Expected one of: super_admin, project_admin, \
                 school_admin, teacher, student, parent"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ordering_matches_the_catalog() {
        let all = RoleName::all();
        for pair in all.windows(2) {
            assert!(pair[0].priority() > pair[1].priority());
        }
    }

    #[test]
    fn priorities_match_the_seeded_catalog_column() {
        // `roles.priority` is an INTEGER column; the values here are what
        // startup seeding writes.
        let expected: [(RoleName, i32); 6] = [
            (RoleName::SuperAdmin, 100),
            (RoleName::ProjectAdmin, 90),
            (RoleName::SchoolAdmin, 80),
            (RoleName::Teacher, 60),
            (RoleName::Student, 40),
            (RoleName::Parent, 20),
        ];
        for (role, priority) in expected {
            assert_eq!(role.priority(), priority);
        }
    }

    #[test]
    fn scope_rules_per_role() {
        assert!(RoleName::SuperAdmin.accepts_school_scope(false));
        assert!(!RoleName::SuperAdmin.accepts_school_scope(true));
        assert!(RoleName::SchoolAdmin.accepts_school_scope(true));
        assert!(!RoleName::SchoolAdmin.accepts_school_scope(false));
        assert!(!RoleName::Teacher.accepts_school_scope(false));
    }

    #[test]
    fn student_role_may_be_school_less() {
        // Registration grants the default student role with no school.
        assert!(RoleName::Student.accepts_school_scope(false));
        assert!(RoleName::Student.accepts_school_scope(true));
    }

    #[test]
    fn from_str_round_trips() {
        for role in RoleName::all() {
            assert_eq!(role.as_str().parse::<RoleName>().unwrap(), role);
        }
        assert!("principal".parse::<RoleName>().is_err());
    }
}
