//! Role catalog rows and user-role assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::name::RoleName;

/// A row in the seeded role catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Role name.
    pub name: RoleName,
    /// Human-readable description.
    pub description: Option<String>,
    /// Priority (higher = more privileged).
    pub priority: i32,
    /// When the row was seeded.
    pub created_at: DateTime<Utc>,
}

/// A user holding a role, optionally scoped to a school.
///
/// Invariants (enforced in the service layer and by a partial unique index):
/// at most one active assignment per (user, role, school) triple, platform
/// roles carry no school, staff roles carry exactly one. Student
/// assignments accept either scope, see [`RoleName::accepts_school_scope`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleAssignment {
    /// Unique assignment identifier.
    pub id: Uuid,
    /// The user holding the role.
    pub user_id: Uuid,
    /// The role name (denormalized from the catalog for cheap checks).
    pub role: RoleName,
    /// The school the role applies to; NULL for platform-wide roles.
    pub school_id: Option<Uuid>,
    /// Whether the assignment is currently active.
    pub is_active: bool,
    /// Who granted the role.
    pub assigned_by: Option<Uuid>,
    /// When the role was granted.
    pub assigned_at: DateTime<Utc>,
}

impl RoleAssignment {
    /// Whether this active assignment applies to the given school.
    ///
    /// Platform roles apply everywhere.
    pub fn applies_to(&self, school_id: Uuid) -> bool {
        self.is_active && (self.role.is_platform() || self.school_id == Some(school_id))
    }
}

/// Data for granting a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoleAssignment {
    /// The user receiving the role.
    pub user_id: Uuid,
    /// The role name.
    pub role: RoleName,
    /// The school scope (required unless the role is platform-wide).
    pub school_id: Option<Uuid>,
    /// Who grants the role.
    pub assigned_by: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(role: RoleName, school: Option<Uuid>, active: bool) -> RoleAssignment {
        RoleAssignment {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role,
            school_id: school,
            is_active: active,
            assigned_by: None,
            assigned_at: Utc::now(),
        }
    }

    #[test]
    fn platform_roles_apply_to_every_school() {
        let any_school = Uuid::new_v4();
        assert!(assignment(RoleName::SuperAdmin, None, true).applies_to(any_school));
        assert!(assignment(RoleName::ProjectAdmin, None, true).applies_to(any_school));
    }

    #[test]
    fn school_roles_apply_only_to_their_school() {
        let school = Uuid::new_v4();
        let other = Uuid::new_v4();
        let a = assignment(RoleName::Teacher, Some(school), true);
        assert!(a.applies_to(school));
        assert!(!a.applies_to(other));
    }

    #[test]
    fn school_less_student_assignment_applies_to_no_school() {
        // The registration-time default grants no school access by itself.
        let a = assignment(RoleName::Student, None, true);
        assert!(!a.applies_to(Uuid::new_v4()));
    }

    #[test]
    fn inactive_assignments_never_apply() {
        let school = Uuid::new_v4();
        assert!(!assignment(RoleName::SuperAdmin, None, false).applies_to(school));
        assert!(!assignment(RoleName::Teacher, Some(school), false).applies_to(school));
    }
}
