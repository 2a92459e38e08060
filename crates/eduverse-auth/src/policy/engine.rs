//! Authorization decisions over a user's active role assignments.
//!
//! Every check takes the caller's assignment list as loaded for the current
//! request. Platform administrators (`super_admin`, `project_admin`) pass
//! every school-scoped check.

use uuid::Uuid;

use eduverse_core::error::AppError;
use eduverse_entity::role::{RoleAssignment, RoleName};

/// Enforces role requirements for platform and school operations.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    /// Creates a new policy instance.
    pub fn new() -> Self {
        Self
    }

    /// Whether the user holds an active platform-wide admin role.
    pub fn is_platform_admin(&self, assignments: &[RoleAssignment]) -> bool {
        assignments
            .iter()
            .any(|a| a.is_active && a.role.is_platform())
    }

    /// Whether the user holds the given role within the school.
    pub fn has_role_in_school(
        &self,
        assignments: &[RoleAssignment],
        role: RoleName,
        school_id: Uuid,
    ) -> bool {
        assignments
            .iter()
            .any(|a| a.role == role && a.applies_to(school_id))
    }

    /// Highest role priority the user holds that applies to the school.
    pub fn max_priority_in_school(
        &self,
        assignments: &[RoleAssignment],
        school_id: Uuid,
    ) -> Option<i32> {
        assignments
            .iter()
            .filter(|a| a.applies_to(school_id))
            .map(|a| a.role.priority())
            .max()
    }

    /// Requires an active platform-wide admin role.
    pub fn require_platform_admin(&self, assignments: &[RoleAssignment]) -> Result<(), AppError> {
        if self.is_platform_admin(assignments) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Platform administrator role required".to_string(),
            ))
        }
    }

    /// Requires school-admin standing within the given school.
    pub fn require_school_admin(
        &self,
        assignments: &[RoleAssignment],
        school_id: Uuid,
    ) -> Result<(), AppError> {
        self.require_role_at_least(assignments, school_id, RoleName::SchoolAdmin)
    }

    /// Requires a role applying to the school with at least the given
    /// priority.
    pub fn require_role_at_least(
        &self,
        assignments: &[RoleAssignment],
        school_id: Uuid,
        minimum: RoleName,
    ) -> Result<(), AppError> {
        let best = self
            .max_priority_in_school(assignments, school_id)
            .unwrap_or(0);
        if best >= minimum.priority() {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{minimum}' or higher required for this school"
            )))
        }
    }

    /// Whether the caller holds at least the given standing in any school
    /// the target user actually belongs to.
    ///
    /// Used for student record reads: a teacher in school A must not see
    /// records of a student enrolled only in school B.
    pub fn shares_school_at_least(
        &self,
        caller: &[RoleAssignment],
        target: &[RoleAssignment],
        minimum: RoleName,
    ) -> bool {
        target
            .iter()
            .filter(|a| a.is_active)
            .filter_map(|a| a.school_id)
            .any(|school| self.require_role_at_least(caller, school, minimum).is_ok())
    }

    /// Requires the caller to be the target user or a school admin.
    ///
    /// Used for profile and record access where students see their own data
    /// and staff see everyone's.
    pub fn require_self_or_school_admin(
        &self,
        assignments: &[RoleAssignment],
        actor_id: Uuid,
        target_id: Uuid,
        school_id: Uuid,
    ) -> Result<(), AppError> {
        if actor_id == target_id {
            return Ok(());
        }
        self.require_school_admin(assignments, school_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn assignment(role: RoleName, school_id: Option<Uuid>) -> RoleAssignment {
        RoleAssignment {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role,
            school_id,
            is_active: true,
            assigned_by: None,
            assigned_at: Utc::now(),
        }
    }

    #[test]
    fn platform_admin_passes_school_checks() {
        let policy = AuthorizationPolicy::new();
        let school = Uuid::new_v4();
        let assignments = vec![assignment(RoleName::ProjectAdmin, None)];

        assert!(policy.require_platform_admin(&assignments).is_ok());
        assert!(policy.require_school_admin(&assignments, school).is_ok());
        assert!(policy
            .require_role_at_least(&assignments, school, RoleName::Teacher)
            .is_ok());
    }

    #[test]
    fn school_roles_are_scoped_to_their_school() {
        let policy = AuthorizationPolicy::new();
        let home = Uuid::new_v4();
        let other = Uuid::new_v4();
        let assignments = vec![assignment(RoleName::Teacher, Some(home))];

        assert!(policy
            .require_role_at_least(&assignments, home, RoleName::Teacher)
            .is_ok());
        assert!(policy
            .require_role_at_least(&assignments, other, RoleName::Teacher)
            .is_err());
        assert!(policy.require_platform_admin(&assignments).is_err());
    }

    #[test]
    fn teacher_is_not_school_admin() {
        let policy = AuthorizationPolicy::new();
        let school = Uuid::new_v4();
        let assignments = vec![assignment(RoleName::Teacher, Some(school))];

        assert!(policy.require_school_admin(&assignments, school).is_err());
    }

    #[test]
    fn inactive_assignments_do_not_count() {
        let policy = AuthorizationPolicy::new();
        let school = Uuid::new_v4();
        let mut a = assignment(RoleName::SchoolAdmin, Some(school));
        a.is_active = false;

        assert!(policy.require_school_admin(&[a], school).is_err());
    }

    #[test]
    fn staff_reads_are_limited_to_the_students_schools() {
        let policy = AuthorizationPolicy::new();
        let school_a = Uuid::new_v4();
        let school_b = Uuid::new_v4();
        let teacher_in_a = vec![assignment(RoleName::Teacher, Some(school_a))];
        let student_in_a = vec![assignment(RoleName::Student, Some(school_a))];
        let student_in_b = vec![assignment(RoleName::Student, Some(school_b))];

        assert!(policy.shares_school_at_least(&teacher_in_a, &student_in_a, RoleName::Teacher));
        assert!(!policy.shares_school_at_least(&teacher_in_a, &student_in_b, RoleName::Teacher));
        // A school-less default student assignment grants access to nobody.
        let unenrolled = vec![assignment(RoleName::Student, None)];
        assert!(!policy.shares_school_at_least(&teacher_in_a, &unenrolled, RoleName::Teacher));
    }

    #[test]
    fn admin_standing_is_checked_against_the_targets_school() {
        let policy = AuthorizationPolicy::new();
        let school_a = Uuid::new_v4();
        let school_b = Uuid::new_v4();
        let admin_of_a = vec![assignment(RoleName::SchoolAdmin, Some(school_a))];
        let student_in_b = vec![assignment(RoleName::Student, Some(school_b))];

        assert!(!policy.shares_school_at_least(&admin_of_a, &student_in_b, RoleName::SchoolAdmin));
    }

    #[test]
    fn self_access_needs_no_role() {
        let policy = AuthorizationPolicy::new();
        let school = Uuid::new_v4();
        let user = Uuid::new_v4();
        let assignments = vec![assignment(RoleName::Student, Some(school))];

        assert!(policy
            .require_self_or_school_admin(&assignments, user, user, school)
            .is_ok());
        assert!(policy
            .require_self_or_school_admin(&assignments, user, Uuid::new_v4(), school)
            .is_err());
    }
}
