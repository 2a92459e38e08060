//! Request context carrying the authenticated user and their active roles.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use eduverse_entity::role::{RoleAssignment, RoleName};
use eduverse_entity::user::User;

/// Context for the current authenticated request.
///
/// Built by the authentication extractor and passed into service methods so
/// that every operation knows *who* is acting and with *which* roles. Role
/// assignments are loaded fresh per request, so a revoked role takes effect
/// on the next call.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user.
    pub user: User,
    /// The user's active role assignments.
    pub assignments: Vec<RoleAssignment>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: User, assignments: Vec<RoleAssignment>) -> Self {
        Self {
            user,
            assignments,
            request_time: Utc::now(),
        }
    }

    /// The acting user's ID.
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// The acting user's username.
    pub fn username(&self) -> &str {
        &self.user.username
    }

    /// Whether the user holds an active platform-wide admin role.
    pub fn is_platform_admin(&self) -> bool {
        self.assignments
            .iter()
            .any(|a| a.is_active && a.role.is_platform())
    }

    /// Whether the user holds the given role within the school.
    pub fn has_role_in_school(&self, role: RoleName, school_id: Uuid) -> bool {
        self.assignments
            .iter()
            .any(|a| a.role == role && a.applies_to(school_id))
    }

    /// School IDs the user has any active role in.
    pub fn school_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self
            .assignments
            .iter()
            .filter(|a| a.is_active)
            .filter_map(|a| a.school_id)
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "test".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            middle_name: None,
            phone: None,
            is_active: true,
            is_verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

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
    fn school_ids_deduplicated() {
        let school = Uuid::new_v4();
        let ctx = RequestContext::new(
            user(),
            vec![
                assignment(RoleName::Teacher, Some(school)),
                assignment(RoleName::SchoolAdmin, Some(school)),
            ],
        );
        assert_eq!(ctx.school_ids(), vec![school]);
        assert!(!ctx.is_platform_admin());
        assert!(ctx.has_role_in_school(RoleName::Teacher, school));
    }
}
