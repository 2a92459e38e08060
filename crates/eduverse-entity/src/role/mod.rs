//! Role catalog and user-role assignments.

pub mod assignment;
pub mod name;

pub use assignment::{NewRoleAssignment, Role, RoleAssignment};
pub use name::RoleName;
