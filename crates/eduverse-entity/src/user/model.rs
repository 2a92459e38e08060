//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user of the platform.
///
/// Users are never hard-deleted while referential records exist; accounts
/// are soft-disabled via `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Patronymic / middle name.
    pub middle_name: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Whether the account is enabled.
    pub is_active: bool,
    /// Whether the email address has been verified.
    pub is_verified: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full display name: "Last First [Middle]".
    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(middle) => format!("{} {} {}", self.last_name, self.first_name, middle),
            None => format!("{} {}", self.last_name, self.first_name),
        }
    }

    /// Whether the account may authenticate.
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Patronymic / middle name (optional).
    pub middle_name: Option<String>,
    /// Contact phone (optional).
    pub phone: Option<String>,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New middle name.
    pub middle_name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(middle: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            username: "ivanov".into(),
            email: "ivanov@example.com".into(),
            password_hash: String::new(),
            first_name: "Ivan".into(),
            last_name: "Ivanov".into(),
            middle_name: middle.map(String::from),
            phone: None,
            is_active: true,
            is_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn full_name_includes_middle_name_when_present() {
        assert_eq!(user(None).full_name(), "Ivanov Ivan");
        assert_eq!(user(Some("Petrovich")).full_name(), "Ivanov Ivan Petrovich");
    }
}
