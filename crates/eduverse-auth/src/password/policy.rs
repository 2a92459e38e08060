//! Password acceptance policy.

use eduverse_core::config::AuthConfig;
use eduverse_core::error::AppError;

/// Validates candidate passwords before they are hashed.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum accepted length in characters.
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length as usize,
        }
    }

    /// Checks a candidate password against the policy.
    ///
    /// The username is rejected as a password regardless of length.
    pub fn validate(&self, password: &str, username: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if password.eq_ignore_ascii_case(username) {
            return Err(AppError::validation(
                "Password must not match the username".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PasswordPolicy {
        PasswordPolicy { min_length: 8 }
    }

    #[test]
    fn short_passwords_rejected() {
        assert!(policy().validate("short", "alice").is_err());
        assert!(policy().validate("long enough", "alice").is_ok());
    }

    #[test]
    fn username_as_password_rejected() {
        assert!(policy().validate("alice-wonder", "Alice-Wonder").is_err());
    }
}
