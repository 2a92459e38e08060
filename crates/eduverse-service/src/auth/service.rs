//! Registration, login, token refresh, and password changes.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use eduverse_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use eduverse_auth::password::{PasswordHasher, PasswordPolicy};
use eduverse_core::error::AppError;
use eduverse_database::repositories::role::RoleRepository;
use eduverse_database::repositories::user::UserRepository;
use eduverse_entity::role::RoleName;
use eduverse_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Handles authentication flows.
#[derive(Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Role assignment repository.
    role_repo: Arc<RoleRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password acceptance policy.
    policy: Arc<PasswordPolicy>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
}

/// Data for self-registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 80))]
    pub username: String,
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Given name.
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    /// Middle name (optional).
    pub middle_name: Option<String>,
    /// Contact phone (optional).
    pub phone: Option<String>,
}

/// Result of a successful login or refresh.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// The issued token pair.
    pub tokens: TokenPair,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            hasher,
            policy,
            encoder,
            decoder,
        }
    }

    /// Registers a new account and grants the default `student` role.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid registration data: {e}")))?;
        self.policy.validate(&req.password, &req.username)?;

        if self
            .user_repo
            .find_by_username(&req.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                req.username
            )));
        }
        if self.user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("Email already in use".to_string()));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create_with_role(
                &CreateUser {
                    username: req.username,
                    email: req.email,
                    password_hash,
                    first_name: req.first_name,
                    last_name: req.last_name,
                    middle_name: req.middle_name,
                    phone: req.phone,
                },
                RoleName::Student,
                None,
            )
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Authenticates a username/password pair and issues tokens.
    ///
    /// Unknown usernames, wrong passwords, and deactivated accounts all
    /// produce the same error so the response does not reveal which
    /// accounts exist or their state.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = match self.user_repo.find_by_username(username).await? {
            Some(user) => user,
            None => {
                // Burn a hash verification so timing does not differ for
                // unknown usernames.
                let _ = self.hasher.verify_password(password, DUMMY_HASH);
                warn!(username, "Login attempt for unknown username");
                return Err(invalid_credentials());
            }
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(invalid_credentials());
        }

        if !user.can_login() {
            warn!(user_id = %user.id, "Login attempt on deactivated account");
            return Err(invalid_credentials());
        }

        let tokens = self.encoder.generate_token_pair(user.id, &user.username)?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome { user, tokens })
    }

    /// Exchanges a valid refresh token for a fresh token pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<LoginOutcome, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists".to_string()))?;

        if !user.can_login() {
            return Err(AppError::authentication(
                "Account is deactivated".to_string(),
            ));
        }

        let tokens = self.encoder.generate_token_pair(user.id, &user.username)?;
        Ok(LoginOutcome { user, tokens })
    }

    /// Changes the current user's password after verifying the old one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if !self
            .hasher
            .verify_password(current_password, &ctx.user.password_hash)?
        {
            return Err(AppError::authentication(
                "Current password is incorrect".to_string(),
            ));
        }

        self.policy.validate(new_password, &ctx.user.username)?;

        let hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(ctx.user_id(), &hash).await?;

        info!(user_id = %ctx.user_id(), "Password changed");
        Ok(())
    }

    /// Loads a fresh request context for the given user id.
    ///
    /// Used by the HTTP auth extractor after token validation.
    pub async fn load_context(&self, user_id: uuid::Uuid) -> Result<RequestContext, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists".to_string()))?;

        if !user.can_login() {
            return Err(AppError::authentication(
                "Account is deactivated".to_string(),
            ));
        }

        let assignments = self.role_repo.find_active_for_user(user.id).await?;
        Ok(RequestContext::new(user, assignments))
    }
}

/// A throwaway Argon2id hash used to equalize timing for unknown usernames.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$MDAwMDAwMDAwMDAwMDAwMA$GVSzjEbe7J6BsLPJBLysP6mJYDPnZBwzyMfQYA7Z3bc";

fn invalid_credentials() -> AppError {
    AppError::authentication("Invalid username or password".to_string())
}
