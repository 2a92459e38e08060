//! # eduverse-auth
//!
//! Authentication and authorization for the Eduverse platform.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation
//! - `password` — Argon2id password hashing and policy enforcement
//! - `policy` — Role-based authorization decisions over role assignments

pub mod jwt;
pub mod password;
pub mod policy;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordPolicy};
pub use policy::AuthorizationPolicy;
