//! Authentication utilities library
//!
//! Provides the authentication primitives used by the pokedex service:
//! - Password hashing (Argon2id) with a configurable work factor
//! - Issuing and verifying signed, time-bound access tokens (JWT)
//! - Login coordination that does not reveal whether an account exists
//!
//! Verification functions take the current time as an argument so that
//! callers (and tests) control the clock.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Utc;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").with_issuer("pokedex");
//! let now = Utc::now();
//! let issued = handler.issue("user123", now).unwrap();
//! let claims = handler.verify(&issued.access_token, now).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, JwtHandler, PasswordHasher};
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(
//!     JwtHandler::new(b"secret_key_at_least_32_bytes_long!"),
//!     PasswordHasher::new(),
//! )
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! auth.verify_credentials("password123", Some(&hash)).unwrap();
//! let issued = auth.issue_token("user123", Utc::now()).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&issued.access_token, Utc::now()).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
