use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Plaintext hashed at construction to produce the stand-in hash for unknown accounts.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

/// Authentication coordinator combining password verification and JWT generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and JWT token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    dummy_hash: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_handler` - Configured token issuer/verifier
    /// * `password_hasher` - Configured password hasher
    ///
    /// # Errors
    /// * `PasswordError` - The stand-in hash for unknown accounts could not be computed
    pub fn new(
        jwt_handler: JwtHandler,
        password_hasher: PasswordHasher,
    ) -> Result<Self, AuthenticationError> {
        let dummy_hash = password_hasher.hash(DUMMY_PASSWORD)?;

        Ok(Self {
            password_hasher,
            jwt_handler,
            dummy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a login attempt.
    ///
    /// `stored_hash` is `None` when no account matched the login name. The
    /// password is then checked against a stand-in hash with the same work
    /// factor so both failure cases cost the same and look the same.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or password does not match
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<(), AuthenticationError> {
        match stored_hash {
            Some(hash) => {
                if self.password_hasher.verify(password, hash)? {
                    Ok(())
                } else {
                    Err(AuthenticationError::InvalidCredentials)
                }
            }
            None => {
                let _ = self.password_hasher.verify(password, &self.dummy_hash)?;
                Err(AuthenticationError::InvalidCredentials)
            }
        }
    }

    /// Issue an access token for an already authenticated subject.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        subject: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        self.jwt_handler.issue(subject, now)
    }

    /// Validate an access token at time `now`.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, forged, from another issuer, or expired
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token, now)
    }
}
