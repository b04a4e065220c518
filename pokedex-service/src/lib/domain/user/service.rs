use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::IssuedToken;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Owns registration, login and bearer-token authorization. Holds no
/// per-request state: every `authorize` call re-verifies the token and
/// re-reads the user.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token handling
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        self.authenticator
            .hash_password(password)
            .map_err(|e| UserError::Credentials(format!("Password hashing failed: {}", e)))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(&command.password)?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(
        &self,
        command: LoginCommand,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, UserError> {
        let user = self.repository.find_by_email(&command.email).await?;
        let stored_hash = user.as_ref().map(|u| u.password_hash.as_str());

        self.authenticator
            .verify_credentials(&command.password, stored_hash)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!("Login rejected: invalid credentials");
                    UserError::InvalidCredentials
                }
                other => UserError::Credentials(other.to_string()),
            })?;

        let user = user.ok_or(UserError::InvalidCredentials)?;

        let issued = self
            .authenticator
            .issue_token(user.id, now)
            .map_err(|e| UserError::Credentials(format!("Token generation failed: {}", e)))?;
        tracing::debug!(user_id = %user.id, expires_at = issued.claims.exp, "Access token issued");

        Ok(issued)
    }

    async fn authorize(&self, token: &str, now: DateTime<Utc>) -> Result<User, UserError> {
        let claims = self
            .authenticator
            .validate_token(token, now)
            .map_err(|e| {
                tracing::warn!(reason = %e, "Bearer token rejected");
                UserError::Unauthorized
            })?;

        let user_id = UserId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(reason = %e, "Bearer token subject is not a user id");
            UserError::Unauthorized
        })?;

        self.repository.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::warn!(user_id = %user_id, "Bearer token subject no longer exists");
            UserError::Unauthorized
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != user.email {
                if let Some(existing) = self.repository.find_by_email(new_email.as_str()).await? {
                    if existing.id != user.id {
                        return Err(UserError::EmailAlreadyExists(new_email.to_string()));
                    }
                }
            }
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            if new_password.is_empty() {
                return Err(UserError::EmptyPassword);
            }
            user.password_hash = self.hash_password(&new_password)?;
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
