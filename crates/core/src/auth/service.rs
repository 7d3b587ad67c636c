//! Authentication service - core business logic

use std::sync::Arc;

use tracing::{debug, info};
use vibekeeper_domain::validation::validate_new_user;
use vibekeeper_domain::{AccessToken, NewUser, Result, User, VibeKeeperError};

use super::ports::{TokenService, UserRepository};

/// Issues tokens for dev logins and resolves bearer tokens back to users
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Sign in without verifying identity.
    ///
    /// The user is looked up by email and created on first login; an
    /// existing account is returned unchanged even if the name differs.
    pub async fn dev_login(&self, user: NewUser) -> Result<(AccessToken, User)> {
        let user = self.get_or_create(user).await?;
        let token = self.tokens.issue(&user)?;
        info!(user_id = user.id, provider = %user.provider, "Dev login issued token");
        Ok((token, user))
    }

    /// Resolve a bearer token to its user.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let claims = self.tokens.verify(token)?;
        let user_id =
            claims.user_id().ok_or_else(|| VibeKeeperError::Auth("Invalid token".into()))?;

        self.users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| VibeKeeperError::Auth("User not found".into()))
    }

    /// Get or create a user without issuing a token.
    pub async fn ensure_user(&self, email: &str, full_name: &str, provider: &str) -> Result<User> {
        self.get_or_create(NewUser::new(email, full_name).with_provider(provider)).await
    }

    async fn get_or_create(&self, user: NewUser) -> Result<User> {
        let user = NewUser {
            email: user.email.trim().to_string(),
            full_name: user.full_name.trim().to_string(),
            provider: user.provider.trim().to_string(),
        };
        validate_new_user(&user)?;

        if let Some(existing) = self.users.get_by_email(&user.email).await? {
            debug!(user_id = existing.id, "Found existing user");
            return Ok(existing);
        }

        let created = self.users.create(user).await?;
        info!(user_id = created.id, "Created user");
        Ok(created)
    }
}
