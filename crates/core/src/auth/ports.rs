//! Port interfaces for users and access tokens

use async_trait::async_trait;
use vibekeeper_domain::{AccessToken, Claims, NewUser, Result, User};

/// Trait for user persistence and retrieval
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get user by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Get user by email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Create a new user and return it with its assigned id
    async fn create(&self, user: NewUser) -> Result<User>;
}

/// Signs and verifies access tokens
///
/// Signing is CPU-only, so the trait is synchronous.
pub trait TokenService: Send + Sync {
    fn issue(&self, user: &User) -> Result<AccessToken>;

    /// Fails with `VibeKeeperError::Auth` on a bad signature or an expired token.
    fn verify(&self, token: &str) -> Result<Claims>;
}
