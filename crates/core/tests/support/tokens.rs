//! Unsigned token service for auth tests
//!
//! Tokens are `token-<user id>`; anything else fails verification.

use vibekeeper_core::TokenService;
use vibekeeper_domain::{AccessToken, Claims, Result as DomainResult, User, VibeKeeperError};

#[derive(Default, Clone)]
pub struct FakeTokenService;

impl TokenService for FakeTokenService {
    fn issue(&self, user: &User) -> DomainResult<AccessToken> {
        Ok(AccessToken::bearer(
            format!("token-{}", user.id),
            chrono::Utc::now() + chrono::Duration::hours(1),
        ))
    }

    fn verify(&self, token: &str) -> DomainResult<Claims> {
        let sub = token
            .strip_prefix("token-")
            .ok_or_else(|| VibeKeeperError::Auth("Invalid token".into()))?;
        Ok(Claims { sub: sub.to_string(), email: String::new(), iat: 0, exp: i64::MAX })
    }
}
