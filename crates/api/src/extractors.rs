//! Request extractors

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use vibekeeper_domain::{User, VibeKeeperError};

use crate::context::SharedContext;
use crate::error::ApiError;

/// The user identified by the request's bearer token
///
/// Rejects with 401 `Not authenticated` when the header is missing and
/// with 401 from [`vibekeeper_core::AuthService::authenticate`] when the
/// token is bad.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<SharedContext> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &SharedContext,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| VibeKeeperError::Auth("Not authenticated".into()))?;

        let user = ctx.auth.authenticate(token).await?;
        Ok(Self(user))
    }
}

/// Token from an `Authorization: Bearer <token>` header; scheme is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|token| !token.is_empty())
}
