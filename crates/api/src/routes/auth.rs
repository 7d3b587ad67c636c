//! Dev login and current-user endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vibekeeper_domain::{NewUser, User};

use crate::context::SharedContext;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub provider: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            provider: user.provider,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

/// Issue a token for any email/name pair, creating the user on first login.
pub async fn login_test(
    State(ctx): State<SharedContext>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload?;

    let mut new_user = NewUser::new(request.email, request.full_name);
    if let Some(provider) = request.provider.filter(|p| !p.trim().is_empty()) {
        new_user = new_user.with_provider(provider);
    }

    let (token, user) = ctx.auth.dev_login(new_user).await?;

    Ok(Json(LoginResponse {
        access_token: token.access_token,
        token_type: token.token_type,
        expires_at: token.expires_at,
        user: user.into(),
    }))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
