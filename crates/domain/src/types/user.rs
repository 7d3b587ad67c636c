//! User and token types
//!
//! Users are created on first dev login and identified by email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PROVIDER, TOKEN_TYPE_BEARER};

/// Persisted user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    /// Identity provider (e.g. `dev`, `google`, `apple`)
    pub provider: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a user (dev login body)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    #[serde(default = "default_provider")]
    pub provider: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self { email: email.into(), full_name: full_name.into(), provider: default_provider() }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string per JWT convention
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Parse the numeric user id out of `sub`.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Signed access token handed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn bearer(access_token: String, expires_at: DateTime<Utc>) -> Self {
        Self { access_token, token_type: TOKEN_TYPE_BEARER.to_string(), expires_at }
    }
}
