//! HMAC-signed JWT access tokens

use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use vibekeeper_core::TokenService;
use vibekeeper_domain::{AccessToken, AuthConfig, Claims, Result, User, VibeKeeperError};

use crate::errors::InfraError;

/// Issues and verifies dev-login tokens with a shared secret
pub struct JwtTokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration: Duration,
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

impl JwtTokenService {
    /// Only HMAC algorithms are accepted.
    pub fn new(secret: &str, algorithm: &str, expiration_hours: i64) -> Result<Self> {
        let algorithm = Algorithm::from_str(algorithm).map_err(|_| {
            VibeKeeperError::Config(format!("unsupported JWT algorithm '{algorithm}'"))
        })?;
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(VibeKeeperError::Config(format!(
                "JWT algorithm {algorithm:?} is not an HMAC algorithm"
            )));
        }
        if secret.is_empty() {
            return Err(VibeKeeperError::Config("JWT secret must not be empty".into()));
        }
        let expiration = Duration::try_hours(expiration_hours).ok_or_else(|| {
            VibeKeeperError::Config(format!("JWT lifetime of {expiration_hours} hours is out of range"))
        })?;

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration,
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        Self::new(&config.jwt_secret, &config.jwt_algorithm, config.jwt_expiration_hours)
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<AccessToken> {
        let issued_at = Utc::now();
        let expires_at = issued_at + self.expiration;
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|err| VibeKeeperError::from(InfraError::from(err)))?;
        Ok(AccessToken::bearer(token, expires_at))
    }

    fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| VibeKeeperError::from(InfraError::from(err)))
    }
}
