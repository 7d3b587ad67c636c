//! Configuration structures
//!
//! Every section has defaults so partial config files are accepted; only the
//! JWT secret has to be supplied.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VibeKeeperError};
use crate::impl_domain_status_conversions;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub extractor: ExtractorConfig,
}

impl Config {
    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(VibeKeeperError::Config("server.port must be non-zero".into()));
        }
        if self.database.pool_size == 0 {
            return Err(VibeKeeperError::Config("database.pool_size must be at least 1".into()));
        }
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(VibeKeeperError::Config("auth.jwt_secret must be set".into()));
        }
        if !SUPPORTED_JWT_ALGORITHMS.contains(&self.auth.jwt_algorithm.as_str()) {
            return Err(VibeKeeperError::Config(format!(
                "unsupported auth.jwt_algorithm '{}' (expected one of {})",
                self.auth.jwt_algorithm,
                SUPPORTED_JWT_ALGORITHMS.join(", ")
            )));
        }
        if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&self.auth.jwt_expiration_hours) {
            return Err(VibeKeeperError::Config(format!(
                "auth.jwt_expiration_hours must be between 1 and {MAX_JWT_EXPIRATION_HOURS}"
            )));
        }
        if self.extractor.mode == Some(ExtractorMode::Llm) && !self.extractor.has_api_key() {
            return Err(VibeKeeperError::Config(
                "extractor.mode = llm requires extractor.api_key".into(),
            ));
        }
        Ok(())
    }
}

/// HMAC algorithms accepted for dev-login tokens
pub const SUPPORTED_JWT_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Longest accepted token lifetime
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 366;

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API with credentials
    pub cors_origins: Vec<String>,
    /// Account the HTML front end acts as
    pub web_user_email: String,
    pub web_user_name: String,
    pub debug: bool,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            web_user_email: "guest@vibekeeper.local".to_string(),
            web_user_name: "Guest".to_string(),
            debug: false,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Database settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "occasions.db".to_string(), pool_size: 4 }
    }
}

/// Token signing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_algorithm: String,
    pub jwt_expiration_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_algorithm: "HS256".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

/// Which extractors run, and in what order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorMode {
    /// Regex heuristics only
    Pattern,
    /// LLM completion only
    Llm,
    /// LLM first, regex heuristics when the LLM yields nothing
    Hybrid,
}

impl_domain_status_conversions!(ExtractorMode {
    Pattern => "pattern",
    Llm => "llm",
    Hybrid => "hybrid",
});

/// Extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Explicit mode; derived from the presence of an API key when unset
    pub mode: Option<ExtractorMode>,
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub timeout_secs: u64,
    pub max_attempts: usize,
    /// Days ahead used when the pattern extractor finds no date
    pub default_date_offset_days: i64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            mode: None,
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            timeout_secs: 30,
            max_attempts: 2,
            default_date_offset_days: crate::constants::DEFAULT_DATE_OFFSET_DAYS,
        }
    }
}

impl ExtractorConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    pub fn effective_mode(&self) -> ExtractorMode {
        match self.mode {
            Some(mode) => mode,
            None if self.has_api_key() => ExtractorMode::Hybrid,
            None => ExtractorMode::Pattern,
        }
    }
}
