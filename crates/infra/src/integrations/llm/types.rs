//! LLM API types for occasion extraction

use serde::{Deserialize, Serialize};
use vibekeeper_domain::VibeKeeperError;

/// LLM API error types
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Network-level error (connection failed, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// The API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limit exceeded - should retry after delay
    #[error("Rate limit exceeded (retry after {0}s)")]
    RateLimit(u64),

    /// Authentication failed (invalid API key)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Response envelope doesn't match the Chat Completions schema
    #[error("Invalid response schema: {0}")]
    InvalidSchema(String),
}

impl From<LlmError> for VibeKeeperError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::InvalidSchema(_) => VibeKeeperError::Extraction(err.to_string()),
            // A bad API key is the server's problem, not the caller's
            _ => VibeKeeperError::Network(format!("LLM {err}")),
        }
    }
}

/// Chat Completions request body
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat Completions response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: Message,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    #[serde(default)]
    pub content: Option<String>,
}

/// Occasion object the model is asked to return
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct LlmOccasion {
    pub person: String,
    pub occasion_type: String,
    pub date: String,
    #[serde(default, alias = "relationship")]
    pub person_relationship: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}
