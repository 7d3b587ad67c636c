//! LLM-backed occasion extractor

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info, warn};
use vibekeeper_core::OccasionExtractor;
use vibekeeper_domain::constants::DEFAULT_LLM_CONFIDENCE;
use vibekeeper_domain::{
    normalize_date, ExtractedOccasion, ExtractorConfig, Result as DomainResult, VibeKeeperError,
};

use super::prompt::build_prompt;
use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, LlmError, LlmOccasion,
};
use crate::http::HttpClient;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.1;
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Extracts occasions by asking a chat-completions model
pub struct LlmOccasionExtractor {
    http_client: HttpClient,
    api_key: String,
    model: String,
    api_url: String,
}

impl LlmOccasionExtractor {
    /// Create a new extractor
    ///
    /// # Arguments
    /// * `api_key` - bearer token for the completions endpoint
    /// * `http_client` - HTTP client with retry logic
    pub fn new(api_key: impl Into<String>, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Build from configuration; `None` when no API key is configured.
    pub fn from_config(config: &ExtractorConfig) -> DomainResult<Option<Self>> {
        let Some(api_key) = config.api_key.as_deref().filter(|_| config.has_api_key()) else {
            return Ok(None);
        };

        let http_client = HttpClient::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts)
            .build()?;

        Ok(Some(
            Self::new(api_key.trim(), http_client)
                .with_model(config.model.clone())
                .with_api_url(config.api_url.clone()),
        ))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at another OpenAI-compatible endpoint (LiteLLM proxy, tests)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one completion and interpret the reply.
    ///
    /// # Errors
    /// Returns `LlmError` for transport failures, non-2xx statuses and
    /// malformed envelopes. A well-formed reply that holds no usable occasion
    /// is `Ok(None)`.
    pub async fn complete(
        &self,
        text: &str,
        today: NaiveDate,
    ) -> Result<Option<ExtractedOccasion>, LlmError> {
        let request_payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(text, today),
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .http_client
            .post_json(&self.api_url, &self.api_key, &request_payload)
            .await
            .map_err(|err| LlmError::Network(err.message().to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), model = %self.model, "Received LLM API response");

        if !status.is_success() {
            return Err(handle_error_status(status.as_u16(), response).await);
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidSchema(format!("Failed to parse response: {e}")))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidSchema("Response contained no content".to_string()))?;

        let extracted = parse_reply(&content, text, today);
        if extracted.is_none() {
            info!("LLM reply held no usable occasion");
        }
        Ok(extracted)
    }
}

#[async_trait]
impl OccasionExtractor for LlmOccasionExtractor {
    fn name(&self) -> &str {
        "llm"
    }

    async fn extract(
        &self,
        text: &str,
        today: NaiveDate,
    ) -> DomainResult<Option<ExtractedOccasion>> {
        self.complete(text, today).await.map_err(VibeKeeperError::from)
    }
}

/// Handle HTTP error status codes
async fn handle_error_status(status: u16, response: reqwest::Response) -> LlmError {
    match status {
        401 | 403 => LlmError::Authentication(format!("Invalid API key ({status})")),
        429 => {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            LlmError::RateLimit(retry_after)
        }
        _ => {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            LlmError::Api { status, message }
        }
    }
}

/// Interpret the model's reply text.
///
/// Accepts a bare JSON object optionally wrapped in a Markdown code fence.
/// `null`, invalid JSON, missing keys, blank fields and unparseable dates all
/// yield `None`.
pub(crate) fn parse_reply(content: &str, text: &str, today: NaiveDate) -> Option<ExtractedOccasion> {
    let body = strip_code_fence(content.trim());
    if body.is_empty() || body.eq_ignore_ascii_case("null") {
        return None;
    }

    let reply: LlmOccasion = match serde_json::from_str(body) {
        Ok(reply) => reply,
        Err(err) => {
            warn!(error = %err, "LLM reply was not a usable JSON object");
            return None;
        }
    };

    let person = reply.person.trim();
    let occasion_type = reply.occasion_type.trim();
    if person.is_empty() || occasion_type.is_empty() {
        return None;
    }

    let Some(occasion_date) = normalize_date(&reply.date, today) else {
        warn!(date = %reply.date, "LLM reply date could not be parsed");
        return None;
    };

    let confidence_score = reply
        .confidence
        .filter(|score| score.is_finite())
        .unwrap_or(DEFAULT_LLM_CONFIDENCE)
        .clamp(0.0, 1.0);

    Some(ExtractedOccasion {
        person: person.to_string(),
        occasion_type: occasion_type.to_string(),
        occasion_date,
        person_relationship: non_blank(reply.person_relationship),
        notes: non_blank(reply.notes),
        confidence_score,
        raw_input: text.to_string(),
    })
}

fn strip_code_fence(body: &str) -> &str {
    let Some(rest) = body.strip_prefix("```") else {
        return body;
    };
    // Drop the info string ("json") on the opening fence line
    let rest = rest.split_once('\n').map_or("", |(_, after)| after);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
