//! HTTP client with retry and timeout support
//!
//! Connect failures, timeouts and 5xx responses are retried with exponential
//! backoff; any other response is returned to the caller as-is.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as ReqwestClient, Response};
use serde::Serialize;
use tracing::{debug, warn};
use vibekeeper_domain::VibeKeeperError;

use crate::errors::InfraError;

const DEFAULT_USER_AGENT: &str = concat!("vibekeeper/", env!("CARGO_PKG_VERSION"));

/// Attempt budget and the exponential delay between attempts
#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    max_attempts: usize,
    base_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry `n` (1-based): `base * 2^(n-1)`, capped at 2^8.
    fn delay(&self, retry: usize) -> Duration {
        let exponent = retry.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1 << exponent)
    }

    fn allows_retry_after(&self, attempt: usize) -> bool {
        attempt < self.max_attempts
    }
}

/// reqwest client for JSON POSTs to completion-style APIs.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client with default timeout, attempts and backoff.
    pub fn new() -> Result<Self, VibeKeeperError> {
        Self::builder().build()
    }

    /// POST `body` as JSON with bearer auth.
    ///
    /// The body is serialised once and resent on each attempt. Any response
    /// other than a retried 5xx is handed back untouched for the caller to
    /// interpret.
    pub async fn post_json<T>(
        &self,
        url: &str,
        bearer_token: &str,
        body: &T,
    ) -> Result<Response, VibeKeeperError>
    where
        T: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body).map_err(|err| {
            VibeKeeperError::Internal(format!("failed to encode request body: {err}"))
        })?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self
                .client
                .post(url)
                .bearer_auth(bearer_token)
                .header(CONTENT_TYPE, "application/json")
                .body(payload.clone())
                .send()
                .await;

            let retry_cause = match &result {
                Ok(response) if response.status().is_server_error() => {
                    Some(format!("server returned {}", response.status()))
                }
                Err(err) if err.is_timeout() || err.is_connect() => Some(err.to_string()),
                _ => None,
            };

            let Some(cause) = retry_cause.filter(|_| self.retry.allows_retry_after(attempt)) else {
                if let Ok(response) = &result {
                    debug!(attempt, %url, status = %response.status(), "HTTP response");
                }
                return result.map_err(|err| VibeKeeperError::from(InfraError::from(err)));
            };

            let delay = self.retry.delay(attempt);
            warn!(attempt, %url, %cause, ?delay, "Retrying HTTP request");
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: RetryPolicy,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry: RetryPolicy { max_attempts: 2, base_backoff: Duration::from_millis(200) },
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientBuilder {
    /// Per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts including the first; at least one.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.retry.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.retry.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<HttpClient, VibeKeeperError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .no_proxy()
            .build()
            .map_err(|err| VibeKeeperError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, retry: self.retry })
    }
}
