//! LLM integration for occasion extraction
//!
//! Sends the user's sentence to an OpenAI-compatible Chat Completions
//! endpoint and turns the model's JSON reply into an occasion candidate.
//!
//! # Architecture
//!
//! - **Client**: `LlmOccasionExtractor` - implements the core `OccasionExtractor` port
//! - **Prompt**: `build_prompt` - instructions plus worked examples
//! - **Types**: request/response envelopes and the reply payload
//!
//! # Usage
//!
//! ```no_run
//! use vibekeeper_core::OccasionExtractor;
//! use vibekeeper_infra::http::HttpClient;
//! use vibekeeper_infra::integrations::llm::LlmOccasionExtractor;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = LlmOccasionExtractor::new(std::env::var("LITELLM_API_KEY")?, HttpClient::new()?);
//!
//! let today = vibekeeper_domain::today();
//! if let Some(found) = extractor.extract("Mom's anniversary on Dec 15th", today).await? {
//!     println!("{} on {}", found.person, found.occasion_date);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - **Unusable replies** (`null`, invalid JSON, missing keys, bad dates): `Ok(None)`
//! - **Network errors and 5xx**: retried by `HttpClient`, then `LlmError::Network`
//! - **401/403**: `LlmError::Authentication`; **429**: `LlmError::RateLimit`

pub mod client;
pub mod prompt;
pub mod types;

pub use client::LlmOccasionExtractor;
pub use prompt::build_prompt;
pub use types::LlmError;
