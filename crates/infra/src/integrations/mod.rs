//! External service integrations

pub mod llm;

pub use llm::{LlmError, LlmOccasionExtractor};
