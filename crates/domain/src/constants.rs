//! Application constants
//!
//! Centralized location for domain-level limits and defaults used throughout
//! the application.

// Field limits
pub const MAX_PERSON_LENGTH: usize = 100;
pub const MAX_OCCASION_TYPE_LENGTH: usize = 50;
pub const MAX_RELATIONSHIP_LENGTH: usize = 50;
pub const MAX_NOTES_LENGTH: usize = 500;
pub const MAX_RAW_INPUT_LENGTH: usize = 500;
pub const MAX_FULL_NAME_LENGTH: usize = 100;

// Extraction defaults
pub const PATTERN_CONFIDENCE: f64 = 0.8;
pub const PATTERN_DEFAULTED_DATE_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_LLM_CONFIDENCE: f64 = 0.9;
pub const DEFAULT_DATE_OFFSET_DAYS: i64 = 30;
pub const EXTRACTED_NOTES_PREFIX: &str = "Extracted from: ";

// Occasion keywords recognised by the pattern extractor
pub const OCCASION_KEYWORDS: [&str; 4] = ["birthday", "anniversary", "graduation", "wedding"];

// Auth
pub const DEFAULT_PROVIDER: &str = "dev";
pub const TOKEN_TYPE_BEARER: &str = "bearer";
