//! # VibeKeeper Domain
//!
//! Business domain types and models for VibeKeeper.
//!
//! This crate contains:
//! - Domain data types (Occasion, User, filters and patches)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Field validation and date utilities
//!
//! ## Architecture
//! - No dependencies on other VibeKeeper crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export date utilities
pub use utils::dates::{month_from_name, normalize_date, today};
