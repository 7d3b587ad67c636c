//! # VibeKeeper Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for users, tokens, occasions and
//!   extractors
//! - The regex-based occasion extractor and the extraction chain
//! - Authentication and occasion services
//!
//! ## Architecture Principles
//! - Only depends on `vibekeeper-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod auth;
pub mod extraction;
pub mod occasions;

// Re-export specific items to avoid ambiguity
pub use auth::ports::{TokenService, UserRepository};
pub use auth::AuthService;
pub use extraction::ports::OccasionExtractor;
pub use extraction::{ExtractionChain, PatternExtractor};
pub use occasions::ports::OccasionRepository;
pub use occasions::OccasionService;
