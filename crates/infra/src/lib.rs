//! # VibeKeeper Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite repositories behind an r2d2 pool
//! - HTTP client with retries
//! - LLM-backed occasion extractor
//! - JWT token service
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `vibekeeper-core`
//! - Contains all "impure" code (I/O, network, clock-driven token expiry)

pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use auth::*;
pub use database::*;
pub use http::*;
pub use integrations::*;
