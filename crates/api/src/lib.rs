//! # VibeKeeper API
//!
//! HTTP application layer - routes, HTML pages and the main entry point.
//!
//! This crate contains:
//! - axum routes for the JSON API and the htmx front end
//! - Application context (dependency injection)
//! - Logging setup and error rendering
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Serves the router built by [`routes::router`]

pub mod context;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::*;
pub use error::ApiError;
pub use routes::router;
