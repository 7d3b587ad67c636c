//! Database implementations

pub mod manager;
pub mod occasion_repository;
pub mod user_repository;

pub use manager::*;
pub use occasion_repository::*;
pub use user_repository::*;
