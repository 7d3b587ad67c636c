//! Shared test helpers for `vibekeeper-core` integration tests.
//!
//! In-memory fakes for every core port so service tests can focus on
//! behaviour instead of storage.

#![allow(dead_code)]

pub mod extractors;
pub mod repositories;
pub mod tokens;

use chrono::NaiveDate;

/// Fixed "today" used across service tests
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
