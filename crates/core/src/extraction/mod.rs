//! Occasion extraction from free text

pub mod chain;
pub mod pattern;
pub mod ports;

pub use chain::ExtractionChain;
pub use pattern::PatternExtractor;
pub use ports::*;
