//! Port interface for occasion extractors

use async_trait::async_trait;
use chrono::NaiveDate;
use vibekeeper_domain::{ExtractedOccasion, Result};

/// Converts a sentence into a structured occasion candidate
#[async_trait]
pub trait OccasionExtractor: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// `Ok(None)` means the text holds nothing recognisable; errors are
    /// reserved for failures of the extractor itself.
    async fn extract(&self, text: &str, today: NaiveDate) -> Result<Option<ExtractedOccasion>>;
}
