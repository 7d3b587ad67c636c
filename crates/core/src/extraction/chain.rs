//! Ordered fallback across extractors
//!
//! Extractors run in order until one returns a candidate. A failing extractor
//! is logged and skipped, so an LLM outage degrades to pattern matching in
//! hybrid mode. When nothing yields a candidate the last failure is returned,
//! so a lone extractor's errors reach the caller.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, warn};
use vibekeeper_domain::{ExtractedOccasion, ExtractorMode, Result, VibeKeeperError};

use super::ports::OccasionExtractor;

pub struct ExtractionChain {
    extractors: Vec<Arc<dyn OccasionExtractor>>,
}

impl ExtractionChain {
    /// Chain with a single extractor
    pub fn new(primary: Arc<dyn OccasionExtractor>) -> Self {
        Self { extractors: vec![primary] }
    }

    /// Append an extractor tried after the existing ones decline
    pub fn with_fallback(mut self, fallback: Arc<dyn OccasionExtractor>) -> Self {
        self.extractors.push(fallback);
        self
    }

    /// Build the chain for a configured mode.
    ///
    /// `llm` mode without an LLM extractor is a configuration error; `hybrid`
    /// without one runs the pattern extractor alone.
    pub fn for_mode(
        mode: ExtractorMode,
        pattern: Arc<dyn OccasionExtractor>,
        llm: Option<Arc<dyn OccasionExtractor>>,
    ) -> Result<Self> {
        match (mode, llm) {
            (ExtractorMode::Pattern, _) => Ok(Self::new(pattern)),
            (ExtractorMode::Llm, Some(llm)) => Ok(Self::new(llm)),
            (ExtractorMode::Llm, None) => Err(VibeKeeperError::Config(
                "llm extraction mode requires an LLM extractor".into(),
            )),
            (ExtractorMode::Hybrid, Some(llm)) => Ok(Self::new(llm).with_fallback(pattern)),
            (ExtractorMode::Hybrid, None) => {
                warn!("Hybrid extraction requested without an LLM; using pattern matching only");
                Ok(Self::new(pattern))
            }
        }
    }

    /// Extractor names in the order they run
    pub fn names(&self) -> Vec<&str> {
        self.extractors.iter().map(|extractor| extractor.name()).collect()
    }
}

#[async_trait]
impl OccasionExtractor for ExtractionChain {
    fn name(&self) -> &str {
        "chain"
    }

    async fn extract(&self, text: &str, today: NaiveDate) -> Result<Option<ExtractedOccasion>> {
        let mut last_error = None;
        for extractor in &self.extractors {
            match extractor.extract(text, today).await {
                Ok(Some(found)) => {
                    debug!(extractor = extractor.name(), "Extractor produced a candidate");
                    return Ok(Some(found));
                }
                Ok(None) => {
                    debug!(extractor = extractor.name(), "Extractor found nothing");
                }
                Err(err) => {
                    warn!(extractor = extractor.name(), error = %err, "Extractor failed");
                    last_error = Some(err);
                }
            }
        }
        match last_error {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }
}
