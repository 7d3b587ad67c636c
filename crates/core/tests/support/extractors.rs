//! Scripted extractors for chain and service tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use vibekeeper_core::OccasionExtractor;
use vibekeeper_domain::{ExtractedOccasion, Result as DomainResult, VibeKeeperError};

/// What a scripted extractor does on every call
#[derive(Clone)]
pub enum Script {
    Found(ExtractedOccasion),
    Nothing,
    Fail(String),
}

/// Extractor that replays a fixed outcome and counts calls
#[derive(Clone)]
pub struct ScriptedExtractor {
    name: &'static str,
    script: Script,
    calls: Arc<AtomicUsize>,
}

impl ScriptedExtractor {
    pub fn new(name: &'static str, script: Script) -> Self {
        Self { name, script, calls: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OccasionExtractor for ScriptedExtractor {
    fn name(&self) -> &str {
        self.name
    }

    async fn extract(
        &self,
        _text: &str,
        _today: NaiveDate,
    ) -> DomainResult<Option<ExtractedOccasion>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Found(found) => Ok(Some(found.clone())),
            Script::Nothing => Ok(None),
            Script::Fail(msg) => Err(VibeKeeperError::Network(msg.clone())),
        }
    }
}

pub fn candidate(person: &str, date: NaiveDate, confidence: f64) -> ExtractedOccasion {
    ExtractedOccasion {
        person: person.to_string(),
        occasion_type: "birthday".to_string(),
        occasion_date: date,
        person_relationship: None,
        notes: None,
        confidence_score: confidence,
        raw_input: format!("{person}'s birthday"),
    }
}
