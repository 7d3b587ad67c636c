//! Occasion service - core business logic

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};
use vibekeeper_domain::validation::{validate_new_occasion, validate_patch, validate_raw_input};
use vibekeeper_domain::{
    ExtractedOccasion, NewOccasion, Occasion, OccasionFilter, OccasionPatch, Result,
    VibeKeeperError,
};

use super::ports::OccasionRepository;
use crate::extraction::ports::OccasionExtractor;

/// Extraction, persistence and querying of a user's occasions
pub struct OccasionService {
    repository: Arc<dyn OccasionRepository>,
    extractor: Arc<dyn OccasionExtractor>,
    today: fn() -> NaiveDate,
}

impl OccasionService {
    /// Create a new occasion service using the local calendar date
    pub fn new(
        repository: Arc<dyn OccasionRepository>,
        extractor: Arc<dyn OccasionExtractor>,
    ) -> Self {
        Self { repository, extractor, today: vibekeeper_domain::today }
    }

    /// Override the date source (tests pin "today").
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Today's date as seen by this service
    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    /// Turn a sentence into a structured occasion without persisting it.
    pub async fn extract(&self, raw_input: &str) -> Result<ExtractedOccasion> {
        validate_raw_input(raw_input)?;
        let text = raw_input.trim();

        match self.extractor.extract(text, self.today()).await? {
            Some(mut extracted) => {
                extracted.raw_input = raw_input.to_string();
                debug!(
                    extractor = self.extractor.name(),
                    confidence = extracted.confidence_score,
                    "Extracted occasion"
                );
                Ok(extracted)
            }
            None => Err(VibeKeeperError::Extraction("Could not extract occasion data".into())),
        }
    }

    pub async fn create(&self, owner_id: i64, occasion: NewOccasion) -> Result<Occasion> {
        let occasion = tidy_new_occasion(occasion);
        validate_new_occasion(&occasion)?;

        let created = self.repository.create(owner_id, occasion).await?;
        info!(owner_id, occasion_id = created.id, "Created occasion");
        Ok(created)
    }

    /// Extract from a sentence and persist the result in one step.
    pub async fn quick_add(&self, owner_id: i64, raw_input: &str) -> Result<Occasion> {
        let extracted = self.extract(raw_input).await?;
        self.create(owner_id, extracted.into_new_occasion()).await
    }

    pub async fn list(&self, owner_id: i64, filter: OccasionFilter) -> Result<Vec<Occasion>> {
        self.repository.list(owner_id, &filter, self.today()).await
    }

    pub async fn get(&self, owner_id: i64, id: i64) -> Result<Occasion> {
        self.repository.get(owner_id, id).await?.ok_or_else(not_found)
    }

    pub async fn update(&self, owner_id: i64, id: i64, patch: OccasionPatch) -> Result<Occasion> {
        if patch.is_empty() {
            return Err(VibeKeeperError::InvalidInput("No fields to update".into()));
        }
        let patch = tidy_patch(patch);
        validate_patch(&patch)?;

        let updated = self.repository.update(owner_id, id, patch).await?.ok_or_else(not_found)?;
        info!(owner_id, occasion_id = id, "Updated occasion");
        Ok(updated)
    }

    pub async fn delete(&self, owner_id: i64, id: i64) -> Result<()> {
        if !self.repository.delete(owner_id, id).await? {
            return Err(not_found());
        }
        info!(owner_id, occasion_id = id, "Deleted occasion");
        Ok(())
    }

    /// Case-insensitive substring search over person, type and raw input.
    ///
    /// A blank term lists everything.
    pub async fn search(&self, owner_id: i64, term: &str) -> Result<Vec<Occasion>> {
        let term = term.trim();
        let filter =
            if term.is_empty() { OccasionFilter::default() } else { OccasionFilter::search(term) };
        self.list(owner_id, filter).await
    }
}

fn not_found() -> VibeKeeperError {
    VibeKeeperError::NotFound("Occasion not found".into())
}

/// Trim text fields other than `raw_input`; blank optional fields become `None`.
fn tidy_new_occasion(occasion: NewOccasion) -> NewOccasion {
    NewOccasion {
        person: occasion.person.trim().to_string(),
        occasion_type: occasion.occasion_type.trim().to_string(),
        person_relationship: tidy_optional(occasion.person_relationship),
        notes: tidy_optional(occasion.notes),
        ..occasion
    }
}

fn tidy_patch(patch: OccasionPatch) -> OccasionPatch {
    OccasionPatch {
        person: patch.person.map(|value| value.trim().to_string()),
        occasion_type: patch.occasion_type.map(|value| value.trim().to_string()),
        person_relationship: patch.person_relationship.map(|value| value.trim().to_string()),
        notes: patch.notes.map(|value| value.trim().to_string()),
        ..patch
    }
}

fn tidy_optional(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
