//! Port interfaces for occasion persistence
//!
//! Every operation is scoped to an owner; an occasion belonging to another
//! user behaves exactly like a missing one.

use async_trait::async_trait;
use chrono::NaiveDate;
use vibekeeper_domain::{NewOccasion, Occasion, OccasionFilter, OccasionPatch, Result};

#[async_trait]
pub trait OccasionRepository: Send + Sync {
    /// Persist a new occasion with status `active`
    async fn create(&self, owner_id: i64, occasion: NewOccasion) -> Result<Occasion>;

    async fn get(&self, owner_id: i64, id: i64) -> Result<Option<Occasion>>;

    /// List matching occasions, newest first.
    ///
    /// `today` is the reference date for `upcoming_only`.
    async fn list(
        &self,
        owner_id: i64,
        filter: &OccasionFilter,
        today: NaiveDate,
    ) -> Result<Vec<Occasion>>;

    /// Apply a patch; `None` when the occasion does not exist
    async fn update(&self, owner_id: i64, id: i64, patch: OccasionPatch)
        -> Result<Option<Occasion>>;

    /// Returns whether a row was deleted
    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool>;
}
