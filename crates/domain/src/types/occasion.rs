//! Occasion types
//!
//! An occasion is a dated event tied to a person (birthday, anniversary, ...)
//! and owned by a single user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Lifecycle state of an occasion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccasionStatus {
    #[default]
    Active,
    Completed,
    Dismissed,
}

impl_domain_status_conversions!(OccasionStatus {
    Active => "active",
    Completed => "completed",
    Dismissed => "dismissed",
});

/// Persisted occasion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occasion {
    pub id: i64,
    pub owner_id: i64,
    pub person: String,
    pub occasion_type: String,
    pub occasion_date: NaiveDate,
    pub person_relationship: Option<String>,
    pub notes: Option<String>,
    pub confidence_score: Option<f64>,
    pub status: OccasionStatus,
    /// The sentence the occasion was created from
    pub raw_input: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Occasion {
    /// Days from `today` until the occasion date; negative once it has passed.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.occasion_date - today).num_days()
    }

    /// True when the occasion date is today or later.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.days_until(today) >= 0
    }
}

/// Payload for creating an occasion, usually the output of extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOccasion {
    pub person: String,
    pub occasion_type: String,
    pub occasion_date: NaiveDate,
    #[serde(default)]
    pub person_relationship: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    pub raw_input: String,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OccasionPatch {
    #[serde(default)]
    pub person: Option<String>,
    #[serde(default)]
    pub occasion_type: Option<String>,
    #[serde(default)]
    pub occasion_date: Option<NaiveDate>,
    #[serde(default)]
    pub person_relationship: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<OccasionStatus>,
}

impl OccasionPatch {
    pub fn is_empty(&self) -> bool {
        self.person.is_none()
            && self.occasion_type.is_none()
            && self.occasion_date.is_none()
            && self.person_relationship.is_none()
            && self.notes.is_none()
            && self.status.is_none()
    }
}

/// List filters, taken from query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccasionFilter {
    /// Case-insensitive substring match on the person
    #[serde(default)]
    pub person: Option<String>,
    /// Case-insensitive exact match on the type
    #[serde(default)]
    pub occasion_type: Option<String>,
    #[serde(default)]
    pub status: Option<OccasionStatus>,
    #[serde(default)]
    pub upcoming_only: bool,
    /// Free-text search over person, type and raw input
    #[serde(default)]
    pub q: Option<String>,
}

impl OccasionFilter {
    /// Filter matching `term` anywhere in person, type or raw input.
    pub fn search(term: impl Into<String>) -> Self {
        Self { q: Some(term.into()), ..Self::default() }
    }
}

/// Structured candidate produced by an extractor; not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedOccasion {
    pub person: String,
    pub occasion_type: String,
    pub occasion_date: NaiveDate,
    pub person_relationship: Option<String>,
    pub notes: Option<String>,
    pub confidence_score: f64,
    pub raw_input: String,
}

impl ExtractedOccasion {
    pub fn into_new_occasion(self) -> NewOccasion {
        NewOccasion {
            person: self.person,
            occasion_type: self.occasion_type,
            occasion_date: self.occasion_date,
            person_relationship: self.person_relationship,
            notes: self.notes,
            confidence_score: Some(self.confidence_score),
            raw_input: self.raw_input,
        }
    }
}
