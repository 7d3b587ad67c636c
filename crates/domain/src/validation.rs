//! Field validation for incoming payloads
//!
//! Strings are measured after trimming, in characters rather than bytes.
//! Every failure is an [`VibeKeeperError::InvalidInput`] naming the field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    MAX_FULL_NAME_LENGTH, MAX_NOTES_LENGTH, MAX_OCCASION_TYPE_LENGTH, MAX_PERSON_LENGTH,
    MAX_RAW_INPUT_LENGTH, MAX_RELATIONSHIP_LENGTH,
};
use crate::errors::{Result, VibeKeeperError};
use crate::types::{NewOccasion, NewUser, OccasionPatch};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("EMAIL_REGEX should compile - this is a bug")
});

fn require_text(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(VibeKeeperError::InvalidInput(format!("{field} must not be empty")));
    }
    if len > max {
        return Err(VibeKeeperError::InvalidInput(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn optional_text(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(value) if value.trim().chars().count() > max => Err(VibeKeeperError::InvalidInput(
            format!("{field} must be at most {max} characters"),
        )),
        _ => Ok(()),
    }
}

fn confidence(value: Option<f64>) -> Result<()> {
    match value {
        Some(score) if !(0.0..=1.0).contains(&score) => Err(VibeKeeperError::InvalidInput(
            "confidence_score must be between 0.0 and 1.0".into(),
        )),
        _ => Ok(()),
    }
}

/// Free-text sentence handed to an extractor.
pub fn validate_raw_input(raw_input: &str) -> Result<()> {
    require_text("raw_input", raw_input, MAX_RAW_INPUT_LENGTH)
}

pub fn validate_new_occasion(occasion: &NewOccasion) -> Result<()> {
    require_text("person", &occasion.person, MAX_PERSON_LENGTH)?;
    require_text("occasion_type", &occasion.occasion_type, MAX_OCCASION_TYPE_LENGTH)?;
    optional_text(
        "person_relationship",
        occasion.person_relationship.as_deref(),
        MAX_RELATIONSHIP_LENGTH,
    )?;
    optional_text("notes", occasion.notes.as_deref(), MAX_NOTES_LENGTH)?;
    confidence(occasion.confidence_score)?;
    validate_raw_input(&occasion.raw_input)
}

/// Only the fields present in the patch are checked.
pub fn validate_patch(patch: &OccasionPatch) -> Result<()> {
    if let Some(person) = &patch.person {
        require_text("person", person, MAX_PERSON_LENGTH)?;
    }
    if let Some(occasion_type) = &patch.occasion_type {
        require_text("occasion_type", occasion_type, MAX_OCCASION_TYPE_LENGTH)?;
    }
    optional_text(
        "person_relationship",
        patch.person_relationship.as_deref(),
        MAX_RELATIONSHIP_LENGTH,
    )?;
    optional_text("notes", patch.notes.as_deref(), MAX_NOTES_LENGTH)
}

pub fn validate_new_user(user: &NewUser) -> Result<()> {
    if !EMAIL_REGEX.is_match(user.email.trim()) {
        return Err(VibeKeeperError::InvalidInput("email must be a valid address".into()));
    }
    require_text("full_name", &user.full_name, MAX_FULL_NAME_LENGTH)?;
    require_text("provider", &user.provider, MAX_OCCASION_TYPE_LENGTH)
}
