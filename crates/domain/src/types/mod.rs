//! Domain types and models

pub mod occasion;
pub mod user;

pub use occasion::{
    ExtractedOccasion, NewOccasion, Occasion, OccasionFilter, OccasionPatch, OccasionStatus,
};
pub use user::{AccessToken, Claims, NewUser, User};
