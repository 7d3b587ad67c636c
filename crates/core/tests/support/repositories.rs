//! In-memory repository implementations for testing

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use vibekeeper_core::{OccasionRepository, UserRepository};
use vibekeeper_domain::{
    NewOccasion, NewUser, Occasion, OccasionFilter, OccasionPatch, OccasionStatus,
    Result as DomainResult, User,
};

/// In-memory mock for `UserRepository`.
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn get_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|user| user.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|user| user.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        let created = User {
            id: users.len() as i64 + 1,
            email: user.email,
            full_name: user.full_name,
            provider: user.provider,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }
}

/// In-memory mock for `OccasionRepository`.
///
/// Mirrors the SQL filter semantics; each insert is stamped one second after
/// the previous one so newest-first ordering is deterministic.
#[derive(Default, Clone)]
pub struct MockOccasionRepository {
    occasions: Arc<Mutex<Vec<Occasion>>>,
}

impl MockOccasionRepository {
    pub fn all(&self) -> Vec<Occasion> {
        self.occasions.lock().unwrap().clone()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(occasion: &Occasion, filter: &OccasionFilter, today: NaiveDate) -> bool {
    if let Some(person) = &filter.person {
        if !contains_ci(&occasion.person, person) {
            return false;
        }
    }
    if let Some(kind) = &filter.occasion_type {
        if !occasion.occasion_type.eq_ignore_ascii_case(kind) {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if occasion.status != status {
            return false;
        }
    }
    if filter.upcoming_only && occasion.occasion_date < today {
        return false;
    }
    if let Some(q) = &filter.q {
        return contains_ci(&occasion.person, q)
            || contains_ci(&occasion.occasion_type, q)
            || contains_ci(&occasion.raw_input, q);
    }
    true
}

#[async_trait]
impl OccasionRepository for MockOccasionRepository {
    async fn create(&self, owner_id: i64, occasion: NewOccasion) -> DomainResult<Occasion> {
        let mut occasions = self.occasions.lock().unwrap();
        let id = occasions.len() as i64 + 1;
        let stamp = Utc::now() + Duration::seconds(id);
        let created = Occasion {
            id,
            owner_id,
            person: occasion.person,
            occasion_type: occasion.occasion_type,
            occasion_date: occasion.occasion_date,
            person_relationship: occasion.person_relationship,
            notes: occasion.notes,
            confidence_score: occasion.confidence_score,
            status: OccasionStatus::Active,
            raw_input: occasion.raw_input,
            created_at: stamp,
            updated_at: stamp,
        };
        occasions.push(created.clone());
        Ok(created)
    }

    async fn get(&self, owner_id: i64, id: i64) -> DomainResult<Option<Occasion>> {
        Ok(self
            .occasions
            .lock()
            .unwrap()
            .iter()
            .find(|occasion| occasion.owner_id == owner_id && occasion.id == id)
            .cloned())
    }

    async fn list(
        &self,
        owner_id: i64,
        filter: &OccasionFilter,
        today: NaiveDate,
    ) -> DomainResult<Vec<Occasion>> {
        let mut found: Vec<Occasion> = self
            .occasions
            .lock()
            .unwrap()
            .iter()
            .filter(|occasion| occasion.owner_id == owner_id && matches(occasion, filter, today))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        patch: OccasionPatch,
    ) -> DomainResult<Option<Occasion>> {
        let mut occasions = self.occasions.lock().unwrap();
        let Some(occasion) =
            occasions.iter_mut().find(|occasion| occasion.owner_id == owner_id && occasion.id == id)
        else {
            return Ok(None);
        };

        if let Some(person) = patch.person {
            occasion.person = person;
        }
        if let Some(kind) = patch.occasion_type {
            occasion.occasion_type = kind;
        }
        if let Some(date) = patch.occasion_date {
            occasion.occasion_date = date;
        }
        if let Some(relationship) = patch.person_relationship {
            occasion.person_relationship = Some(relationship).filter(|value| !value.is_empty());
        }
        if let Some(notes) = patch.notes {
            occasion.notes = Some(notes).filter(|value| !value.is_empty());
        }
        if let Some(status) = patch.status {
            occasion.status = status;
        }
        occasion.updated_at = Utc::now();
        Ok(Some(occasion.clone()))
    }

    async fn delete(&self, owner_id: i64, id: i64) -> DomainResult<bool> {
        let mut occasions = self.occasions.lock().unwrap();
        let before = occasions.len();
        occasions.retain(|occasion| !(occasion.owner_id == owner_id && occasion.id == id));
        Ok(occasions.len() != before)
    }
}
