//! In-memory store.
//!
//! Intended for tests and local development. Not optimized; every listing
//! scans the full map, which is fine at that scale.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use equipe_core::{Collaborator, CollaboratorId, CollaboratorPatch, UserId};

use crate::collaborators::CollaboratorStore;
use crate::error::{StoreError, StoreResult};
use crate::query::{CollaboratorFilter, CollaboratorPage, Pagination};
use crate::users::{NewUser, UserRecord, UserStore};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    collaborators: RwLock<HashMap<CollaboratorId, Collaborator>>,
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(filter: &CollaboratorFilter, c: &Collaborator) -> bool {
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        let hit = c.name.to_lowercase().contains(&needle)
            || c.cpf.to_lowercase().contains(&needle)
            || c.email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if c.status != status {
            return false;
        }
    }
    // Exact, case-sensitive — unlike `search` above.
    if let Some(city) = &filter.city {
        if c.city.as_deref() != Some(city.as_str()) {
            return false;
        }
    }
    if let Some(state) = filter.state {
        if c.state != Some(state) {
            return false;
        }
    }
    true
}

#[async_trait]
impl CollaboratorStore for InMemoryStore {
    async fn insert(&self, record: Collaborator) -> StoreResult<Collaborator> {
        let mut map = self.collaborators.write().expect("lock poisoned");
        if map.values().any(|c| c.cpf == record.cpf) {
            return Err(StoreError::UniqueViolation("cpf"));
        }
        map.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: CollaboratorId) -> StoreResult<Collaborator> {
        self.collaborators
            .read()
            .expect("lock poisoned")
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(
        &self,
        id: CollaboratorId,
        patch: CollaboratorPatch,
        updated_by: UserId,
    ) -> StoreResult<Collaborator> {
        let mut map = self.collaborators.write().expect("lock poisoned");

        if let Some(new_cpf) = &patch.cpf {
            if map.values().any(|c| c.id != id && &c.cpf == new_cpf) {
                return Err(StoreError::UniqueViolation("cpf"));
            }
        }

        let record = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.apply_patch(patch, updated_by, Utc::now());
        Ok(record.clone())
    }

    async fn list(
        &self,
        filter: CollaboratorFilter,
        pagination: Pagination,
    ) -> StoreResult<CollaboratorPage> {
        let map = self.collaborators.read().expect("lock poisoned");

        let mut hits: Vec<Collaborator> =
            map.values().filter(|c| matches(&filter, c)).cloned().collect();
        // Newest first; id as tiebreaker for records created in the same instant.
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.as_uuid().cmp(a.id.as_uuid())));

        let total = hits.len() as u64;
        let items = hits
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();

        Ok(CollaboratorPage { items, total })
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<UserRecord> {
        let mut map = self.users.write().expect("lock poisoned");
        if map.values().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation("email"));
        }
        let record = UserRecord {
            id: UserId::new(),
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        map.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .expect("lock poisoned")
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserRecord>> {
        Ok(self.users.read().expect("lock poisoned").get(&id).cloned())
    }
}
