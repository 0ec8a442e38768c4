//! Collaborator store trait.

use async_trait::async_trait;

use equipe_core::{Collaborator, CollaboratorId, CollaboratorPatch, UserId};

use crate::error::StoreResult;
use crate::query::{CollaboratorFilter, CollaboratorPage, Pagination};

/// Persistence operations for collaborator records.
///
/// Implementations enforce CPF uniqueness and report it as
/// [`crate::StoreError::UniqueViolation`]. Deletion does not exist at this
/// boundary: the soft-delete path is `update` with a deactivating patch.
#[async_trait]
pub trait CollaboratorStore: Send + Sync {
    /// Persist a fully-materialized record (id and audit fields already set).
    async fn insert(&self, record: Collaborator) -> StoreResult<Collaborator>;

    /// Fetch one record by id.
    async fn get(&self, id: CollaboratorId) -> StoreResult<Collaborator>;

    /// Apply a partial update, stamping `updated_by`/`updated_at`, and return
    /// the updated record.
    async fn update(
        &self,
        id: CollaboratorId,
        patch: CollaboratorPatch,
        updated_by: UserId,
    ) -> StoreResult<Collaborator>;

    /// One page of records matching `filter`, newest first, plus the total
    /// match count across all pages.
    async fn list(
        &self,
        filter: CollaboratorFilter,
        pagination: Pagination,
    ) -> StoreResult<CollaboratorPage>;
}
