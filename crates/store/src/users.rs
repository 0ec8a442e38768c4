//! User account store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use equipe_auth::Role;
use equipe_core::UserId;

use crate::error::StoreResult;

/// A stored account. `password_hash` is an argon2 PHC string and never
/// leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Input for account creation; id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Persistence operations for accounts (register/login flow).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create an account; duplicate email is a
    /// [`crate::StoreError::UniqueViolation`].
    async fn insert_user(&self, user: NewUser) -> StoreResult<UserRecord>;

    /// Look up by email (login path). `Ok(None)` when absent — the caller
    /// collapses that with a bad password into one generic rejection.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;

    /// Look up by id.
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserRecord>>;
}
