//! `equipe-store` — persistence boundary.
//!
//! The API layer talks to [`CollaboratorStore`] and [`UserStore`] traits;
//! the in-memory implementation backs tests and local development, the
//! Postgres implementation backs deployments.

pub mod collaborators;
pub mod error;
pub mod in_memory;
pub mod postgres;
pub mod query;
pub mod users;

pub use collaborators::CollaboratorStore;
pub use error::{StoreError, StoreResult};
pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use query::{CollaboratorFilter, CollaboratorPage, Pagination};
pub use users::{NewUser, UserRecord, UserStore};
