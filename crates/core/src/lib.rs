//! `equipe-core` — pure domain model for collaborator administration.
//!
//! No I/O, no HTTP, no storage concerns: typed identifiers, the collaborator
//! entity and its field rules, and the Brazilian document validators.

pub mod collaborator;
pub mod error;
pub mod format;
pub mod id;
pub mod validate;

pub use collaborator::{
    BankAccountType, BrState, Collaborator, CollaboratorDraft, CollaboratorPatch,
    CollaboratorStatus, PixKeyType,
};
pub use error::{DomainError, DomainResult};
pub use id::{CollaboratorId, UserId};
