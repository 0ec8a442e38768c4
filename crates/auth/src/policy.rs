//! Centralized mutation policy.
//!
//! Every write path (create, update, soft delete) consults these two
//! functions; handlers never re-derive role rules inline.

use equipe_core::UserId;

use crate::{Identity, Role};

/// Whether `identity` may create collaborator records.
pub fn can_create(identity: &Identity) -> bool {
    matches!(identity.role, Role::Admin | Role::Coordinator)
}

/// Whether `identity` may mutate (update or soft-delete) a record.
///
/// - Admin: any record.
/// - Coordinator: only records whose `created_by` is the caller.
/// - Common: never.
pub fn can_mutate(identity: &Identity, created_by: Option<&UserId>) -> bool {
    match identity.role {
        Role::Admin => true,
        Role::Coordinator => created_by == Some(&identity.id),
        Role::Common => false,
    }
}
