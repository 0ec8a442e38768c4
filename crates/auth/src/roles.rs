//! Role model.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use equipe_core::DomainError;

/// Access level carried by a token.
///
/// The set is closed: every account is exactly one of these, and the mutation
/// policy in [`crate::policy`] is defined over all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including mutating records created by others.
    Admin,
    /// May create records and mutate the ones they created.
    Coordinator,
    /// Read-only access to collaborator records.
    Common,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Coordinator => "coordinator",
            Role::Common => "common",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "coordinator" => Ok(Role::Coordinator),
            "common" => Ok(Role::Common),
            other => Err(DomainError::validation(format!(
                "role must be one of: admin, coordinator, common (got '{other}')"
            ))),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
