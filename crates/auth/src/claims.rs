//! Token claims and the per-request identity derived from them.

use serde::{Deserialize, Serialize};

use equipe_core::UserId;

use crate::Role;

/// JWT claims, strongly typed.
///
/// Decoding rejects tokens missing `sub`, `role` or `exp` instead of
/// materializing half-empty identities. `email` is optional: tokens are
/// issued from the users table where it is known, but the claim is not
/// required for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated account.
    pub sub: UserId,

    /// Access level granted to the subject.
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Issued-at (seconds since epoch).
    pub iat: i64,

    /// Expiry (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.sub,
            role: self.role,
            email: self.email.clone(),
        }
    }
}

/// The authenticated caller, as seen by handlers.
///
/// Ephemeral: rebuilt from the token on every request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub role: Role,
    pub email: Option<String>,
}
