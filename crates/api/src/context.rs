//! Per-request context injected by the auth middleware.

use equipe_auth::Identity;

/// The authenticated caller, available to every protected handler via
/// request extensions. Its presence proves the request passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    identity: Identity,
}

impl IdentityContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}
