//! Service wiring injected into handlers.

use std::sync::Arc;

use equipe_auth::Hs256TokenService;
use equipe_store::{CollaboratorStore, UserStore};

/// Everything a handler needs, constructed once at startup and passed down as
/// an extension. Stores are trait objects so tests wire in doubles without
/// touching a database.
pub struct AppServices {
    pub collaborators: Arc<dyn CollaboratorStore>,
    pub users: Arc<dyn UserStore>,
    pub tokens: Hs256TokenService,
}
