//! HTTP application wiring (axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: dependencies handlers receive (stores, token service)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and query parsing
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use equipe_auth::Hs256TokenService;
use equipe_store::{CollaboratorStore, UserStore};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full router (public entrypoint used by `main.rs` and tests).
///
/// Stores are injected by the caller; nothing in here reaches for globals.
pub fn build_app(
    jwt_secret: &str,
    collaborators: Arc<dyn CollaboratorStore>,
    users: Arc<dyn UserStore>,
) -> Router {
    let tokens = Hs256TokenService::new(jwt_secret.as_bytes());
    let auth_state = middleware::AuthState {
        verifier: Arc::new(tokens.clone()),
    };

    let services = Arc::new(AppServices {
        collaborators,
        users,
        tokens,
    });

    let protected = routes::protected_router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            ))
            .layer(Extension(services.clone())),
    );

    routes::public_router()
        .layer(Extension(services))
        .merge(protected)
}
