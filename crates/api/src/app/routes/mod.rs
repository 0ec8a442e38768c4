use axum::{Router, routing::get};

pub mod auth;
pub mod collaborators;
pub mod system;

/// Router for all endpoints behind the authorization gate.
pub fn protected_router() -> Router {
    Router::new()
        .nest("/collaborators", collaborators::router())
        .route("/auth/verify", get(auth::verify))
}

/// Router for endpoints reachable without a token.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/auth", auth::public_router())
}
