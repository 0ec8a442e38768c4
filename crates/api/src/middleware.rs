//! Authorization gate: every protected route passes through here.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use equipe_auth::TokenVerifier;

use crate::app::errors::ApiError;
use crate::context::IdentityContext;

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Authenticate the request and inject the caller identity.
///
/// Failures are reported with one generic message regardless of cause (bad
/// scheme, bad signature, expired, missing claims): the distinction is logged
/// server-side, never leaked to the caller.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers()).ok_or(ApiError::Unauthenticated)?;

    let claims = state.verifier.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "token rejected");
        ApiError::Unauthenticated
    })?;

    req.extensions_mut()
        .insert(IdentityContext::new(claims.identity()));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;

    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn accepts_bearer_scheme_case_insensitively() {
        assert_eq!(extract_bearer(&headers_with("Bearer abc")), Some("abc"));
        assert_eq!(extract_bearer(&headers_with("bearer abc")), Some("abc"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(extract_bearer(&headers_with("Basic abc")), None);
        assert_eq!(extract_bearer(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer(&headers_with("Bearer")), None);
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }
}
