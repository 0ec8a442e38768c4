//! Account registration, login, and token verification.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use equipe_auth::{Role, hash_password, verify_password};
use equipe_store::NewUser;

use crate::app::dto::{self, LoginRequest, RegisterRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::IdentityContext;

pub fn public_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// `POST /auth/register` — create a `common`-role account.
///
/// Role elevation is an operator concern, not an API feature.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let req: RegisterRequest = dto::parse_body(body)?;
    req.validate()?;

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::Internal
    })?;

    let user = services
        .users
        .insert_user(NewUser {
            email: req.email,
            password_hash,
            role: Role::Common,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": user.id,
            "email": user.email,
            "role": user.role,
            "created_at": user.created_at,
        })),
    ))
}

/// `POST /auth/login` — exchange credentials for a one-hour token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let req: LoginRequest = dto::parse_body(body)?;
    req.validate()?;

    // Unknown email and wrong password take the same path out.
    let user = services
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let token = services
        .tokens
        .issue(user.id, user.role, Some(user.email.clone()))
        .map_err(|e| {
            tracing::error!(error = %e, "token issuance failed");
            ApiError::Internal
        })?;

    Ok(Json(serde_json::json!({
        "token": token,
        "user": {
            "id": user.id,
            "email": user.email,
            "role": user.role,
        },
    })))
}

/// `GET /auth/verify` — reflect the identity the gate derived from the token.
pub async fn verify(
    Extension(identity): Extension<IdentityContext>,
) -> impl IntoResponse {
    let identity = identity.identity();
    Json(serde_json::json!({
        "message": "token valid",
        "user": {
            "id": identity.id,
            "role": identity.role,
            "email": identity.email,
        },
    }))
}
