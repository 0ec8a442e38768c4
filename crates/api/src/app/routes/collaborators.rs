//! Collaborator resource: list, get, create, update, soft delete.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use equipe_auth::{Identity, Role, can_create, can_mutate};
use equipe_core::{Collaborator, CollaboratorDraft, CollaboratorId, CollaboratorPatch};
use equipe_store::StoreError;

use crate::app::dto::{self, ListQuery, ListResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::IdentityContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_by_id).put(update).delete(delete))
}

/// Unparseable ids cannot name an existing record.
fn parse_id(raw: &str) -> Result<CollaboratorId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound("collaborator not found"))
}

fn not_found(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound => ApiError::NotFound("collaborator not found"),
        other => other.into(),
    }
}

/// `GET /collaborators` — filtered, paginated listing. Read-only, so every
/// authenticated role may call it.
pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (filter, pagination) = query.into_parts()?;

    let page = services.collaborators.list(filter, pagination).await?;

    Ok(Json(ListResponse {
        total: page.total,
        page: pagination.page,
        limit: pagination.limit,
        total_pages: pagination.total_pages(page.total),
        collaborators: page.items,
    }))
}

/// `GET /collaborators/:id` — no ownership restriction on reads.
pub async fn get_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Collaborator>, ApiError> {
    let id = parse_id(&id)?;
    let record = services.collaborators.get(id).await.map_err(not_found)?;
    Ok(Json(record))
}

/// `POST /collaborators` — admins and coordinators only.
pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = identity.identity();
    if !can_create(identity) {
        return Err(ApiError::forbidden("no permission to create collaborators"));
    }

    let draft: CollaboratorDraft = dto::parse_body(body)?;
    draft.validate()?;

    let record = Collaborator::from_draft(draft, identity.id, Utc::now());
    let record = services.collaborators.insert(record).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /collaborators/:id` — partial update.
pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Collaborator>, ApiError> {
    let identity = identity.identity();
    let patch: CollaboratorPatch = dto::parse_body(body)?;
    patch.validate()?;

    let updated = apply_mutation(&services, identity, &id, patch, "edit").await?;
    Ok(Json(updated))
}

/// `DELETE /collaborators/:id` — soft delete: the update path pinned to
/// `status = inactive`. The row stays retrievable by id.
pub async fn delete(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = identity.identity();

    let updated =
        apply_mutation(&services, identity, &id, CollaboratorPatch::deactivate(), "delete").await?;

    Ok(Json(serde_json::json!({
        "message": "collaborator deleted",
        "collaborator": updated,
    })))
}

/// Shared gate + write path for update and soft delete.
///
/// Ordering mirrors the read side of the policy: a `common` caller is refused
/// outright, before the target is even looked up; owners are resolved from
/// the stored record, never from the request.
async fn apply_mutation(
    services: &AppServices,
    identity: &Identity,
    raw_id: &str,
    patch: CollaboratorPatch,
    verb: &str,
) -> Result<Collaborator, ApiError> {
    if identity.role == Role::Common {
        return Err(ApiError::forbidden(format!(
            "no permission to {verb} collaborators"
        )));
    }

    let id = parse_id(raw_id)?;
    let existing = services.collaborators.get(id).await.map_err(not_found)?;

    if !can_mutate(identity, existing.created_by.as_ref()) {
        return Err(ApiError::forbidden(format!(
            "no permission to {verb} this collaborator"
        )));
    }

    services
        .collaborators
        .update(id, patch, identity.id)
        .await
        .map_err(not_found)
}
