//! Async HTTP client wrapping the equipe JSON API.
//!
//! UIs talk to this facade instead of raw HTTP. Server-side error messages
//! are surfaced verbatim so they can go straight into a notification; no
//! retry is attempted on behalf of the caller.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use equipe_core::{Collaborator, CollaboratorDraft, CollaboratorId, CollaboratorPatch, UserId};

/// Listing parameters; everything optional, mirroring the query string.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(v) = &self.search {
            query.push(("search", v.clone()));
        }
        if let Some(v) = &self.status {
            query.push(("status", v.clone()));
        }
        if let Some(v) = &self.city {
            query.push(("city", v.clone()));
        }
        if let Some(v) = &self.state {
            query.push(("state", v.clone()));
        }
        if let Some(v) = self.page {
            query.push(("page", v.to_string()));
        }
        if let Some(v) = self.limit {
            query.push(("limit", v.to_string()));
        }
        query
    }
}

/// One page of collaborators plus pagination totals.
#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorList {
    pub collaborators: Vec<Collaborator>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

/// Account data returned by register/login.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: UserId,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: ApiUser,
}

/// Soft-delete acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub collaborator: Collaborator,
}

/// Async client for the equipe REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. The bearer
/// token is captured by [`ApiClient::login`] or supplied via
/// [`ApiClient::with_token`].
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Use a token obtained elsewhere (e.g. restored from a session).
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Unwrap a response, surfacing the server's `message` verbatim on error.
    async fn expect_json<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
        what: &str,
    ) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("message")?.as_str().map(str::to_string));
            return Err(match message {
                Some(msg) => anyhow!("{msg}"),
                None => anyhow!("{what} failed with status {status}"),
            });
        }
        resp.json()
            .await
            .with_context(|| format!("deserialising {what} response"))
    }

    // ── Auth ──────────────────────────────────────────────────────────────

    /// `POST /auth/register`
    pub async fn register(&self, email: &str, password: &str) -> Result<ApiUser> {
        let resp = self
            .client
            .post(self.url("/auth/register"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("POST /auth/register failed")?;

        Self::expect_json(resp, "register").await
    }

    /// `POST /auth/login` — on success the token is captured for subsequent
    /// calls and the account data is returned.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<ApiUser> {
        let resp = self
            .client
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("POST /auth/login failed")?;

        let body: LoginResponse = Self::expect_json(resp, "login").await?;
        self.token = Some(body.token);
        Ok(body.user)
    }

    /// `GET /auth/verify` — check the captured token is still accepted.
    pub async fn verify(&self) -> Result<()> {
        let resp = self
            .auth(self.client.get(self.url("/auth/verify")))
            .send()
            .await
            .context("GET /auth/verify failed")?;

        Self::expect_json::<serde_json::Value>(resp, "verify").await?;
        Ok(())
    }

    // ── Collaborators ─────────────────────────────────────────────────────

    /// `GET /collaborators`
    pub async fn list_collaborators(&self, params: &ListParams) -> Result<CollaboratorList> {
        let resp = self
            .auth(self.client.get(self.url("/collaborators")))
            .query(&params.to_query())
            .send()
            .await
            .context("GET /collaborators failed")?;

        Self::expect_json(resp, "listing").await
    }

    /// `GET /collaborators/:id`
    pub async fn get_collaborator(&self, id: CollaboratorId) -> Result<Collaborator> {
        let resp = self
            .auth(self.client.get(self.url(&format!("/collaborators/{id}"))))
            .send()
            .await
            .context("GET /collaborators/:id failed")?;

        Self::expect_json(resp, "collaborator").await
    }

    /// `POST /collaborators`
    pub async fn create_collaborator(&self, draft: &CollaboratorDraft) -> Result<Collaborator> {
        let resp = self
            .auth(self.client.post(self.url("/collaborators")))
            .json(draft)
            .send()
            .await
            .context("POST /collaborators failed")?;

        Self::expect_json(resp, "create").await
    }

    /// `PUT /collaborators/:id`
    pub async fn update_collaborator(
        &self,
        id: CollaboratorId,
        patch: &CollaboratorPatch,
    ) -> Result<Collaborator> {
        let resp = self
            .auth(self.client.put(self.url(&format!("/collaborators/{id}"))))
            .json(patch)
            .send()
            .await
            .context("PUT /collaborators/:id failed")?;

        Self::expect_json(resp, "update").await
    }

    /// `DELETE /collaborators/:id` — soft delete.
    pub async fn delete_collaborator(&self, id: CollaboratorId) -> Result<DeleteResponse> {
        let resp = self
            .auth(self.client.delete(self.url(&format!("/collaborators/{id}"))))
            .send()
            .await
            .context("DELETE /collaborators/:id failed")?;

        Self::expect_json(resp, "delete").await
    }
}
