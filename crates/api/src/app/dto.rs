//! Request/response DTOs and query-string parsing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use equipe_core::{Collaborator, validate::valid_email};
use equipe_store::{CollaboratorFilter, Pagination};

use crate::app::errors::ApiError;

/// Deserialize a JSON body into a typed request, reporting failures as a
/// validation error rather than a transport-level rejection.
pub fn parse_body<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::validation(format!("invalid payload: {e}")))
}

// -------------------------
// Auth
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn check_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if !valid_email(email) {
        return Err(ApiError::validation("email is not a valid address"));
    }
    let len = password.chars().count();
    if !(8..=128).contains(&len) {
        return Err(ApiError::validation("password must have 8 to 128 characters"));
    }
    Ok(())
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_credentials(&self.email, &self.password)
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_credentials(&self.email, &self.password)
    }
}

// -------------------------
// Collaborators
// -------------------------

/// Raw listing query parameters. Everything arrives as text and is parsed
/// here so malformed values become one consistent 400, before the store is
/// ever touched. Empty strings count as absent (HTML forms send them).
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl ListQuery {
    pub fn into_parts(self) -> Result<(CollaboratorFilter, Pagination), ApiError> {
        let status = present(self.status)
            .map(|s| s.parse())
            .transpose()
            .map_err(ApiError::from)?;
        let state = present(self.state)
            .map(|s| s.parse())
            .transpose()
            .map_err(ApiError::from)?;

        let page = match present(self.page) {
            None => 1,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(ApiError::validation("page must be an integer >= 1")),
            },
        };
        let limit = match present(self.limit) {
            None => 20,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if (1..=100).contains(&n) => n,
                _ => {
                    return Err(ApiError::validation(
                        "limit must be an integer between 1 and 100",
                    ));
                }
            },
        };

        let filter = CollaboratorFilter {
            search: present(self.search),
            status,
            city: present(self.city),
            state,
        };

        Ok((filter, Pagination { page, limit }))
    }
}

/// Listing envelope: one page plus enough to render pagination controls.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub collaborators: Vec<Collaborator>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}
