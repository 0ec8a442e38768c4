//! Filter and pagination types for collaborator listings.

use equipe_core::{BrState, Collaborator, CollaboratorStatus};

/// Pagination parameters (1-based page).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

impl Pagination {
    /// Clamp into the accepted window: page ≥ 1, 1 ≤ limit ≤ 100.
    ///
    /// Out-of-range *parses* are rejected at the API layer with a validation
    /// error; this constructor is for internal callers that already hold
    /// numbers and just want safe values.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(20).clamp(1, 100),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Number of pages needed for `total` rows (ceiling division).
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.limit))
    }
}

/// Conjunctive filter over collaborator listings.
///
/// `search` is a case-insensitive substring disjunction over name/cpf/email;
/// the remaining fields are case-sensitive exact matches. The asymmetry is
/// deliberate and mirrored by both store implementations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollaboratorFilter {
    pub search: Option<String>,
    pub status: Option<CollaboratorStatus>,
    pub city: Option<String>,
    pub state: Option<BrState>,
}

impl CollaboratorFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.status.is_none() && self.city.is_none() && self.state.is_none()
    }
}

/// One page of a listing plus the total row count across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct CollaboratorPage {
    pub items: Vec<Collaborator>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamping() {
        assert_eq!(Pagination::default(), Pagination { page: 1, limit: 20 });
        assert_eq!(Pagination::new(None, None), Pagination::default());
        assert_eq!(Pagination::new(Some(0), Some(0)), Pagination { page: 1, limit: 1 });
        assert_eq!(
            Pagination::new(Some(3), Some(500)),
            Pagination { page: 3, limit: 100 }
        );
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        assert_eq!(Pagination { page: 1, limit: 20 }.offset(), 0);
        assert_eq!(Pagination { page: 2, limit: 10 }.offset(), 10);
        assert_eq!(Pagination { page: 5, limit: 25 }.offset(), 100);
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination { page: 1, limit: 10 };
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(10), 1);
        assert_eq!(p.total_pages(25), 3);
    }
}
