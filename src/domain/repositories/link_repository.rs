//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Sortable columns for link listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    ClickCount,
    ShortCode,
}

impl SortField {
    /// Column name for ORDER BY. Values are fixed identifiers, never user input.
    pub fn as_column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::ClickCount => "click_count",
            SortField::ShortCode => "short_code",
        }
    }
}

/// Sort direction for link listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter, sort, and pagination parameters for [`LinkRepository::list`].
///
/// `search` matches case-insensitively as a substring against both
/// `original_url` and `short_code`. Pagination is 1-based.
#[derive(Debug, Clone)]
pub struct LinkQuery {
    pub search: Option<String>,
    pub custom_only: bool,
    pub sort: SortField,
    pub order: SortOrder,
    pub page: i64,
    pub limit: i64,
}

impl Default for LinkQuery {
    fn default() -> Self {
        Self {
            search: None,
            custom_only: false,
            sort: SortField::CreatedAt,
            order: SortOrder::Desc,
            page: 1,
            limit: 10,
        }
    }
}

/// Largest allowed page size.
pub const MAX_PAGE_SIZE: i64 = 100;

impl LinkQuery {
    /// Validates pagination bounds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidQuery`] when `page < 1` or `limit` is
    /// outside `1..=MAX_PAGE_SIZE`.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page < 1 {
            return Err(AppError::invalid_query(
                "Page must be greater than 0",
                json!({ "page": self.page }),
            ));
        }
        if self.limit < 1 || self.limit > MAX_PAGE_SIZE {
            return Err(AppError::invalid_query(
                format!("Limit must be between 1 and {}", MAX_PAGE_SIZE),
                json!({ "limit": self.limit }),
            ));
        }
        Ok(())
    }

    /// SQL OFFSET for the requested page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Repository interface for persisted link state.
///
/// The implementation owns all race-sensitive invariants: short-code
/// uniqueness is enforced by a storage-level unique constraint on insert
/// (never check-then-insert), and click counting is a single atomic
/// increment statement.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `short_code` is already taken.
    /// Uniqueness is detected by the storage constraint so concurrent
    /// inserts of the same code have exactly one winner.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Replaces `original_url` and refreshes `updated_at`.
    ///
    /// `short_code`, `is_custom`, `click_count`, and `created_at` are
    /// never touched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `code`.
    async fn update_url(&self, code: &str, original_url: &str) -> Result<Link, AppError>;

    /// Atomically increments `click_count` by one.
    ///
    /// Concurrent increments on the same code must serialize at the
    /// storage layer; a read-modify-write here would lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `code`.
    async fn increment_clicks(&self, code: &str) -> Result<(), AppError>;

    /// Deletes the record.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if the code
    /// did not exist.
    async fn remove(&self, code: &str) -> Result<bool, AppError>;

    /// Lists links matching the query, plus the total matching count.
    ///
    /// Ordering is `query.sort`/`query.order` with ties broken by `id ASC`
    /// for a deterministic page sequence. Assumes a validated query.
    async fn list(&self, query: &LinkQuery) -> Result<(Vec<Link>, i64), AppError>;
}
