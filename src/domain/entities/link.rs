//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL record.
///
/// `short_code` and `is_custom` are fixed for the lifetime of the record;
/// edits only change `original_url` (and refresh `updated_at`), and the
/// redirect path only bumps `click_count`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub is_custom: bool,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub original_url: String,
    pub short_code: String,
    pub is_custom: bool,
}
