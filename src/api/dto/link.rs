//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Link;

/// Compiled regex for custom code validation.
static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// The destination URL (must be a valid absolute HTTP/HTTPS URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional custom short code. When absent, a random code is generated.
    #[validate(length(min = 2, max = 25))]
    #[validate(regex(path = "*SHORT_CODE_REGEX"))]
    pub custom_code: Option<String>,
}

/// Request to change a link's destination URL.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUrlRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// JSON representation of a link record.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub is_custom: bool,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlResponse {
    /// Builds the response, rendering `short_url` from the configured
    /// public domain. Always uses HTTPS.
    pub fn from_link(link: Link, domain: &str) -> Self {
        let short_url = format!("https://{}/{}", domain.trim_end_matches('/'), link.short_code);
        Self {
            id: link.id,
            short_code: link.short_code,
            short_url,
            original_url: link.original_url,
            is_custom: link.is_custom,
            click_count: link.click_count,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Pagination block accompanying a listed page.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Response for the list endpoint.
#[derive(Debug, Serialize)]
pub struct UrlListResponse {
    pub urls: Vec<UrlResponse>,
    pub pagination: PaginationMeta,
}
