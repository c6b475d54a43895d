//! Query parameters for the link listing endpoint.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::repositories::{LinkQuery, SortField, SortOrder};

/// Filter, sort, and pagination query parameters.
///
/// Uses `serde_with` to parse numeric and boolean values from query
/// strings. Unknown `sort_by`/`sort_order` values are rejected at
/// deserialization time.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ListUrlsParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde(default)]
    pub search: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub custom_only: Option<bool>,

    #[serde(default)]
    pub sort_by: Option<SortField>,

    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

impl ListUrlsParams {
    /// Applies defaults and produces the repository query.
    ///
    /// Defaults: page 1, limit 10, sort `created_at desc`, no filters.
    /// Range validation happens in the service via [`LinkQuery::validate`].
    pub fn into_query(self) -> LinkQuery {
        LinkQuery {
            search: self.search,
            custom_only: self.custom_only.unwrap_or(false),
            sort: self.sort_by.unwrap_or(SortField::CreatedAt),
            order: self.sort_order.unwrap_or(SortOrder::Desc),
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(10),
        }
    }
}
