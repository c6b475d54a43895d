//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkQuery, LinkRepository};
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, short_code, original_url, is_custom, click_count, created_at, updated_at";

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness and click counting both lean on the database: inserts rely on
/// the unique index on `short_code` (the second of two racing inserts gets
/// a constraint violation, never a duplicate row), and click increments are
/// a single UPDATE statement so concurrent redirects serialize per-row.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE wildcards so search input matches literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            r#"
            INSERT INTO urls (original_url, short_code, is_custom)
            VALUES ($1, $2, $3)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .bind(new_link.is_custom)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM urls WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn update_url(&self, code: &str, original_url: &str) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            r#"
            UPDATE urls
            SET original_url = $2, updated_at = CURRENT_TIMESTAMP
            WHERE short_code = $1
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(code)
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        link.ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE urls SET click_count = click_count + 1 WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }
        Ok(())
    }

    async fn remove(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &LinkQuery) -> Result<(Vec<Link>, i64), AppError> {
        let pattern = query
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));

        const FILTER: &str = r#"
            WHERE ($1::text IS NULL OR original_url ILIKE $1 OR short_code ILIKE $1)
              AND ($2::boolean = FALSE OR is_custom)
        "#;

        // Sort column and direction come from closed enums, not user input.
        let items = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM urls {FILTER} ORDER BY {} {}, id ASC LIMIT $3 OFFSET $4",
            query.sort.as_column(),
            query.order.as_sql(),
        ))
        .bind(&pattern)
        .bind(query.custom_only)
        .bind(query.limit)
        .bind(query.offset())
        .fetch_all(self.pool.as_ref())
        .await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM urls {FILTER}"))
            .bind(&pattern)
            .bind(query.custom_only)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok((items, total))
    }
}
