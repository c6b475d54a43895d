//! Link creation, editing, resolution, and listing service.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkQuery, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_url;

/// Upper bound on random-code insert attempts before giving up.
///
/// The common case is a single attempt; the bound keeps worst-case latency
/// finite under pathological collision rates.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// One page of listed links plus pagination totals.
#[derive(Debug, Clone)]
pub struct LinkPage {
    pub items: Vec<Link>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Service enforcing business rules over raw link storage.
///
/// Owns URL and code validation, the collision-retry policy for generated
/// codes, and the fire-and-forget click accounting on the resolve path.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    click_sender: mpsc::Sender<ClickEvent>,
}

impl LinkService {
    pub fn new(repository: Arc<dyn LinkRepository>, click_sender: mpsc::Sender<ClickEvent>) -> Self {
        Self {
            repository,
            click_sender,
        }
    }

    /// Creates a short link.
    ///
    /// With a custom code: the code shape is validated, then a single
    /// constraint-enforced insert is attempted. A duplicate is a genuine
    /// conflict the caller must resolve, so it is surfaced as-is with no
    /// retry. There is deliberately no availability pre-check; the insert
    /// itself is the check, which closes the check-then-insert race.
    ///
    /// Without a custom code: random candidates are inserted until one
    /// wins, bounded by [`MAX_GENERATION_ATTEMPTS`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL or code,
    /// [`AppError::Conflict`] for a taken custom code, and
    /// [`AppError::GenerationExhausted`] when every random candidate
    /// collided.
    pub async fn create_link(
        &self,
        original_url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_url(&original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(code) = custom_code {
            validate_custom_code(&code)?;

            return self
                .repository
                .insert(NewLink {
                    original_url,
                    short_code: code,
                    is_custom: true,
                })
                .await;
        }

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = generate_code();

            match self
                .repository
                .insert(NewLink {
                    original_url: original_url.clone(),
                    short_code: candidate.clone(),
                    is_custom: false,
                })
                .await
            {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(attempt, code = %candidate, "generated code collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::generation_exhausted(
            "Failed to generate a unique short code",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }

    /// Replaces the destination URL of an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL and
    /// [`AppError::NotFound`] for an unknown code.
    pub async fn edit_link(&self, code: &str, new_original_url: String) -> Result<Link, AppError> {
        validate_url(&new_original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        self.repository.update_url(code, &new_original_url).await
    }

    /// Deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !self.repository.remove(code).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }
        Ok(())
    }

    /// Resolves a short code to its destination URL.
    ///
    /// A click event is enqueued for the background worker but never
    /// awaited: if the queue is full or the increment later fails, the
    /// redirect still succeeds. Forwarding is the product contract; click
    /// accounting is best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        if self
            .click_sender
            .try_send(ClickEvent::new(&link.short_code))
            .is_err()
        {
            tracing::warn!(code = %link.short_code, "click queue full, dropping click event");
        }

        Ok(link.original_url)
    }

    /// Lists links with filtering, sorting, and pagination.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidQuery`] for out-of-range pagination.
    pub async fn list_links(&self, query: LinkQuery) -> Result<LinkPage, AppError> {
        query.validate()?;

        let (items, total) = self.repository.list(&query).await?;
        let total_pages = if total == 0 {
            0
        } else {
            (total + query.limit - 1) / query.limit
        };

        Ok(LinkPage {
            items,
            total,
            page: query.page,
            limit: query.limit,
            total_pages,
        })
    }
}
