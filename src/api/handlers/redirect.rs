//! Handler for the public short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}` (public, unauthenticated)
///
/// # Click Tracking
///
/// The resolve path enqueues a click event on a bounded channel for the
/// background worker. The redirect is never delayed by, and never fails
/// because of, click accounting; if the queue is full the click is dropped.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.link_service.resolve(&code).await?;

    Ok(Redirect::temporary(&original_url))
}
