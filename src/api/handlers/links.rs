//! Handlers for link management endpoints (create, list, update, delete).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{
    CreateUrlRequest, PaginationMeta, UpdateUrlRequest, UrlListResponse, UrlResponse,
};
use crate::api::dto::list_query::ListUrlsParams;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "custom_code": "my-code"   // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed URL or code shape, and
/// 409 Conflict when a custom code is already taken.
pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.url, payload.custom_code)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UrlResponse::from_link(link, &state.config.domain)),
    ))
}

/// Lists links with filtering, sorting, and pagination.
///
/// # Endpoint
///
/// `GET /api/urls?page=1&limit=10&search=docs&custom_only=true&sort_by=click_count&sort_order=desc`
///
/// # Errors
///
/// Returns 400 Bad Request for out-of-range pagination or an unknown
/// sort option.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Query(params): Query<ListUrlsParams>,
) -> Result<Json<UrlListResponse>, AppError> {
    let page = state.link_service.list_links(params.into_query()).await?;

    let urls = page
        .items
        .into_iter()
        .map(|link| UrlResponse::from_link(link, &state.config.domain))
        .collect();

    Ok(Json(UrlListResponse {
        urls,
        pagination: PaginationMeta {
            page: page.page,
            limit: page.limit,
            total: page.total,
            total_pages: page.total_pages,
        },
    }))
}

/// Changes the destination URL of an existing link.
///
/// The short code, custom flag, click count, and creation time are never
/// touched; only `original_url` changes and `updated_at` advances.
///
/// # Endpoint
///
/// `PATCH /api/urls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown code and 400 Bad Request for a
/// malformed URL.
pub async fn update_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<UrlResponse>, AppError> {
    payload.validate()?;

    let link = state.link_service.edit_link(&code, payload.url).await?;

    Ok(Json(UrlResponse::from_link(link, &state.config.domain)))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/urls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown code.
pub async fn delete_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
