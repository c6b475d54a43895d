//! API route configuration.
//!
//! All management endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_url_handler, delete_url_handler, list_urls_handler, update_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// Management routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /urls`          - List links (search, sort, paginate)
/// - `POST   /urls`          - Create a link (random or custom code)
/// - `PATCH  /urls/{code}`   - Change a link's destination URL
/// - `DELETE /urls/{code}`   - Delete a link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route(
            "/urls/{code}",
            delete(delete_url_handler).patch(update_url_handler),
        )
}
