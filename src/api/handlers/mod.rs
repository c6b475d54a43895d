//! HTTP request handlers.

pub mod health;
pub mod links;
pub mod redirect;

pub use health::health_handler;
pub use links::{create_url_handler, delete_url_handler, list_urls_handler, update_url_handler};
pub use redirect::redirect_handler;
