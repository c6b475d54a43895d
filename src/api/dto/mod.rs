//! Request and response types for the REST API.

pub mod health;
pub mod link;
pub mod list_query;
