//! Shared application state injected into handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::click_event::ClickEvent;

/// Application-wide shared state.
///
/// Cheap to clone; all heavy members are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        click_sender: mpsc::Sender<ClickEvent>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            link_service,
            click_sender,
            config,
        }
    }
}
