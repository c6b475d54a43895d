//! Background worker draining the click queue into the repository.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Drains click events and applies atomic increments.
///
/// Runs until the sender side of the channel is dropped. Increment
/// failures are logged and swallowed: click accounting is best-effort
/// observability, never a redirect-path failure.
pub async fn run_click_worker(mut rx: mpsc::Receiver<ClickEvent>, repository: Arc<dyn LinkRepository>) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = repository.increment_clicks(&event.short_code).await {
            tracing::warn!(code = %event.short_code, error = ?e, "failed to record click");
        }
    }

    tracing::debug!("click queue closed, worker exiting");
}
