//! Click event model for asynchronous click counting.

/// A recorded redirect, passed from the resolve path to the background
/// worker via a bounded channel.
///
/// The redirect response is never delayed by, and never fails because of,
/// click accounting: events are enqueued with `try_send` and dropped when
/// the queue is full.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub short_code: String,
}

impl ClickEvent {
    pub fn new(short_code: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
        }
    }
}
