//! Transient UI notification state.

use std::time::{Duration, Instant};

/// How long a toast stays visible once shown.
pub const TOAST_DURATION: Duration = Duration::from_millis(1700);

/// Last-write-wins notification state.
///
/// There is no queue: showing a new message overwrites the current one and
/// restarts the visibility window. Rendering belongs to the embedding UI;
/// this type only answers "what should be on screen right now".
#[derive(Debug, Default)]
pub struct Toast {
    current: Option<Shown>,
}

#[derive(Debug)]
struct Shown {
    message: String,
    deadline: Instant,
}

impl Toast {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.show_at(message, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some(Shown {
            message: message.into(),
            deadline: now + TOAST_DURATION,
        });
    }

    /// The message to render, or `None` once the visibility window passed.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message_at(Instant::now())
    }

    #[must_use]
    pub fn message_at(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|shown| now < shown.deadline)
            .map(|shown| shown.message.as_str())
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
