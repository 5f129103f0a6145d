//! One-shot UI directives, delivered at most once to a single subscriber.

use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

/// Queue depth for directives emitted before the view attaches.
const DIRECTIVE_QUEUE_CAPACITY: usize = 8;

/// A one-shot instruction to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiDirective {
    NavigateBack,
}

/// Unicast, ordered, at-most-once delivery queue for [`UiDirective`]s.
///
/// This carries commands, not state: there is no current value, delivered
/// directives are gone, and nothing is ever replayed to a late subscriber.
pub struct DirectiveBus {
    tx: mpsc::Sender<UiDirective>,
    rx: Mutex<Option<mpsc::Receiver<UiDirective>>>,
}

impl DirectiveBus {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(DIRECTIVE_QUEUE_CAPACITY);
        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Enqueues a directive, suspending only while the queue is full. A
    /// directive emitted before any subscriber attaches is held until the
    /// subscriber drains it.
    pub async fn emit(&self, directive: UiDirective) {
        if self.tx.send(directive).await.is_err() {
            debug!(?directive, "directive dropped: subscriber is gone");
        }
    }

    /// Claims the single consumer side; `None` once it has been taken.
    pub fn subscribe(&self) -> Option<ReceiverStream<UiDirective>> {
        self.rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .map(ReceiverStream::new)
    }
}

impl Default for DirectiveBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/directive_tests.rs"]
mod tests;
