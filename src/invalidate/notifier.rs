// src/invalidate/notifier.rs

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::Invalidation;

/// Receiver of invalidation messages.
///
/// Publishing is fire-and-forget: there is no acknowledgment, and a notifier
/// that cannot deliver should log and drop the message rather than fail the
/// caller. Subscribers evict their own caches.
pub trait InvalidationNotifier: Send {
    fn publish(&self, invalidation: Invalidation);
}

/// Any `Fn(Invalidation)` closure is a notifier (direct dispatch).
impl<F> InvalidationNotifier for F
where
    F: Fn(Invalidation) + Send,
{
    fn publish(&self, invalidation: Invalidation) {
        self(invalidation)
    }
}

/// Forwards invalidations over an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Invalidation>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<Invalidation>) -> Self {
        Self { tx }
    }

    /// Create a notifier together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Invalidation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl InvalidationNotifier for ChannelNotifier {
    fn publish(&self, invalidation: Invalidation) {
        if let Err(err) = self.tx.send(invalidation) {
            warn!(
                dropped = err.0.len(),
                "invalidation receiver closed; dropping message"
            );
        }
    }
}

/// Prints each invalidated path to stdout as `invalidate <path>`.
///
/// Used by the `watchgraph` binary, where the consumer is whatever process
/// reads our stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl InvalidationNotifier for LogNotifier {
    fn publish(&self, invalidation: Invalidation) {
        info!(count = invalidation.len(), "publishing import cache invalidation");
        for path in invalidation.paths() {
            println!("invalidate {path}");
        }
    }
}
