use std::sync::{Arc, Mutex};

use watchgraph::invalidate::{Invalidation, InvalidationNotifier};

/// A notifier that records every published invalidation.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    published: Arc<Mutex<Vec<Invalidation>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far, oldest first.
    pub fn published(&self) -> Vec<Invalidation> {
        self.published.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Invalidation> {
        self.published.lock().unwrap().last().cloned()
    }
}

impl InvalidationNotifier for RecordingNotifier {
    fn publish(&self, invalidation: Invalidation) {
        self.published.lock().unwrap().push(invalidation);
    }
}
