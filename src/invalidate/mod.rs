// src/invalidate/mod.rs

//! Cache invalidation messages.
//!
//! When watched files change, the target registry computes which module
//! paths must be evicted from whatever evaluation cache the embedding build
//! keeps, and hands an [`Invalidation`] to an [`InvalidationNotifier`]. How
//! that value travels further (direct call, channel, log line) is up to the
//! notifier implementation.

pub mod notifier;

use std::collections::BTreeSet;

pub use notifier::{ChannelNotifier, InvalidationNotifier, LogNotifier};

/// The set of paths whose cached module state must be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invalidation {
    paths: BTreeSet<String>,
}

impl Invalidation {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Paths to evict, sorted.
    pub fn paths(&self) -> &BTreeSet<String> {
        &self.paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
