// src/engine/mod.rs

//! Watch session engine.
//!
//! A [`Session`] is the single owner of a session's
//! [`WatchTargets`](crate::targets::WatchTargets). Every mutation (new
//! targets, dependency rescans, resets) happens inside its event loop, one
//! [`SessionEvent`] at a time, so the registry never needs a lock.
//!
//! - [`runtime`] holds the async loop.
//! - [`event_handlers`] holds the per-batch steps it is built from.

use crate::watch::PathMatcher;

/// Events flowing into the session from the watcher and signal handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Files changed on disk. Paths are relative to the watch root.
    FilesChanged { paths: Vec<String> },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// What a session needs besides the registry itself.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Module entries whose dependencies are re-discovered when they, or
    /// anything they import, change.
    pub discovery_entries: Vec<String>,
    /// Discovered dependencies matching this are not watched.
    pub ignore: PathMatcher,
    /// Drop change events whose file content hash did not change.
    pub use_hash: bool,
}

/// Result of handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStep {
    /// Number of changed paths that were relevant to the build.
    pub relevant: usize,
    /// Number of paths published for cache eviction.
    pub invalidated: usize,
    /// Targets that became watched while handling the event.
    pub new_targets: Vec<String>,
    pub keep_running: bool,
}

pub mod event_handlers;
pub mod runtime;

pub use runtime::Session;
