// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`) that turns
//!   raw events into batches of normalized paths.
//! - Compiling watch targets and ignore patterns into matchers.
//! - (Optionally) content hashing, to drop events for files whose bytes did
//!   not change.
//!
//! It does **not** know about the dependency graph; the session decides what
//! a change invalidates.

pub mod cache;
pub mod hash;
pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use cache::ContentCache;
pub use hash::compute_file_hash;
pub use path_utils::relative_watch_path;
pub use patterns::PathMatcher;
pub use watcher::{spawn_watcher, WatcherHandle};
