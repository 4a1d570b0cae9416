// src/targets/mod.rs

//! The watch target registry.
//!
//! - [`registry`] holds [`WatchTargets`]: the target sets, the new-targets
//!   diff, the dependency graph and the discovery mode flags.
//! - [`invalidation`] computes which cached module paths a change makes
//!   stale and hands them to a notifier.

pub mod invalidation;
pub mod registry;

pub use registry::{DependencyFilter, WatchTargets};
