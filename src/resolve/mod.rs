// src/resolve/mod.rs

//! Module dependency discovery.
//!
//! The target registry talks to a [`DependencyResolver`] instead of scanning
//! files itself. Production code uses [`ImportScanner`]; tests can provide
//! their own implementation that returns canned dependency lists.

pub mod imports;
pub mod scanner;

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::types::ModuleFormat;

pub use imports::{extract_imports, ImportInfo, ImportKind};
pub use scanner::ImportScanner;

/// Resolves the transitive set of local module files imported by `targets`.
///
/// The result is the union of each target's own closure. A target is never
/// part of its own closure, but may appear in another target's.
///
/// Implementations must:
/// - return only local, resolvable files (never package imports),
/// - fail with [`crate::errors::WatchgraphError::Resolution`] when a target
///   cannot be analyzed.
///
/// The returned paths should already be in `./`-prefixed form; the registry
/// normalizes them again regardless.
pub trait DependencyResolver: Send + Sync {
    fn resolve_dependencies<'a>(
        &'a self,
        targets: &'a [String],
        format: ModuleFormat,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>>;
}
