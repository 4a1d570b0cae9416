// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::Path;

use crate::paths::add_leading_dot_slash;

/// Convert an event path into the registry's `./`-prefixed form relative to
/// `root`.
///
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again.
///
/// Returns `None` if the path cannot be related to `root`, or if it is the
/// root itself.
pub fn relative_watch_path(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return to_watch_path(rel);
    }

    // macOS reports /private/var/... for /var/...; compare canonical forms.
    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return to_watch_path(rel);
        }
    }

    None
}

fn to_watch_path(rel: &Path) -> Option<String> {
    let s = rel.to_string_lossy().replace('\\', "/");
    if s.is_empty() {
        return None;
    }
    Some(add_leading_dot_slash(&s))
}
