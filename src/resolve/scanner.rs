// src/resolve/scanner.rs

use std::collections::{HashSet, VecDeque};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::errors::{Result, WatchgraphError};
use crate::fs::FileSystem;
use crate::paths::clean;
use crate::resolve::imports::extract_imports;
use crate::resolve::DependencyResolver;
use crate::types::ModuleFormat;

/// Extensions tried, in order, when a specifier has none that resolves.
const PROBE_EXTENSIONS: &[&str] = &["js", "cjs", "mjs", "json"];

/// File names tried when a specifier points at a directory.
const INDEX_FILES: &[&str] = &["index.js", "index.cjs", "index.mjs"];

/// Files whose contents are scanned for further imports.
const SCANNED_EXTENSIONS: &[&str] = &["js", "cjs", "mjs"];

/// Default [`DependencyResolver`]: reads module sources through a
/// [`FileSystem`] and follows local imports breadth-first.
///
/// - Only `./`, `../` and `/` specifiers are followed; package imports are
///   never part of the result.
/// - A specifier that does not resolve to a file is skipped.
/// - A target that cannot be read fails the whole call with
///   [`WatchgraphError::Resolution`].
/// - Each target is walked on its own and left out of its own walk. When
///   one target imports another, the imported one is reported.
#[derive(Debug, Clone)]
pub struct ImportScanner {
    fs: Arc<dyn FileSystem>,
}

impl ImportScanner {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Synchronous core of the resolver.
    pub fn scan(&self, targets: &[String], format: ModuleFormat) -> Result<Vec<String>> {
        scan_transitive(self.fs.as_ref(), targets, format)
    }
}

impl DependencyResolver for ImportScanner {
    fn resolve_dependencies<'a>(
        &'a self,
        targets: &'a [String],
        format: ModuleFormat,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>> {
        let fs = Arc::clone(&self.fs);
        let targets = targets.to_vec();

        Box::pin(async move {
            tokio::task::spawn_blocking(move || scan_transitive(fs.as_ref(), &targets, format))
                .await
                .map_err(|e| WatchgraphError::Other(anyhow::anyhow!("dependency scan panicked: {e}")))?
        })
    }
}

fn scan_transitive(
    fs: &dyn FileSystem,
    targets: &[String],
    format: ModuleFormat,
) -> Result<Vec<String>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut found = Vec::new();

    for target in targets {
        for dep in scan_entry(fs, &clean(Path::new(target)), format)? {
            if seen.insert(dep.clone()) {
                found.push(dep);
            }
        }
    }

    debug!(targets = ?targets, count = found.len(), %format, "resolved module dependencies");
    Ok(found)
}

/// Breadth-first walk of the local imports reachable from one entry.
///
/// Only `entry` itself is left out of the result; another entry passed in
/// the same call is reported like any other import.
fn scan_entry(fs: &dyn FileSystem, entry: &str, format: ModuleFormat) -> Result<Vec<String>> {
    let mut seen: HashSet<String> = HashSet::from([entry.to_string()]);
    let mut queue: VecDeque<(String, bool)> = VecDeque::from([(entry.to_string(), true)]);
    let mut found = Vec::new();

    while let Some((file, is_entry)) = queue.pop_front() {
        if !is_entry && !is_scanned(&file) {
            continue;
        }

        let source = fs
            .read_to_string(Path::new(&file))
            .map_err(|e| WatchgraphError::Resolution {
                target: file.clone(),
                reason: format!("{e:#}"),
            })?;

        let base = Path::new(&file).parent().unwrap_or(Path::new("."));
        for import in extract_imports(&source, format) {
            if !import.is_local() {
                trace!(file = %file, specifier = %import.specifier, "skipping package import");
                continue;
            }

            let Some(resolved) = resolve_specifier(fs, base, &import.specifier) else {
                debug!(file = %file, specifier = %import.specifier, "unresolved local import");
                continue;
            };

            if seen.insert(resolved.clone()) {
                found.push(resolved.clone());
                queue.push_back((resolved, false));
            }
        }
    }

    trace!(entry = %entry, count = found.len(), "scanned entry");
    Ok(found)
}

/// Resolve a local specifier relative to `base` the way Node does for
/// relative paths: exact file, then extensions, then directory index.
fn resolve_specifier(fs: &dyn FileSystem, base: &Path, specifier: &str) -> Option<String> {
    let candidate = clean(&base.join(specifier));

    if fs.is_file(Path::new(&candidate)) {
        return Some(candidate);
    }

    for ext in PROBE_EXTENSIONS {
        let with_ext = format!("{candidate}.{ext}");
        if fs.is_file(Path::new(&with_ext)) {
            return Some(with_ext);
        }
    }

    if fs.is_dir(Path::new(&candidate)) {
        let dir = candidate.trim_end_matches('/');
        for index in INDEX_FILES {
            let index_path = format!("{dir}/{index}");
            if fs.is_file(Path::new(&index_path)) {
                return Some(index_path);
            }
        }
    }

    None
}

fn is_scanned(file: &str) -> bool {
    Path::new(file)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SCANNED_EXTENSIONS.contains(&e))
}
