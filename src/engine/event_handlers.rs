// src/engine/event_handlers.rs

//! The steps a session runs for one batch of changed files.
//!
//! Each helper takes exactly the state it touches, so the runtime loop stays
//! a thin sequence of calls and the steps can be tested on their own.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::errors::WatchgraphError;
use crate::invalidate::Invalidation;
use crate::paths::add_leading_dot_slash;
use crate::targets::WatchTargets;
use crate::watch::{ContentCache, PathMatcher};

/// Keep the changed paths that affect the build.
///
/// A path is relevant when it is a registered target or matches one of the
/// target patterns. With a content cache, paths whose bytes did not change
/// are dropped as well. Output paths are normalized and deduplicated, in
/// input order.
pub fn relevant_changes(
    targets: &WatchTargets,
    matcher: &PathMatcher,
    mut content: Option<&mut ContentCache>,
    paths: Vec<String>,
) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut relevant = Vec::new();

    for path in paths {
        let path = add_leading_dot_slash(&path);
        if !seen.insert(path.clone()) {
            continue;
        }

        if !targets.is_watched(&path) && !matcher.matches(&path) {
            debug!(path = %path, "change outside watch targets; ignoring");
            continue;
        }

        if let Some(cache) = content.as_deref_mut() {
            if !cache.has_changed(Path::new(&path)) {
                info!(path = %path, "content unchanged; ignoring");
                continue;
            }
        }

        relevant.push(path);
    }

    relevant
}

/// Discovery entries touched by `invalidation`, i.e. entries whose import
/// tree may have changed shape.
pub fn entries_to_rescan(entries: &[String], invalidation: &Invalidation) -> Vec<String> {
    entries
        .iter()
        .map(|e| add_leading_dot_slash(e))
        .filter(|e| invalidation.contains(e))
        .collect()
}

/// Re-run dependency discovery for `entries`.
///
/// Failures are logged, not returned: the session keeps watching with the
/// dependency knowledge it already has, and the next change to the entry
/// triggers another attempt.
pub async fn rescan_dependencies(
    targets: &mut WatchTargets,
    entries: Vec<String>,
    ignore: &PathMatcher,
) {
    if entries.is_empty() {
        return;
    }

    let keep = |path: &str| !ignore.matches(path);
    match targets.add_dependencies(&entries, Some(&keep)).await {
        Ok(()) => debug!(?entries, "dependency rescan complete"),
        Err(WatchgraphError::DependencyCycle(msg)) => {
            error!(?entries, "dependency rescan refused a cycle: {msg}");
        }
        Err(err) => {
            warn!(?entries, error = %err, "dependency rescan failed; keeping previous dependencies");
        }
    }
}

/// Consume the registry's new-targets diff: recompile `matcher` from all
/// targets and reset the diff. Returns the paths that were new.
pub fn sync_new_targets(targets: &mut WatchTargets, matcher: &mut PathMatcher) -> Vec<String> {
    let mut new_targets = targets.new_targets_since_reset();
    if new_targets.is_empty() {
        return new_targets;
    }

    new_targets.sort();
    info!(?new_targets, "watching new targets");
    *matcher = PathMatcher::build_lenient(targets.all_targets());
    targets.reset();
    new_targets
}
