// src/targets/invalidation.rs

use std::collections::BTreeSet;

use tracing::debug;

use crate::invalidate::{Invalidation, InvalidationNotifier};
use crate::paths::add_leading_dot_slash;
use crate::targets::WatchTargets;

impl WatchTargets {
    /// Paths whose cached module state is stale after `changed` files
    /// changed on disk.
    ///
    /// The union of:
    /// 1. the changed files,
    /// 2. everything that transitively imports a changed file,
    /// 3. everything a changed file transitively imports.
    pub fn compute_invalidation_set<I, S>(&self, changed: I) -> Invalidation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut paths: BTreeSet<String> = BTreeSet::new();

        for file in changed {
            let file = add_leading_dot_slash(file.as_ref());
            let graph = self.graph();
            paths.extend(graph.dependents_of(&file));
            paths.extend(graph.dependencies_of(&file));
            paths.insert(file);
        }

        debug!(count = paths.len(), "computed invalidation set");
        Invalidation::new(paths)
    }

    /// Compute the invalidation set for `changed` and publish it.
    ///
    /// Returns the number of paths published.
    pub fn clear_import_cache_for<I, S, N>(&self, changed: I, notifier: &N) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        N: InvalidationNotifier + ?Sized,
    {
        let invalidation = self.compute_invalidation_set(changed);
        let count = invalidation.len();
        if count > 0 {
            notifier.publish(invalidation);
        }
        count
    }
}
