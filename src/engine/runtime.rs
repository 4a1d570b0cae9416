// src/engine/runtime.rs

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::invalidate::InvalidationNotifier;
use crate::targets::WatchTargets;
use crate::watch::{ContentCache, PathMatcher};

use super::event_handlers::{
    entries_to_rescan, relevant_changes, rescan_dependencies, sync_new_targets,
};
use super::{SessionEvent, SessionOptions, SessionStep};

/// Drives a [`WatchTargets`] registry in response to [`SessionEvent`]s and
/// publishes invalidations through a notifier.
///
/// For each `FilesChanged` batch:
/// 1. keep the paths covered by a watch target (and, with `use_hash`, whose
///    content changed),
/// 2. publish the invalidation closure of those paths,
/// 3. re-discover dependencies of any discovery entry inside that closure,
/// 4. fold newly watched targets into the matcher and reset the diff.
pub struct Session<N: InvalidationNotifier> {
    targets: WatchTargets,
    matcher: PathMatcher,
    content: Option<ContentCache>,
    options: SessionOptions,
    notifier: N,
    event_rx: mpsc::Receiver<SessionEvent>,
}

impl<N: InvalidationNotifier> fmt::Debug for Session<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("targets", &self.targets)
            .field("matcher", &self.matcher)
            .field("use_hash", &self.options.use_hash)
            .finish_non_exhaustive()
    }
}

impl<N: InvalidationNotifier> Session<N> {
    /// Create a session around an already populated registry.
    ///
    /// Any targets still pending in the registry's new-targets diff are
    /// folded into the matcher immediately.
    pub fn new(
        mut targets: WatchTargets,
        options: SessionOptions,
        fs: Arc<dyn FileSystem>,
        notifier: N,
        event_rx: mpsc::Receiver<SessionEvent>,
    ) -> Self {
        let mut matcher = PathMatcher::build_lenient(targets.all_targets());
        sync_new_targets(&mut targets, &mut matcher);

        let content = options.use_hash.then(|| prime_content(&targets, fs));

        Self {
            targets,
            matcher,
            content,
            options,
            notifier,
            event_rx,
        }
    }

    pub fn targets(&self) -> &WatchTargets {
        &self.targets
    }

    /// Main event loop. Returns the registry once the loop ends, so callers
    /// can inspect the final state.
    pub async fn run(mut self) -> Result<WatchTargets> {
        info!("watch session started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("session event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "session received event");

            let step = self.step(event).await;
            if !step.keep_running {
                info!("shutdown requested; stopping session");
                break;
            }
        }

        info!("watch session exiting");
        Ok(self.targets)
    }

    /// Handle a single event.
    pub async fn step(&mut self, event: SessionEvent) -> SessionStep {
        match event {
            SessionEvent::FilesChanged { paths } => self.handle_files_changed(paths).await,
            SessionEvent::ShutdownRequested => SessionStep {
                keep_running: false,
                ..SessionStep::default()
            },
        }
    }

    async fn handle_files_changed(&mut self, paths: Vec<String>) -> SessionStep {
        let relevant = relevant_changes(
            &self.targets,
            &self.matcher,
            self.content.as_mut(),
            paths,
        );

        if relevant.is_empty() {
            return SessionStep {
                keep_running: true,
                ..SessionStep::default()
            };
        }

        info!(changed = ?relevant, "watched files changed");

        let invalidation = self.targets.compute_invalidation_set(&relevant);
        let invalidated = invalidation.len();
        let rescan = entries_to_rescan(&self.options.discovery_entries, &invalidation);
        self.notifier.publish(invalidation);

        rescan_dependencies(&mut self.targets, rescan, &self.options.ignore).await;
        let new_targets = sync_new_targets(&mut self.targets, &mut self.matcher);

        SessionStep {
            relevant: relevant.len(),
            invalidated,
            new_targets,
            keep_running: true,
        }
    }
}

/// Hash every file target known at startup, so the first save that leaves a
/// file's bytes alone is already dropped.
fn prime_content(targets: &WatchTargets, fs: Arc<dyn FileSystem>) -> ContentCache {
    let mut cache = ContentCache::new(Arc::clone(&fs));
    for target in targets.all_targets() {
        let path = Path::new(&target);
        if !fs.is_file(path) {
            continue;
        }
        if let Err(err) = cache.prime(path) {
            debug!(path = %target, error = %err, "could not prime content hash");
        }
    }
    debug!(files = cache.len(), "primed content hashes");
    cache
}
