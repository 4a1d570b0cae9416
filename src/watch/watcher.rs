// src/watch/watcher.rs

use std::path::PathBuf;

use anyhow::Result;
use notify::event::EventKind;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::SessionEvent;
use crate::watch::path_utils::relative_watch_path;

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive. Dropping this handle
/// stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch `root` recursively and forward each notify event as one
/// [`SessionEvent::FilesChanged`] batch of `./`-prefixed, root-relative
/// paths.
///
/// The watcher does not filter by watch targets; the session decides what
/// is relevant, since the target set grows while the session runs.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    session_tx: mpsc::Sender<SessionEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or_else(|_| root.clone());

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    eprintln!("watchgraph: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("watchgraph: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if matches!(event.kind, EventKind::Access(_)) {
                continue;
            }
            debug!(?event, "received notify event");

            let paths: Vec<String> = event
                .paths
                .iter()
                .filter_map(|p| relative_watch_path(&root, p))
                .collect();
            if paths.is_empty() {
                continue;
            }

            if let Err(err) = session_tx.send(SessionEvent::FilesChanged { paths }).await {
                warn!("session channel closed; stopping watcher loop: {err}");
                break;
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}
