// src/watch/cache.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::fs::FileSystem;
use crate::watch::hash::compute_file_hash;

/// Last seen content hash per file.
///
/// Lets the session drop change events for files whose bytes did not
/// actually change (editors that rewrite on save, `touch`, metadata-only
/// events).
#[derive(Debug)]
pub struct ContentCache {
    fs: Arc<dyn FileSystem>,
    hashes: HashMap<PathBuf, String>,
}

impl ContentCache {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            hashes: HashMap::new(),
        }
    }

    /// Re-hash `path` and report whether it differs from the last hash seen.
    ///
    /// A file seen for the first time counts as changed. A file that cannot
    /// be read (deleted, permissions) counts as changed and is forgotten.
    pub fn has_changed(&mut self, path: &Path) -> bool {
        match compute_file_hash(self.fs.as_ref(), path) {
            Ok(hash) => {
                let changed = self.hashes.get(path) != Some(&hash);
                if !changed {
                    debug!("content unchanged for {:?}", path);
                }
                self.hashes.insert(path.to_path_buf(), hash);
                changed
            }
            Err(err) => {
                debug!(error = %err, "could not hash {:?}; treating as changed", path);
                self.hashes.remove(path);
                true
            }
        }
    }

    /// Record the current hash of `path` without reporting a change.
    pub fn prime(&mut self, path: &Path) -> anyhow::Result<()> {
        let hash = compute_file_hash(self.fs.as_ref(), path)?;
        self.hashes.insert(path.to_path_buf(), hash);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
