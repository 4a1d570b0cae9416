// src/watch/patterns.rs

use std::fmt;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::warn;

use crate::errors::{Result, WatchgraphError};
use crate::paths::add_leading_dot_slash;

/// Compiled set of watch paths / glob patterns.
///
/// Patterns and queried paths are both passed through
/// [`add_leading_dot_slash`], so `src/**` matches `./src/a.js`. `*` does not
/// cross `/`; use `**` for that.
///
/// Used for two things: deciding whether a changed file is covered by any
/// watch target, and the `[watch].ignore` filter on discovered
/// dependencies.
#[derive(Clone)]
pub struct PathMatcher {
    set: GlobSet,
    patterns: Vec<String>,
}

impl fmt::Debug for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathMatcher")
            .field("patterns", &self.patterns.len())
            .finish_non_exhaustive()
    }
}

impl Default for PathMatcher {
    fn default() -> Self {
        Self::empty()
    }
}

impl PathMatcher {
    /// A matcher that matches nothing.
    pub fn empty() -> Self {
        Self {
            set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    /// Compile `patterns`. Fails on the first pattern that is not a valid
    /// glob.
    pub fn build<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut normalized = Vec::new();

        for pat in patterns {
            let pat = add_leading_dot_slash(pat.as_ref());
            builder.add(compile(&pat)?);
            normalized.push(pat);
        }

        Self::finish(builder, normalized)
    }

    /// Like [`build`](Self::build), but skips (and logs) invalid patterns.
    ///
    /// Watch targets may be arbitrary file names, and one odd name must not
    /// stop every other target from matching.
    pub fn build_lenient<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut normalized = Vec::new();

        for pat in patterns {
            let pat = add_leading_dot_slash(pat.as_ref());
            match compile(&pat) {
                Ok(glob) => {
                    builder.add(glob);
                    normalized.push(pat);
                }
                Err(err) => warn!(error = %err, "skipping unmatchable watch target"),
            }
        }

        Self::finish(builder, normalized).unwrap_or_else(|err| {
            warn!(error = %err, "could not compile watch targets; matching nothing");
            Self::empty()
        })
    }

    fn finish(builder: GlobSetBuilder, normalized: Vec<String>) -> Result<Self> {
        let set = builder.build().map_err(|source| WatchgraphError::InvalidGlob {
            pattern: normalized.join(", "),
            source,
        })?;

        Ok(Self {
            set,
            patterns: normalized,
        })
    }

    /// Whether `path` matches any pattern.
    pub fn matches(&self, path: &str) -> bool {
        !self.patterns.is_empty() && self.set.is_match(add_leading_dot_slash(path))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| WatchgraphError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        })
}
