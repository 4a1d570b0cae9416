// src/targets/registry.rs

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::graph::DependencyGraph;
use crate::paths::{add_leading_dot_slash, to_recursive_glob};
use crate::resolve::{DependencyResolver, ImportScanner};
use crate::types::ModuleFormat;

/// Predicate applied to discovered dependencies; `false` drops the path.
pub type DependencyFilter<'a> = &'a (dyn Fn(&str) -> bool + Send + Sync);

/// Registry of everything a watch session observes.
///
/// Three sets, all keyed by normalized path (see
/// [`add_leading_dot_slash`]):
///
/// - `targets`: every watched path or pattern.
/// - `dependencies`: the subset found by dependency discovery rather than
///   requested directly.
/// - `new_targets`: paths added since the last [`reset`](Self::reset), so the
///   watcher can sync without re-registering what it already has.
///
/// The registry also owns the session's [`DependencyGraph`] and the two
/// discovery mode flags. Nothing here is shared or global: every session
/// builds its own.
pub struct WatchTargets {
    targets: HashSet<String>,
    dependencies: HashSet<String>,
    new_targets: HashSet<String>,
    graph: DependencyGraph,
    watch_javascript_dependencies: bool,
    module_format: ModuleFormat,
    resolver: Arc<dyn DependencyResolver>,
    fs: Arc<dyn FileSystem>,
}

impl fmt::Debug for WatchTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchTargets")
            .field("targets", &self.targets.len())
            .field("dependencies", &self.dependencies.len())
            .field("new_targets", &self.new_targets.len())
            .field("graph_nodes", &self.graph.len())
            .field("watch_javascript_dependencies", &self.watch_javascript_dependencies)
            .field("module_format", &self.module_format)
            .finish_non_exhaustive()
    }
}

impl WatchTargets {
    /// Create an empty registry.
    ///
    /// `fs` is used for directory detection by
    /// [`add_glob_expanded`](Self::add_glob_expanded); `resolver` for
    /// [`add_dependencies`](Self::add_dependencies).
    pub fn new(resolver: Arc<dyn DependencyResolver>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            targets: HashSet::new(),
            dependencies: HashSet::new(),
            new_targets: HashSet::new(),
            graph: DependencyGraph::new(),
            watch_javascript_dependencies: true,
            module_format: ModuleFormat::default(),
            resolver,
            fs,
        }
    }

    /// Registry backed by an [`ImportScanner`] over the same filesystem.
    pub fn with_import_scanner(fs: Arc<dyn FileSystem>) -> Self {
        let resolver = Arc::new(ImportScanner::new(Arc::clone(&fs)));
        Self::new(resolver, fs)
    }

    pub fn set_watch_javascript_dependencies(&mut self, watch: bool) {
        self.watch_javascript_dependencies = watch;
    }

    pub fn watch_javascript_dependencies(&self) -> bool {
        self.watch_javascript_dependencies
    }

    pub fn set_module_format(&mut self, format: ModuleFormat) {
        self.module_format = format;
    }

    pub fn module_format(&self) -> ModuleFormat {
        self.module_format
    }

    /// Watch the given paths as-is.
    ///
    /// Pass a single path as `["a.js"]`; `None::<&str>` is an empty input.
    pub fn add<I, S>(&mut self, targets: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths: Vec<String> = targets
            .into_iter()
            .map(|t| add_leading_dot_slash(t.as_ref()))
            .collect();
        self.add_raw(paths, false);
    }

    /// Watch each path and everything beneath it.
    pub fn add_glob_expanded<I, S>(&mut self, targets: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths: Vec<String> = targets
            .into_iter()
            .map(|t| to_recursive_glob(self.fs.as_ref(), t.as_ref()))
            .collect();
        self.add_raw(paths, false);
    }

    /// Discover the module dependencies of `targets` and watch them.
    ///
    /// No-op when dependency watching is disabled. Otherwise each target is
    /// resolved on its own, gets an edge to every surviving file of its own
    /// closure, and those files are added to both `targets` and
    /// `dependencies`. The targets themselves are not added to `targets`
    /// here; callers register them with [`add`](Self::add).
    ///
    /// Resolver failures and refused (cycle-closing) edges are returned as
    /// errors and nothing is retried. On error neither the graph nor the
    /// target sets change.
    pub async fn add_dependencies<I, S>(
        &mut self,
        targets: I,
        filter: Option<DependencyFilter<'_>>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.watch_javascript_dependencies {
            debug!("dependency watching disabled; skipping discovery");
            return Ok(());
        }

        let targets: Vec<String> = targets
            .into_iter()
            .map(|t| add_leading_dot_slash(t.as_ref()))
            .collect();
        if targets.is_empty() {
            return Ok(());
        }

        let resolver = Arc::clone(&self.resolver);
        let mut resolved: Vec<(String, Vec<String>)> = Vec::with_capacity(targets.len());
        for target in &targets {
            let mut deps: Vec<String> = resolver
                .resolve_dependencies(std::slice::from_ref(target), self.module_format)
                .await?
                .iter()
                .map(|d| add_leading_dot_slash(d.as_str()))
                .filter(|d| d != target)
                .collect();

            if let Some(keep) = filter {
                deps.retain(|d| keep(d.as_str()));
            }
            resolved.push((target.clone(), deps));
        }

        // Stage every edge first so a refused one leaves the graph as it was.
        let mut graph = self.graph.clone();
        for (target, deps) in &resolved {
            graph.add_edge(target, deps)?;
        }
        self.graph = graph;

        let mut all_deps: Vec<String> = Vec::new();
        for (_, deps) in resolved {
            for dep in deps {
                if !all_deps.contains(&dep) {
                    all_deps.push(dep);
                }
            }
        }

        info!(
            targets = ?targets,
            dependencies = all_deps.len(),
            format = %self.module_format,
            "registered module dependencies"
        );
        self.add_raw(all_deps, true);
        Ok(())
    }

    /// Forget the new-targets diff. `targets`, `dependencies` and the graph
    /// are kept.
    pub fn reset(&mut self) {
        self.new_targets.clear();
    }

    pub fn is_watched(&self, path: &str) -> bool {
        self.targets.contains(&add_leading_dot_slash(path))
    }

    pub fn is_dependency(&self, path: &str) -> bool {
        self.dependencies.contains(&add_leading_dot_slash(path))
    }

    /// Paths added since the last reset. Reading does not clear them.
    pub fn new_targets_since_reset(&self) -> Vec<String> {
        self.new_targets.iter().cloned().collect()
    }

    pub fn all_targets(&self) -> Vec<String> {
        self.targets.iter().cloned().collect()
    }

    /// Transitive dependencies of `path` in the graph.
    pub fn dependencies_of(&self, path: &str) -> Vec<String> {
        self.graph.dependencies_of(&add_leading_dot_slash(path))
    }

    /// Transitive dependents of `path` in the graph.
    pub fn dependents_of(&self, path: &str) -> Vec<String> {
        self.graph.dependents_of(&add_leading_dot_slash(path))
    }

    /// Whether `parent` requires `dep`, directly or indirectly.
    pub fn uses(&self, parent: &str, dep: &str) -> bool {
        let dep = add_leading_dot_slash(dep);
        self.dependencies_of(parent).contains(&dep)
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    fn add_raw(&mut self, paths: Vec<String>, is_dependency: bool) {
        for path in paths {
            if !self.targets.contains(&path) {
                debug!(path = %path, is_dependency, "new watch target");
                self.new_targets.insert(path.clone());
            }

            if is_dependency {
                self.dependencies.insert(path.clone());
            }
            self.targets.insert(path);
        }
    }
}
