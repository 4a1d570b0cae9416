use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use watchgraph::errors::{Result, WatchgraphError};
use watchgraph::paths::add_leading_dot_slash;
use watchgraph::resolve::DependencyResolver;
use watchgraph::types::ModuleFormat;

/// A resolver that:
/// - returns canned dependency lists per target (already transitive),
/// - fails with `Resolution` for targets marked as broken,
/// - records every call with the module format it was given.
#[derive(Debug, Clone, Default)]
pub struct FakeResolver {
    deps: HashMap<String, Vec<String>>,
    broken: HashSet<String>,
    calls: Arc<Mutex<Vec<(Vec<String>, ModuleFormat)>>>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `target` resolve to `deps`.
    pub fn with_deps(mut self, target: &str, deps: &[&str]) -> Self {
        self.deps.insert(
            add_leading_dot_slash(target),
            deps.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    /// Make resolving `target` fail.
    pub fn broken(mut self, target: &str) -> Self {
        self.broken.insert(add_leading_dot_slash(target));
        self
    }

    /// Shared handle on the recorded calls.
    pub fn calls(&self) -> Arc<Mutex<Vec<(Vec<String>, ModuleFormat)>>> {
        Arc::clone(&self.calls)
    }

    fn lookup(&self, targets: &[String]) -> Result<Vec<String>> {
        let mut out: Vec<String> = Vec::new();
        for target in targets {
            let key = add_leading_dot_slash(target);
            if self.broken.contains(&key) {
                return Err(WatchgraphError::Resolution {
                    target: key,
                    reason: "unexpected token".to_string(),
                });
            }
            for dep in self.deps.get(&key).into_iter().flatten() {
                if !out.contains(dep) {
                    out.push(dep.clone());
                }
            }
        }
        Ok(out)
    }
}

impl DependencyResolver for FakeResolver {
    fn resolve_dependencies<'a>(
        &'a self,
        targets: &'a [String],
        format: ModuleFormat,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push((targets.to_vec(), format));
            self.lookup(targets)
        })
    }
}
