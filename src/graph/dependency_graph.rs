// src/graph/dependency_graph.rs

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{Result, WatchgraphError};
use crate::graph::traversal::{can_reach, reachable};

/// Internal node structure: stores immediate deps and dependents.
#[derive(Debug, Clone, Default)]
struct GraphNode {
    /// Direct dependencies: paths this node requires.
    deps: Vec<String>,
    /// Direct dependents: paths that require this node.
    dependents: Vec<String>,
}

/// Directed "depends-on" graph between watch paths.
///
/// An edge `parent -> dep` means evaluating `parent` requires `dep`. Nodes are
/// created on demand by [`add_edge`](Self::add_edge); edges are never removed.
///
/// Transitive queries walk the adjacency lists on every call, so results
/// always reflect the latest edges. Queries for unknown nodes return empty.
///
/// Edges that would close a cycle (including `x -> x`) are refused with
/// [`WatchgraphError::DependencyCycle`], and the whole `add_edge` call then
/// leaves the graph untouched.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: HashMap<String, GraphNode>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_node(&self, node: &str) -> bool {
        self.nodes.contains_key(node)
    }

    /// Insert a node with no edges. No-op if it already exists.
    pub fn add_node(&mut self, node: &str) {
        if !self.has_node(node) {
            self.nodes.insert(node.to_string(), GraphNode::default());
        }
    }

    /// Record `parent -> dep` for every `dep` in `deps`.
    ///
    /// Repeated edges are ignored. `parent` is created even if `deps` is
    /// empty.
    pub fn add_edge<I, S>(&mut self, parent: &str, deps: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut new_deps: Vec<String> = Vec::new();
        for dep in deps {
            let dep = dep.as_ref();
            if new_deps.iter().any(|d| d == dep) {
                continue;
            }
            self.check_acyclic(parent, dep)?;
            new_deps.push(dep.to_string());
        }

        self.add_node(parent);
        for dep in new_deps {
            let added = match self.nodes.get_mut(parent) {
                Some(node) if !node.deps.contains(&dep) => {
                    node.deps.push(dep.clone());
                    true
                }
                _ => false,
            };
            if !added {
                self.add_node(&dep);
                continue;
            }
            self.nodes
                .entry(dep.clone())
                .or_default()
                .dependents
                .push(parent.to_string());
            debug!(parent = %parent, dep = %dep, "added dependency edge");
        }

        Ok(())
    }

    /// Everything `node` requires, directly or indirectly.
    pub fn dependencies_of(&self, node: &str) -> Vec<String> {
        reachable(node, |n| self.direct_dependencies_of(n))
    }

    /// Everything that requires `node`, directly or indirectly.
    pub fn dependents_of(&self, node: &str) -> Vec<String> {
        reachable(node, |n| self.direct_dependents_of(n))
    }

    /// Immediate dependencies of a node.
    pub fn direct_dependencies_of(&self, node: &str) -> &[String] {
        self.nodes
            .get(node)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a node.
    pub fn direct_dependents_of(&self, node: &str) -> &[String] {
        self.nodes
            .get(node)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// All node names, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A new edge `parent -> dep` closes a cycle iff `parent` is already
    /// reachable from `dep`.
    fn check_acyclic(&self, parent: &str, dep: &str) -> Result<()> {
        if parent == dep {
            return Err(WatchgraphError::DependencyCycle(format!(
                "'{parent}' cannot depend on itself"
            )));
        }
        if can_reach(dep, parent, |n| self.direct_dependencies_of(n)) {
            return Err(WatchgraphError::DependencyCycle(format!(
                "'{parent}' -> '{dep}' would close a cycle ('{dep}' already depends on '{parent}')"
            )));
        }
        Ok(())
    }
}
