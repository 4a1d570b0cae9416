// src/graph/mod.rs

//! Module dependency graph.
//!
//! - [`dependency_graph`] holds the node set and forward/backward adjacency.
//! - [`traversal`] implements the transitive walks used for closures and
//!   cycle checks.

pub mod dependency_graph;
pub mod traversal;

pub use dependency_graph::DependencyGraph;
