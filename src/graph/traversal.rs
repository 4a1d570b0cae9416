// src/graph/traversal.rs

//! Reachability helpers over an adjacency lookup.

use std::collections::HashSet;

/// Every node reachable from `start` by repeatedly following `next`, in
/// depth-first discovery order. `start` itself is never part of the result.
pub fn reachable<'a, F>(start: &'a str, next: F) -> Vec<String>
where
    F: Fn(&str) -> &'a [String],
{
    let mut stack: Vec<&'a str> = next(start).iter().rev().map(String::as_str).collect();
    let mut visited: HashSet<&'a str> = HashSet::new();
    visited.insert(start);
    let mut out = Vec::new();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        out.push(current.to_string());

        for n in next(current).iter().rev() {
            if !visited.contains(n.as_str()) {
                stack.push(n.as_str());
            }
        }
    }

    out
}

/// Return true if `target` can be reached from `start` via `next`.
///
/// Stops as soon as `target` is seen.
pub fn can_reach<'a, F>(start: &'a str, target: &str, next: F) -> bool
where
    F: Fn(&str) -> &'a [String],
{
    let mut stack: Vec<&'a str> = vec![start];
    let mut visited: HashSet<&'a str> = HashSet::new();

    while let Some(current) = stack.pop() {
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        stack.extend(next(current).iter().map(String::as_str));
    }

    false
}
