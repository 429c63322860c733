//! Graph traversal algorithms (BFS, DFS).
//!
//! Both walks visit every vertex reachable from `start` exactly once and return
//! IDs in visitation order. An unknown `start` yields an empty walk.
//!
//! Neighbor order is fixed by the adjacency lists, which keep edge insertion
//! order. BFS enqueues neighbors in that order. DFS pushes them onto its stack
//! in that order, so among siblings the most recently linked one is explored
//! first.

use std::collections::{HashSet, VecDeque};

use super::AffinityGraph;

/// Level-order walk using a FIFO queue.
pub fn bfs(graph: &AffinityGraph, start: u64) -> Vec<u64> {
    if !graph.has_vertex(start) {
        return Vec::new();
    }

    let mut visited: HashSet<u64> = HashSet::new();
    let mut order: Vec<u64> = Vec::new();
    let mut queue: VecDeque<u64> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for neighbor in graph.neighbors(current) {
            if visited.insert(neighbor.id) {
                queue.push_back(neighbor.id);
            }
        }
    }

    order
}

/// Depth-first walk using an explicit stack.
///
/// A vertex is marked when popped, not when pushed, so it may sit on the stack
/// more than once; later copies are skipped.
pub fn dfs(graph: &AffinityGraph, start: u64) -> Vec<u64> {
    if !graph.has_vertex(start) {
        return Vec::new();
    }

    let mut visited: HashSet<u64> = HashSet::new();
    let mut order: Vec<u64> = Vec::new();
    let mut stack: Vec<u64> = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        order.push(current);
        for neighbor in graph.neighbors(current) {
            if !visited.contains(&neighbor.id) {
                stack.push(neighbor.id);
            }
        }
    }

    order
}

/// Vertices reachable from `start` within `max_depth` hops, with their depth.
/// Ordered as BFS discovers them.
pub fn within_hops(graph: &AffinityGraph, start: u64, max_depth: u32) -> Vec<(u64, u32)> {
    if !graph.has_vertex(start) {
        return Vec::new();
    }

    let mut visited: HashSet<u64> = HashSet::new();
    let mut found: Vec<(u64, u32)> = Vec::new();
    let mut queue: VecDeque<(u64, u32)> = VecDeque::new();

    visited.insert(start);
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        found.push((current, depth));
        if depth >= max_depth {
            continue;
        }
        for neighbor in graph.neighbors(current) {
            if visited.insert(neighbor.id) {
                queue.push_back((neighbor.id, depth + 1));
            }
        }
    }

    found
}
