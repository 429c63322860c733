//! Core graph structure: record IDs as vertices, weighted affinity edges.

use std::collections::HashMap;

use super::traversal;

/// One outgoing edge in an adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Neighbor {
    /// Target record ID.
    pub id: u64,
    /// Affinity strength, never negative.
    pub weight: f32,
}

/// Directed weighted graph keyed by record ID.
///
/// Each vertex owns its outgoing adjacency list, kept in edge insertion order.
/// Edges need not be symmetric; the engine adds both directions itself.
#[derive(Debug, Default)]
pub struct AffinityGraph {
    adjacency: HashMap<u64, Vec<Neighbor>>,
    edge_count: usize,
}

impl AffinityGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex with no edges. No-op if it already exists.
    pub fn add_vertex(&mut self, id: u64) {
        self.adjacency.entry(id).or_default();
    }

    /// Whether `id` is a vertex.
    pub fn has_vertex(&self, id: u64) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Add or overwrite the edge `from -> to`. Both endpoints become vertices.
    ///
    /// An existing edge keeps its position in the adjacency list and takes the
    /// new weight. Negative or NaN weights are stored as 0.
    pub fn add_edge(&mut self, from: u64, to: u64, weight: f32) {
        let weight = if weight.is_nan() { 0.0 } else { weight.max(0.0) };
        self.add_vertex(to);
        let list = self.adjacency.entry(from).or_default();
        match list.iter_mut().find(|n| n.id == to) {
            Some(existing) => existing.weight = weight,
            None => {
                list.push(Neighbor { id: to, weight });
                self.edge_count += 1;
            }
        }
    }

    /// Remove the edge `from -> to`. Returns `false` if it did not exist.
    pub fn remove_edge(&mut self, from: u64, to: u64) -> bool {
        let Some(list) = self.adjacency.get_mut(&from) else {
            return false;
        };
        match list.iter().position(|n| n.id == to) {
            Some(pos) => {
                list.remove(pos);
                self.edge_count -= 1;
                true
            }
            None => false,
        }
    }

    /// Remove a vertex, its outgoing edges and every edge pointing at it.
    /// Returns `false` if it was not a vertex.
    pub fn remove_vertex(&mut self, id: u64) -> bool {
        let Some(own) = self.adjacency.remove(&id) else {
            return false;
        };
        self.edge_count -= own.len();
        for list in self.adjacency.values_mut() {
            let before = list.len();
            list.retain(|n| n.id != id);
            self.edge_count -= before - list.len();
        }
        true
    }

    /// Outgoing edges of `id` in insertion order. Empty for unknown vertices.
    pub fn neighbors(&self, id: u64) -> &[Neighbor] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of the edge `from -> to`, if it exists.
    pub fn weight(&self, from: u64, to: u64) -> Option<f32> {
        self.neighbors(from)
            .iter()
            .find(|n| n.id == to)
            .map(|n| n.weight)
    }

    /// All vertex IDs, ascending.
    pub fn vertices(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.adjacency.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Breadth-first walk from `start`. See [`traversal::bfs`].
    pub fn breadth_first_search(&self, start: u64) -> Vec<u64> {
        traversal::bfs(self, start)
    }

    /// Depth-first walk from `start`. See [`traversal::dfs`].
    pub fn depth_first_search(&self, start: u64) -> Vec<u64> {
        traversal::dfs(self, start)
    }

    /// Direct neighbors of `id`, strongest first, at most `limit` of them.
    ///
    /// Equal weights are ordered by ascending neighbor ID. Only one hop is
    /// considered: a record is never recommended through an intermediary.
    pub fn recommendations(&self, id: u64, limit: usize) -> Vec<Neighbor> {
        let mut ranked = self.neighbors(id).to_vec();
        ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight).then(a.id.cmp(&b.id)));
        ranked.truncate(limit);
        ranked
    }

    /// Remove every vertex and edge.
    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.edge_count = 0;
    }
}
