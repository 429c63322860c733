//! Affinity graph: weighted links between related records, used for
//! one-hop recommendations.

pub mod affinity_graph;
pub mod similarity;
pub mod traversal;

pub use affinity_graph::{AffinityGraph, Neighbor};
pub use similarity::affinity_weight;
pub use traversal::{bfs, dfs, within_hops};
