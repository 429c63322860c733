//! Record catalog: in-memory multi-index catalog engine for record libraries.
//!
//! Keeps a store of records keyed by ID consistent with four search structures
//! (binary search tree, AVL tree, title trie, title hash table), a weighted
//! affinity graph for recommendations, and heap-based rankings.

pub mod cli;
pub mod engine;
pub mod format;
pub mod graph;
pub mod index;
pub mod priority;
pub mod types;

// Re-export commonly used types at the crate root
pub use engine::{
    CatalogConfig, CatalogEngine, CatalogStats, Recommendation, RecordHandle, RecordStore,
};
pub use format::{RecordFile, RecordReader, RecordWriter};
pub use graph::{affinity_weight, AffinityGraph, Neighbor};
pub use index::{normalize_title, BalancedIndex, HashIndex, OrderedIndex, PrefixIndex};
pub use priority::{HeapOrder, PrioritySelector};
pub use types::{
    CatalogError, CatalogResult, Record, RecordBuilder, RecordOrder, SortDirection, SortKey,
    DEFAULT_HASH_BUCKETS, DEFAULT_RECOMMENDATION_LIMIT, DEFAULT_STORE_CAPACITY,
    SAME_CREATOR_WEIGHT,
};
