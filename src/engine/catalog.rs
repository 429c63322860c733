//! The catalog engine: composition root owning the store and every index.

use serde::Serialize;

use crate::graph::AffinityGraph;
use crate::index::{normalize_title, BalancedIndex, HashIndex, OrderedIndex, PrefixIndex};
use crate::types::{CatalogError, CatalogResult, Record};

use super::config::CatalogConfig;
use super::store::{RecordHandle, RecordStore};

/// Size and shape figures for the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub records: usize,
    pub ordered_height: usize,
    pub balanced_height: usize,
    pub prefix_titles: usize,
    pub prefix_nodes: usize,
    pub hash_keys: usize,
    pub hash_buckets: usize,
    pub longest_chain: usize,
    pub graph_vertices: usize,
    pub graph_edges: usize,
}

/// Keeps a record store and all of its search structures in lockstep.
///
/// Every mutation goes through the engine, which applies it to the store, the
/// ordered index, the balanced index, the prefix index, the hash index and the
/// affinity graph before returning. Callers only ever see the fully updated
/// state. Write operations live in `write.rs`, read operations in `query.rs`.
pub struct CatalogEngine {
    pub(super) config: CatalogConfig,
    pub(super) store: RecordStore,
    pub(super) ordered: OrderedIndex<RecordHandle>,
    pub(super) balanced: BalancedIndex<RecordHandle>,
    pub(super) titles: PrefixIndex,
    pub(super) by_title: HashIndex<RecordHandle>,
    pub(super) affinity: AffinityGraph,
}

impl CatalogEngine {
    /// Create an empty catalog with default settings.
    pub fn new() -> Self {
        let config = CatalogConfig::default();
        let by_title = HashIndex::new(config.hash_buckets);
        Self::assemble(config, by_title)
    }

    /// Create an empty catalog. Fails with [`CatalogError::InvalidInput`] if
    /// the configuration is out of range.
    pub fn with_config(config: CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;
        let by_title = match config.hash_max_load {
            Some(max_load) => HashIndex::with_max_load(config.hash_buckets, max_load)?,
            None => HashIndex::new(config.hash_buckets),
        };
        Ok(Self::assemble(config, by_title))
    }

    /// Build a catalog from a full record list.
    pub fn from_records(config: CatalogConfig, records: Vec<Record>) -> CatalogResult<Self> {
        let mut engine = Self::with_config(config)?;
        engine.rebuild(records)?;
        Ok(engine)
    }

    /// The active configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The ordered (BST) index.
    pub fn ordered_index(&self) -> &OrderedIndex<RecordHandle> {
        &self.ordered
    }

    /// The balanced (AVL) index.
    pub fn balanced_index(&self) -> &BalancedIndex<RecordHandle> {
        &self.balanced
    }

    /// The title trie.
    pub fn prefix_index(&self) -> &PrefixIndex {
        &self.titles
    }

    /// The title hash table.
    pub fn hash_index(&self) -> &HashIndex<RecordHandle> {
        &self.by_title
    }

    /// The affinity graph.
    pub fn affinity_graph(&self) -> &AffinityGraph {
        &self.affinity
    }

    /// Size and shape figures.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            records: self.store.len(),
            ordered_height: self.ordered.height(),
            balanced_height: self.balanced.height(),
            prefix_titles: self.titles.len(),
            prefix_nodes: self.titles.node_count(),
            hash_keys: self.by_title.len(),
            hash_buckets: self.by_title.bucket_count(),
            longest_chain: self.by_title.longest_chain(),
            graph_vertices: self.affinity.vertex_count(),
            graph_edges: self.affinity.edge_count(),
        }
    }

    /// Cross-check the store against every index.
    ///
    /// Returns [`CatalogError::InvariantViolation`] naming the first
    /// disagreement found. Never fails for a catalog mutated only through the
    /// engine.
    pub fn check_consistency(&self) -> CatalogResult<()> {
        let violation = |msg: String| -> CatalogResult<()> {
            Err(CatalogError::InvariantViolation(msg))
        };
        let n = self.store.len();

        if self.ordered.len() != n || self.balanced.len() != n {
            return violation(format!(
                "store has {} records, ordered index {}, balanced index {}",
                n,
                self.ordered.len(),
                self.balanced.len()
            ));
        }
        if self.titles.len() != n {
            return violation(format!(
                "prefix index holds {} titles for {} records",
                self.titles.len(),
                n
            ));
        }
        if self.affinity.vertex_count() != n {
            return violation(format!(
                "affinity graph has {} vertices for {} records",
                self.affinity.vertex_count(),
                n
            ));
        }
        if !self.balanced.is_balanced() {
            return violation("balanced index lost its AVL shape".to_string());
        }

        for (handle, record) in self.store.iter() {
            if self.ordered.find(record.id) != Some(&handle) {
                return violation(format!("ordered index misses record {}", record.id));
            }
            if self.balanced.find(record.id) != Some(&handle) {
                return violation(format!("balanced index misses record {}", record.id));
            }
            if !self.titles.contains_exact(&normalize_title(&record.title)) {
                return violation(format!("prefix index misses title of record {}", record.id));
            }
            let titled = self
                .by_title
                .search(&record.title)
                .and_then(|&h| self.store.get(h));
            if titled.map(|r| r.title.as_str()) != Some(record.title.as_str()) {
                return violation(format!("hash index misses title of record {}", record.id));
            }
            if !self.affinity.has_vertex(record.id) {
                return violation(format!("affinity graph misses record {}", record.id));
            }
        }
        Ok(())
    }

    fn assemble(config: CatalogConfig, by_title: HashIndex<RecordHandle>) -> Self {
        let store = match config.store_capacity {
            Some(capacity) => RecordStore::with_capacity(capacity),
            None => RecordStore::new(),
        };
        Self {
            config,
            store,
            ordered: OrderedIndex::new(),
            balanced: BalancedIndex::new(),
            titles: PrefixIndex::new(),
            by_title,
            affinity: AffinityGraph::new(),
        }
    }

    /// Resolve a handle held by an index.
    pub(super) fn resolve(&self, handle: &RecordHandle) -> Option<&Record> {
        self.store.get(*handle)
    }
}

impl Default for CatalogEngine {
    fn default() -> Self {
        Self::new()
    }
}
