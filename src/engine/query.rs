//! Read path: lookups, autocomplete, recommendations and rankings.

use crate::graph::{within_hops, Neighbor};
use crate::index::normalize_title;
use crate::priority::PrioritySelector;
use crate::types::{Record, RecordOrder};

use super::catalog::CatalogEngine;

/// A recommended record and the affinity weight that put it there.
#[derive(Debug, Clone, Copy)]
pub struct Recommendation<'a> {
    pub record: &'a Record,
    pub weight: f32,
}

impl CatalogEngine {
    /// Look up a record by ID through the balanced index.
    pub fn find_by_id(&self, id: u64) -> Option<&Record> {
        self.balanced.find(id).and_then(|h| self.resolve(h))
    }

    /// Look up a record by exact title through the hash index.
    ///
    /// When several records share a title, the lowest ID wins.
    pub fn find_by_title(&self, title: &str) -> Option<&Record> {
        self.by_title.search(title).and_then(|h| self.resolve(h))
    }

    /// Whether some record's normalized title is exactly `title`.
    pub fn has_title(&self, title: &str) -> bool {
        self.titles.contains_exact(&normalize_title(title))
    }

    /// Whether some record's normalized title starts with `prefix`.
    pub fn has_title_prefix(&self, prefix: &str) -> bool {
        self.titles.has_prefix(prefix)
    }

    /// Titles completing `prefix`, alphabetical by normalized form.
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        self.titles.autocomplete(prefix)
    }

    /// Up to `limit` records directly linked to `id`, strongest link first.
    pub fn recommend(&self, id: u64, limit: usize) -> Vec<&Record> {
        self.recommend_scored(id, limit)
            .into_iter()
            .map(|r| r.record)
            .collect()
    }

    /// Like [`CatalogEngine::recommend`], keeping the weights.
    pub fn recommend_scored(&self, id: u64, limit: usize) -> Vec<Recommendation<'_>> {
        self.affinity
            .recommendations(id, limit)
            .into_iter()
            .filter_map(|n| {
                self.find_by_id(n.id).map(|record| Recommendation {
                    record,
                    weight: n.weight,
                })
            })
            .collect()
    }

    /// The first `k` records under `order`, as copies.
    pub fn top_by(&self, order: RecordOrder, k: usize) -> Vec<Record> {
        let records: Vec<Record> = self.records().into_iter().cloned().collect();
        PrioritySelector::from_vec(order, records).take_top(k)
    }

    /// The `k` most played records.
    pub fn most_played(&self, k: usize) -> Vec<Record> {
        self.top_by(RecordOrder::most_played(), k)
    }

    /// Every record, ascending by ID.
    pub fn records(&self) -> Vec<&Record> {
        self.balanced
            .iter()
            .filter_map(|(_, h)| self.resolve(h))
            .collect()
    }

    /// Every record in insertion order, a replaced record counting as newly
    /// inserted. Feeding this list to [`CatalogEngine::rebuild`] reproduces the
    /// current catalog, affinity adjacency order included.
    pub fn records_in_insertion_order(&self) -> Vec<&Record> {
        self.store.in_insertion_order()
    }

    /// Every record, sorted by `order`.
    pub fn records_sorted_by(&self, order: RecordOrder) -> Vec<&Record> {
        let mut records = self.records();
        records.sort_by(|a, b| order.compare(a, b));
        records
    }

    /// Records whose title, creator or collection contains `query`
    /// (case-sensitive), ascending by ID.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        self.records()
            .into_iter()
            .filter(|r| {
                r.title.contains(query) || r.creator.contains(query) || r.collection.contains(query)
            })
            .collect()
    }

    /// Outgoing affinity edges of `id`.
    pub fn neighbors(&self, id: u64) -> &[Neighbor] {
        self.affinity.neighbors(id)
    }

    /// Breadth-first walk of the affinity graph from `id`.
    pub fn traverse_bfs(&self, id: u64) -> Vec<u64> {
        self.affinity.breadth_first_search(id)
    }

    /// Depth-first walk of the affinity graph from `id`.
    pub fn traverse_dfs(&self, id: u64) -> Vec<u64> {
        self.affinity.depth_first_search(id)
    }

    /// Records reachable from `id` in at most `max_hops` links, excluding `id`,
    /// with their hop distance.
    pub fn related_within(&self, id: u64, max_hops: u32) -> Vec<(&Record, u32)> {
        within_hops(&self.affinity, id, max_hops)
            .into_iter()
            .filter(|&(other, _)| other != id)
            .filter_map(|(other, depth)| self.find_by_id(other).map(|r| (r, depth)))
            .collect()
    }
}
