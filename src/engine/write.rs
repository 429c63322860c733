//! Write path: every mutation of the catalog.
//!
//! Each operation commits to the store first, then to the ordered index, the
//! balanced index, the prefix index, the hash index and the affinity graph, in
//! that order, before returning.

use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::graph::affinity_weight;
use crate::types::{CatalogError, CatalogResult, Record};

use super::catalog::CatalogEngine;
use super::store::RecordHandle;

impl CatalogEngine {
    /// Add a record, or replace the record with the same ID.
    ///
    /// Returns `false` only when a fixed-size store is full.
    pub fn add_record(&mut self, record: Record) -> bool {
        self.try_add_record(record).is_ok()
    }

    /// Add a record, or replace the record with the same ID, reporting why an
    /// insert was refused.
    pub fn try_add_record(&mut self, record: Record) -> CatalogResult<()> {
        let id = record.id;
        if let Some(&handle) = self.balanced.find(id) {
            return self.replace_record(handle, record);
        }

        let title = record.title.clone();
        let handle = match self.store.insert(record) {
            Ok(handle) => handle,
            Err(e) => {
                warn!("record {} rejected: {}", id, e);
                return Err(e);
            }
        };
        trace!("record {} stored", id);

        self.ordered.insert(id, handle);
        self.balanced.insert(id, handle);
        trace!("record {} indexed by id", id);

        self.titles.insert(&title);
        self.claim_title(&title, id, handle);
        trace!("record {} indexed by title {:?}", id, title);

        self.link_affinity(id);
        debug!("added record {} {:?}", id, title);
        Ok(())
    }

    /// Remove a record everywhere. Returns `false` if the ID is unknown.
    pub fn remove_record(&mut self, id: u64) -> bool {
        self.try_remove_record(id).is_ok()
    }

    /// Remove a record everywhere and hand it back.
    pub fn try_remove_record(&mut self, id: u64) -> CatalogResult<Record> {
        let handle = *self
            .balanced
            .find(id)
            .ok_or(CatalogError::RecordNotFound(id))?;
        let record = self.store.remove(handle).ok_or_else(|| {
            CatalogError::InvariantViolation(format!("record {} indexed but not stored", id))
        })?;

        self.ordered.remove(id);
        self.balanced.remove(id);
        self.titles.remove(&record.title);
        self.unlink_title(&record.title, handle);
        self.affinity.remove_vertex(id);

        debug!("removed record {} {:?}", id, record.title);
        Ok(record)
    }

    /// Bump a record's play count. Returns the new count.
    pub fn record_play(&mut self, id: u64) -> CatalogResult<u64> {
        let handle = *self
            .balanced
            .find(id)
            .ok_or(CatalogError::RecordNotFound(id))?;
        let record = self
            .store
            .get_mut(handle)
            .ok_or(CatalogError::RecordNotFound(id))?;
        record.increment_play();
        trace!("record {} played {} times", id, record.play_count);
        Ok(record.play_count)
    }

    /// Drop everything and re-add `records` in order.
    ///
    /// Produces exactly the state the same sequence of `add_record` calls
    /// would, so rebuilding twice from one list is a no-op. A repeated ID
    /// keeps its last occurrence. A list with more distinct IDs than a
    /// fixed-size store holds is refused up front and the catalog is left
    /// untouched.
    pub fn rebuild(&mut self, records: Vec<Record>) -> CatalogResult<usize> {
        if let Some(capacity) = self.store.capacity() {
            let distinct: HashSet<u64> = records.iter().map(|r| r.id).collect();
            if distinct.len() > capacity {
                warn!(
                    "rebuild refused: {} records for capacity {}",
                    distinct.len(),
                    capacity
                );
                return Err(CatalogError::CapacityExceeded { capacity });
            }
        }

        self.clear();
        for record in records {
            self.try_add_record(record)?;
        }
        debug!(
            "rebuilt catalog: {} records, {} affinity edges",
            self.store.len(),
            self.affinity.edge_count()
        );
        Ok(self.store.len())
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.store.clear();
        self.ordered.clear();
        self.balanced.clear();
        self.titles.clear();
        self.by_title.clear();
        self.affinity.clear();
    }

    fn replace_record(&mut self, handle: RecordHandle, record: Record) -> CatalogResult<()> {
        let id = record.id;
        let title = record.title.clone();
        let old = self.store.replace(handle, record).ok_or_else(|| {
            CatalogError::InvariantViolation(format!("record {} indexed but not stored", id))
        })?;

        // Same key, same handle: both trees update in place.
        self.ordered.insert(id, handle);
        self.balanced.insert(id, handle);

        if old.title != title {
            self.titles.remove(&old.title);
            self.titles.insert(&title);
            self.unlink_title(&old.title, handle);
        }
        self.claim_title(&title, id, handle);

        self.affinity.remove_vertex(id);
        self.link_affinity(id);
        debug!("replaced record {} {:?}", id, title);
        Ok(())
    }

    /// Point `title` at `handle` unless a record with a lower ID holds it.
    /// The lowest ID always owns a shared title, whatever the insertion order.
    fn claim_title(&mut self, title: &str, id: u64, handle: RecordHandle) {
        let holder = self
            .by_title
            .search(title)
            .and_then(|&h| self.store.get(h))
            .map(|r| r.id);
        if holder.is_some_and(|held| held < id) {
            return;
        }
        self.by_title.insert(title, handle);
    }

    /// Drop `title -> handle` from the hash index. If another record still has
    /// that title, the lowest such ID takes over the entry.
    fn unlink_title(&mut self, title: &str, handle: RecordHandle) {
        if self.by_title.search(title) != Some(&handle) {
            return;
        }
        self.by_title.remove(title);
        let survivor = self
            .balanced
            .iter()
            .map(|(_, &h)| h)
            .find(|&h| h != handle && self.store.get(h).is_some_and(|r| r.title == title));
        if let Some(survivor) = survivor {
            self.by_title.insert(title, survivor);
        }
    }

    /// Connect `id` to every related record, in both directions.
    fn link_affinity(&mut self, id: u64) {
        self.affinity.add_vertex(id);
        let Some(record) = self.balanced.find(id).and_then(|&h| self.store.get(h)) else {
            return;
        };
        let same_creator_weight = self.config.same_creator_weight;
        let links: Vec<(u64, f32)> = self
            .balanced
            .iter()
            .filter_map(|(other_id, &h)| {
                let other = self.store.get(h)?;
                affinity_weight(record, other, same_creator_weight).map(|w| (other_id, w))
            })
            .collect();

        for &(other_id, weight) in &links {
            self.affinity.add_edge(id, other_id, weight);
            self.affinity.add_edge(other_id, id, weight);
        }
        trace!("record {} linked to {} others", id, links.len());
    }
}
