//! Record store: the canonical owner of every record.

use crate::types::{CatalogError, CatalogResult, Record};

/// Stable handle to a record slot. Indexes hold handles, never copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle(usize);

#[derive(Debug)]
struct Slot {
    record: Record,
    /// Position in insertion order. A replaced record moves to the end.
    seq: u64,
}

/// Slot storage for records, optionally capped at a fixed capacity.
///
/// Removing a record frees its slot for reuse; handles to other records stay
/// valid.
#[derive(Debug, Default)]
pub struct RecordStore {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    capacity: Option<usize>,
    next_seq: u64,
}

impl RecordStore {
    /// Create a store that grows as needed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that refuses records past `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            capacity: Some(capacity),
            next_seq: 0,
        }
    }

    /// Take ownership of a record and return its handle.
    pub fn insert(&mut self, record: Record) -> CatalogResult<RecordHandle> {
        if self.is_full() {
            return Err(CatalogError::CapacityExceeded {
                capacity: self.capacity.unwrap_or_default(),
            });
        }
        let slot = Slot {
            record,
            seq: self.bump_seq(),
        };
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                Ok(RecordHandle(index))
            }
            None => {
                self.slots.push(Some(slot));
                Ok(RecordHandle(self.slots.len() - 1))
            }
        }
    }

    /// Swap in a new record at an occupied slot, returning the old one. The
    /// new record counts as the most recently inserted.
    pub fn replace(&mut self, handle: RecordHandle, record: Record) -> Option<Record> {
        let seq = self.next_seq;
        let slot = self.slots.get_mut(handle.0)?.as_mut()?;
        slot.seq = seq;
        let old = std::mem::replace(&mut slot.record, record);
        self.next_seq += 1;
        Some(old)
    }

    /// Remove the record at `handle`.
    pub fn remove(&mut self, handle: RecordHandle) -> Option<Record> {
        let slot = self.slots.get_mut(handle.0)?.take()?;
        self.free.push(handle.0);
        Some(slot.record)
    }

    /// The record at `handle`.
    pub fn get(&self, handle: RecordHandle) -> Option<&Record> {
        self.slots
            .get(handle.0)
            .and_then(Option::as_ref)
            .map(|slot| &slot.record)
    }

    /// Mutable access to the record at `handle`.
    pub fn get_mut(&mut self, handle: RecordHandle) -> Option<&mut Record> {
        self.slots
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .map(|slot| &mut slot.record)
    }

    /// Every live record with its handle, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordHandle, &Record)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|s| (RecordHandle(i), &s.record)))
    }

    /// Every live record in the order it was inserted or last replaced.
    ///
    /// Re-adding records in this order rebuilds the same indexes and the same
    /// adjacency order in the affinity graph.
    pub fn in_insertion_order(&self) -> Vec<&Record> {
        let mut live: Vec<&Slot> = self.slots.iter().flatten().collect();
        live.sort_by_key(|slot| slot.seq);
        live.into_iter().map(|slot| &slot.record).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a fixed-size store is full. Always `false` when unbounded.
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.len() >= cap)
    }

    /// The fixed capacity, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.next_seq = 0;
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
