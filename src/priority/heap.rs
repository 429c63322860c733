//! Binary heap with a replaceable ordering strategy and optional fixed capacity.

use crate::types::{Record, RecordOrder};

/// Decides which of two elements belongs nearer the top of a heap.
pub trait HeapOrder<T> {
    /// `true` if `a` must be extracted before `b`.
    fn precedes(&self, a: &T, b: &T) -> bool;
}

impl HeapOrder<Record> for RecordOrder {
    fn precedes(&self, a: &Record, b: &Record) -> bool {
        self.compare(a, b).is_lt()
    }
}

/// Array-backed binary heap.
///
/// The root is always the element that precedes every other under the current
/// ordering. A selector built with [`PrioritySelector::bounded`] refuses inserts
/// once full; otherwise it grows. Both variants order elements identically.
#[derive(Debug, Clone)]
pub struct PrioritySelector<T, O> {
    data: Vec<T>,
    order: O,
    capacity: Option<usize>,
}

impl<T, O: HeapOrder<T>> PrioritySelector<T, O> {
    /// Create an unbounded heap.
    pub fn new(order: O) -> Self {
        Self {
            data: Vec::new(),
            order,
            capacity: None,
        }
    }

    /// Create a heap holding at most `capacity` elements.
    pub fn bounded(order: O, capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            order,
            capacity: Some(capacity),
        }
    }

    /// Build an unbounded heap from existing elements in O(n).
    pub fn from_vec(order: O, data: Vec<T>) -> Self {
        let mut heap = Self {
            data,
            order,
            capacity: None,
        };
        heap.heapify();
        heap
    }

    /// Replace the ordering and restore heap order over every held element.
    pub fn set_order(&mut self, order: O) {
        self.order = order;
        self.heapify();
    }

    /// The current ordering.
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Add an element. A full bounded heap hands the element back.
    pub fn insert(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
        Ok(())
    }

    /// Remove and return the top element.
    pub fn extract_top(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let top = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    /// The top element, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Number of elements held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether a bounded heap has reached its capacity. Always `false` when unbounded.
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.data.len() >= cap)
    }

    /// The fixed capacity, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Extract up to `k` elements in priority order.
    pub fn take_top(&mut self, k: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(k.min(self.data.len()));
        while out.len() < k {
            match self.extract_top() {
                Some(item) => out.push(item),
                None => break,
            }
        }
        out
    }

    /// Consume the heap, returning every element in priority order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let n = self.data.len();
        self.take_top(n)
    }

    /// Bottom-up rebuild: sift down every internal node, last parent first.
    fn heapify(&mut self) {
        for i in (0..self.data.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.order.precedes(&self.data[index], &self.data[parent]) {
                break;
            }
            self.data.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut best = index;
            if left < len && self.order.precedes(&self.data[left], &self.data[best]) {
                best = left;
            }
            if right < len && self.order.precedes(&self.data[right], &self.data[best]) {
                best = right;
            }
            if best == index {
                break;
            }
            self.data.swap(index, best);
            index = best;
        }
    }
}
