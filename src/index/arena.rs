//! Slot arena shared by the tree and trie indexes.
//!
//! Nodes are addressed by [`NodeId`] handles instead of pointers. Freed slots go
//! on a free list and are reused by later allocations.

use std::ops::{Index, IndexMut};

/// Handle to a node stored in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Growable slot storage with handle reuse.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
}

impl<T> Arena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store a value and return its handle.
    pub fn alloc(&mut self, value: T) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(value);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(value));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Take a value out and mark its slot free. Returns `None` for a freed handle.
    pub fn release(&mut self, id: NodeId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        Some(value)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Drop every node and forget all handles.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node handle {:?}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node handle {:?}", id),
        }
    }
}

/// A binary tree node that can be walked in order.
pub trait BinaryNode {
    fn left(&self) -> Option<NodeId>;
    fn right(&self) -> Option<NodeId>;
}

/// Lazy in-order walk over a handle-linked binary tree.
///
/// Holds only the stack of pending ancestors, so it costs O(height) memory.
pub struct InOrder<'a, N> {
    arena: &'a Arena<N>,
    stack: Vec<NodeId>,
    next: Option<NodeId>,
}

impl<'a, N: BinaryNode> InOrder<'a, N> {
    pub fn new(arena: &'a Arena<N>, root: Option<NodeId>) -> Self {
        Self {
            arena,
            stack: Vec::new(),
            next: root,
        }
    }
}

impl<'a, N: BinaryNode> Iterator for InOrder<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        let arena = self.arena;
        while let Some(id) = self.next {
            self.stack.push(id);
            self.next = arena[id].left();
        }
        let id = self.stack.pop()?;
        let node = &arena[id];
        self.next = node.right();
        Some(node)
    }
}
