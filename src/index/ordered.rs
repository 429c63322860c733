//! Ordered index: unbalanced binary search tree keyed by record ID.

use std::cmp::Ordering;

use super::arena::{Arena, BinaryNode, InOrder, NodeId};

struct BstNode<V> {
    key: u64,
    value: V,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<V> BinaryNode for BstNode<V> {
    fn left(&self) -> Option<NodeId> {
        self.left
    }

    fn right(&self) -> Option<NodeId> {
        self.right
    }
}

/// Binary search tree mapping record IDs to payloads.
///
/// Lookups cost O(height); with adversarial (sorted) insertion order the height
/// degrades to n. See [`super::BalancedIndex`] for the guaranteed variant.
pub struct OrderedIndex<V> {
    nodes: Arena<BstNode<V>>,
    root: Option<NodeId>,
}

impl<V> OrderedIndex<V> {
    /// Create a new, empty index.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Insert `value` under `key`. An existing key has its payload replaced in
    /// place. Returns `true` if a new node was created.
    pub fn insert(&mut self, key: u64, value: V) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.nodes.alloc(BstNode::leaf(key, value)));
            return true;
        };

        loop {
            let node = &mut self.nodes[current];
            let next = match key.cmp(&node.key) {
                Ordering::Equal => {
                    node.value = value;
                    return false;
                }
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            match next {
                Some(child) => current = child,
                None => {
                    let leaf = self.nodes.alloc(BstNode::leaf(key, value));
                    let parent = &mut self.nodes[current];
                    if key < parent.key {
                        parent.left = Some(leaf);
                    } else {
                        parent.right = Some(leaf);
                    }
                    return true;
                }
            }
        }
    }

    /// Remove `key`, returning its payload, or `None` if it was absent.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let mut parent = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            parent = Some(id);
        }
        let id = current?;

        let (left, right) = (self.nodes[id].left, self.nodes[id].right);
        let replacement = match (left, right) {
            (None, child) | (child, None) => child,
            (Some(_), Some(r)) => {
                // In-order successor takes this node's place.
                let successor = self.detach_min(r);
                self.nodes[successor].left = left;
                Some(successor)
            }
        };
        self.relink(parent, id, replacement);
        self.nodes.release(id).map(|n| n.value)
    }

    /// Look up the payload stored under `key`.
    pub fn find(&self, key: u64) -> Option<&V> {
        self.find_node(key).map(|id| &self.nodes[id].value)
    }

    /// Mutable access to the payload stored under `key`.
    pub fn find_mut(&mut self, key: u64) -> Option<&mut V> {
        let id = self.find_node(key)?;
        Some(&mut self.nodes[id].value)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: u64) -> bool {
        self.find_node(key).is_some()
    }

    /// Lazy in-order walk yielding `(key, payload)` with strictly increasing keys.
    /// Each call starts a fresh walk.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &V)> + '_ {
        InOrder::new(&self.nodes, self.root).map(|n| (n.key, &n.value))
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<u64> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Smallest key.
    pub fn min(&self) -> Option<u64> {
        let mut id = self.root?;
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        Some(self.nodes[id].key)
    }

    /// Largest key.
    pub fn max(&self) -> Option<u64> {
        let mut id = self.root?;
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        Some(self.nodes[id].key)
    }

    /// Height of the tree (0 for empty, 1 for a single node).
    pub fn height(&self) -> usize {
        // Level-order count avoids recursing on a degenerate chain.
        let mut height = 0;
        let mut level: Vec<NodeId> = self.root.into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|&id| [self.nodes[id].left, self.nodes[id].right])
                .flatten()
                .collect();
        }
        height
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clear the index.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    fn find_node(&self, key: u64) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Point whatever referenced `old` (a parent link or the root) at `new`.
    fn relink(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let node = &mut self.nodes[p];
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
    }

    /// Unlink the leftmost node under `top` and return it. The detached node's
    /// right link is set to the remainder of the subtree.
    fn detach_min(&mut self, top: NodeId) -> NodeId {
        let mut parent = None;
        let mut min = top;
        while let Some(left) = self.nodes[min].left {
            parent = Some(min);
            min = left;
        }
        if let Some(p) = parent {
            self.nodes[p].left = self.nodes[min].right;
            self.nodes[min].right = Some(top);
        }
        min
    }
}

impl<V> BstNode<V> {
    fn leaf(key: u64, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

impl<V> Default for OrderedIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}
