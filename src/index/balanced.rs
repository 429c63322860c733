//! Balanced index: AVL tree keyed by record ID.
//!
//! Same contract as [`super::OrderedIndex`], but every insert and remove
//! retraces the path to the root, recomputing heights and rotating wherever
//! `height(left) - height(right)` leaves `[-1, 1]`. Height is therefore
//! bounded by ~1.44·log2(n) and lookups are O(log n) worst case.

use std::cmp::Ordering;

use super::arena::{Arena, BinaryNode, InOrder, NodeId};

struct AvlNode<V> {
    key: u64,
    value: V,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// Height of the subtree rooted here; a leaf has height 1.
    height: i32,
}

impl<V> BinaryNode for AvlNode<V> {
    fn left(&self) -> Option<NodeId> {
        self.left
    }

    fn right(&self) -> Option<NodeId> {
        self.right
    }
}

/// Height-balanced binary search tree mapping record IDs to payloads.
pub struct BalancedIndex<V> {
    nodes: Arena<AvlNode<V>>,
    root: Option<NodeId>,
}

impl<V> BalancedIndex<V> {
    /// Create a new, empty index.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Insert `value` under `key`. An existing key has its payload replaced in
    /// place and the shape of the tree is left untouched. Returns `true` if a
    /// new node was created.
    pub fn insert(&mut self, key: u64, value: V) -> bool {
        let mut created = false;
        self.root = Some(self.insert_at(self.root, key, value, &mut created));
        created
    }

    /// Remove `key`, returning its payload, or `None` if it was absent.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let mut removed = None;
        self.root = self.remove_from(self.root, key, &mut removed);
        removed
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

    /// Height of the tree (0 for empty).
    pub fn height(&self) -> usize {
        self.height_of(self.root) as usize
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

    /// Verify the AVL and ordering invariants over the whole tree, recomputing
    /// heights from scratch rather than trusting the cached ones.
    pub fn is_balanced(&self) -> bool {
        self.check(self.root, None, None).is_some()
    }

    /// Returns the true height of the subtree, or `None` if any invariant fails.
    fn check(&self, at: Option<NodeId>, lo: Option<u64>, hi: Option<u64>) -> Option<i32> {
        let Some(id) = at else {
            return Some(0);
        };
        let node = &self.nodes[id];
        if lo.is_some_and(|lo| node.key <= lo) || hi.is_some_and(|hi| node.key >= hi) {
            return None;
        }
        let left = self.check(node.left, lo, Some(node.key))?;
        let right = self.check(node.right, Some(node.key), hi)?;
        let height = 1 + left.max(right);
        if (left - right).abs() > 1 || height != node.height {
            return None;
        }
        Some(height)
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

    fn insert_at(&mut self, at: Option<NodeId>, key: u64, value: V, created: &mut bool) -> NodeId {
        let Some(id) = at else {
            *created = true;
            return self.nodes.alloc(AvlNode {
                key,
                value,
                left: None,
                right: None,
                height: 1,
            });
        };

        match key.cmp(&self.nodes[id].key) {
            Ordering::Equal => {
                self.nodes[id].value = value;
                return id;
            }
            Ordering::Less => {
                let left = self.nodes[id].left;
                let child = self.insert_at(left, key, value, created);
                self.nodes[id].left = Some(child);
            }
            Ordering::Greater => {
                let right = self.nodes[id].right;
                let child = self.insert_at(right, key, value, created);
                self.nodes[id].right = Some(child);
            }
        }
        self.rebalance(id)
    }

    fn remove_from(
        &mut self,
        at: Option<NodeId>,
        key: u64,
        removed: &mut Option<V>,
    ) -> Option<NodeId> {
        let id = at?;
        match key.cmp(&self.nodes[id].key) {
            Ordering::Less => {
                let left = self.nodes[id].left;
                self.nodes[id].left = self.remove_from(left, key, removed);
            }
            Ordering::Greater => {
                let right = self.nodes[id].right;
                self.nodes[id].right = self.remove_from(right, key, removed);
            }
            Ordering::Equal => {
                let (left, right) = (self.nodes[id].left, self.nodes[id].right);
                let replacement = match (left, right) {
                    (None, child) | (child, None) => child,
                    (Some(_), Some(r)) => {
                        // In-order successor takes this node's place.
                        let (rest, successor) = self.detach_min(r);
                        let node = &mut self.nodes[successor];
                        node.left = left;
                        node.right = rest;
                        Some(self.rebalance(successor))
                    }
                };
                *removed = self.nodes.release(id).map(|n| n.value);
                return replacement;
            }
        }
        Some(self.rebalance(id))
    }

    /// Unlink the leftmost node under `id`, rebalancing on the way back up.
    /// Returns (new subtree root, detached node).
    fn detach_min(&mut self, id: NodeId) -> (Option<NodeId>, NodeId) {
        match self.nodes[id].left {
            None => (self.nodes[id].right, id),
            Some(left) => {
                let (rest, min) = self.detach_min(left);
                self.nodes[id].left = rest;
                (Some(self.rebalance(id)), min)
            }
        }
    }

    fn height_of(&self, at: Option<NodeId>) -> i32 {
        at.map_or(0, |id| self.nodes[id].height)
    }

    fn update_height(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.nodes[id].height = height;
    }

    fn balance_factor(&self, id: NodeId) -> i32 {
        let node = &self.nodes[id];
        self.height_of(node.left) - self.height_of(node.right)
    }

    /// Restore the AVL property at `id` and return the subtree's new root.
    fn rebalance(&mut self, id: NodeId) -> NodeId {
        self.update_height(id);
        let balance = self.balance_factor(id);

        if balance > 1 {
            if let Some(left) = self.nodes[id].left {
                if self.balance_factor(left) < 0 {
                    // Left-right: straighten the left child first.
                    let pivot = self.rotate_left(left);
                    self.nodes[id].left = Some(pivot);
                }
            }
            // Left-left.
            return self.rotate_right(id);
        }

        if balance < -1 {
            if let Some(right) = self.nodes[id].right {
                if self.balance_factor(right) > 0 {
                    // Right-left.
                    let pivot = self.rotate_right(right);
                    self.nodes[id].right = Some(pivot);
                }
            }
            // Right-right.
            return self.rotate_left(id);
        }

        id
    }

    /// ```text
    ///       y            x
    ///      / \          / \
    ///     x   c   ->   a   y
    ///    / \              / \
    ///   a   b            b   c
    /// ```
    fn rotate_right(&mut self, y: NodeId) -> NodeId {
        let Some(x) = self.nodes[y].left else {
            return y;
        };
        let b = self.nodes[x].right;
        self.nodes[y].left = b;
        self.nodes[x].right = Some(y);
        self.update_height(y);
        self.update_height(x);
        x
    }

    /// ```text
    ///     x                y
    ///    / \              / \
    ///   a   y     ->     x   c
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let Some(y) = self.nodes[x].right else {
            return x;
        };
        let b = self.nodes[y].left;
        self.nodes[x].right = b;
        self.nodes[y].left = Some(x);
        self.update_height(x);
        self.update_height(y);
        y
    }
}

impl<V> Default for BalancedIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}
