//! Prefix index: a 26-way trie over normalized titles, for autocomplete.
//!
//! Normalization lowercases ASCII letters and drops every other character on
//! insert, so "Rock 'n' Roll" is stored as `rocknroll`. Queries are stricter:
//! a prefix containing anything but ASCII letters matches nothing.

use super::arena::{Arena, NodeId};

const ALPHABET: usize = 26;

struct TrieNode {
    children: [Option<NodeId>; ALPHABET],
    /// How many inserted titles end exactly here.
    terminal: u32,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: [None; ALPHABET],
            terminal: 0,
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

/// Map an ASCII letter to its child slot.
fn slot(c: char) -> Option<usize> {
    c.is_ascii_alphabetic()
        .then(|| (c.to_ascii_lowercase() as u8 - b'a') as usize)
}

fn letter(slot: usize) -> char {
    (b'a' + slot as u8) as char
}

/// The form a title takes inside the trie.
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Trie of record titles.
pub struct PrefixIndex {
    nodes: Arena<TrieNode>,
    root: NodeId,
    /// Total inserted titles, counting duplicates.
    words: usize,
}

impl PrefixIndex {
    /// Create a new, empty index.
    pub fn new() -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(TrieNode::new());
        Self {
            nodes,
            root,
            words: 0,
        }
    }

    /// Insert a title. Inserting the same normalized title twice records it
    /// twice; it stays present until removed twice.
    pub fn insert(&mut self, title: &str) {
        let mut current = self.root;
        for s in title.chars().filter_map(slot) {
            current = match self.nodes[current].children[s] {
                Some(child) => child,
                None => {
                    let child = self.nodes.alloc(TrieNode::new());
                    self.nodes[current].children[s] = Some(child);
                    child
                }
            };
        }
        self.nodes[current].terminal += 1;
        self.words += 1;
    }

    /// Remove one occurrence of a title, pruning branches that no longer lead
    /// to any title. Returns `false` if the title was not present.
    pub fn remove(&mut self, title: &str) -> bool {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut current = self.root;
        for s in title.chars().filter_map(slot) {
            match self.nodes[current].children[s] {
                Some(child) => {
                    path.push((current, s));
                    current = child;
                }
                None => return false,
            }
        }
        if self.nodes[current].terminal == 0 {
            return false;
        }
        self.nodes[current].terminal -= 1;
        self.words -= 1;

        while let Some((parent, s)) = path.pop() {
            let node = &self.nodes[current];
            if node.terminal > 0 || !node.is_leaf() {
                break;
            }
            self.nodes.release(current);
            self.nodes[parent].children[s] = None;
            current = parent;
        }
        true
    }

    /// True only if the full normalized title ends on a terminal node.
    pub fn contains_exact(&self, title: &str) -> bool {
        self.walk(title)
            .is_some_and(|id| self.nodes[id].terminal > 0)
    }

    /// True if some inserted title starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some()
    }

    /// Every stored title that starts with `prefix`, as `prefix` followed by
    /// the lowercase remainder. Depth-first, children visited `a` to `z`, so a
    /// word comes before its extensions and siblings come alphabetically.
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        if let Some(start) = self.walk(prefix) {
            let mut buf = prefix.to_string();
            self.collect(start, &mut buf, &mut results);
        }
        results
    }

    /// Number of titles stored, counting duplicates.
    pub fn len(&self) -> usize {
        self.words
    }

    /// Whether no title is stored.
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Clear the index.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.alloc(TrieNode::new());
        self.words = 0;
    }

    /// Follow `text` from the root. Any non-letter aborts the walk.
    fn walk(&self, text: &str) -> Option<NodeId> {
        let mut current = self.root;
        for c in text.chars() {
            current = self.nodes[current].children[slot(c)?]?;
        }
        Some(current)
    }

    fn collect(&self, id: NodeId, buf: &mut String, out: &mut Vec<String>) {
        let node = &self.nodes[id];
        if node.terminal > 0 {
            out.push(buf.clone());
        }
        for (s, child) in node.children.iter().enumerate() {
            if let Some(child) = child {
                buf.push(letter(s));
                self.collect(*child, buf, out);
                buf.pop();
            }
        }
    }
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}
