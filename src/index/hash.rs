//! Hash index: chained hash table keyed by title string.

use crate::types::{CatalogError, CatalogResult};

/// Polynomial string hash: fold the key's bytes with multiplier 31, wrapping at
/// 32 bits, then reduce modulo the bucket count.
///
/// Bytes are added as signed values, so every byte of a non-ASCII UTF-8
/// sequence contributes `b - 256` modulo 2^32.
pub fn title_hash(key: &str, buckets: usize) -> usize {
    let folded = key
        .bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as i8 as u32));
    folded as usize % buckets
}

/// Smallest prime that is at least `n` (and at least 2).
pub fn next_prime(n: usize) -> usize {
    let is_prime = |k: usize| k >= 2 && (2..).take_while(|d| d * d <= k).all(|d| k % d != 0);
    (n.max(2)..).find(|&k| is_prime(k)).unwrap_or(n)
}

/// Chained hash table from title to payload.
///
/// Each bucket is a chain of `(key, payload)` pairs; new keys are prepended.
/// The table does not grow unless a maximum load factor is configured, and a
/// resize rehashes every entry into the new bucket array.
pub struct HashIndex<V> {
    buckets: Vec<Vec<(String, V)>>,
    len: usize,
    max_load: Option<f64>,
}

impl<V> HashIndex<V> {
    /// Create a table with a fixed bucket count (rounded up to a prime).
    pub fn new(buckets: usize) -> Self {
        let size = next_prime(buckets);
        Self {
            buckets: (0..size).map(|_| Vec::new()).collect(),
            len: 0,
            max_load: None,
        }
    }

    /// Create a table that doubles (to the next prime) whenever the load factor
    /// would pass `max_load`, which must be finite and positive.
    pub fn with_max_load(buckets: usize, max_load: f64) -> CatalogResult<Self> {
        if !(max_load.is_finite() && max_load > 0.0) {
            return Err(CatalogError::InvalidInput(format!(
                "hash index max load must be a positive number, got {}",
                max_load
            )));
        }
        let mut index = Self::new(buckets);
        index.max_load = Some(max_load);
        Ok(index)
    }

    /// Insert or overwrite the payload for `key`. Returns the previous payload.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let bucket = title_hash(key, self.buckets.len());
        let chain = &mut self.buckets[bucket];
        if let Some(entry) = chain.iter_mut().find(|(k, _)| k == key) {
            return Some(std::mem::replace(&mut entry.1, value));
        }
        // Chains are stored tail-first, so pushing is a prepend.
        chain.push((key.to_string(), value));
        self.len += 1;
        self.maybe_grow();
        None
    }

    /// Look up the payload for `key`.
    pub fn search(&self, key: &str) -> Option<&V> {
        self.chain(key)
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Mutable access to the payload for `key`.
    pub fn search_mut(&mut self, key: &str) -> Option<&mut V> {
        let bucket = title_hash(key, self.buckets.len());
        self.buckets[bucket]
            .iter_mut()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Unlink `key` from its chain. Returns the payload, or `None` if absent.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let bucket = title_hash(key, self.buckets.len());
        let chain = &mut self.buckets[bucket];
        let pos = chain.iter().position(|(k, _)| k == key)?;
        self.len -= 1;
        Some(chain.remove(pos).1)
    }

    /// All keys, bucket by bucket, each chain head first.
    pub fn keys(&self) -> Vec<&str> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().rev().map(|(k, _)| k.as_str()))
            .collect()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Keys per bucket.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Length of the longest chain.
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Drop every entry, keeping the bucket count.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
    }

    fn chain(&self, key: &str) -> &[(String, V)] {
        &self.buckets[title_hash(key, self.buckets.len())]
    }

    fn maybe_grow(&mut self) {
        let Some(max_load) = self.max_load else {
            return;
        };
        if self.load_factor() <= max_load {
            return;
        }
        let size = next_prime(self.buckets.len() * 2);
        let old = std::mem::replace(
            &mut self.buckets,
            (0..size).map(|_| Vec::new()).collect(),
        );
        log::debug!("hash index resized to {} buckets", size);
        // Walk chains in storage order so colliding keys keep their relative order.
        for (key, value) in old.into_iter().flat_map(|chain| chain.into_iter()) {
            let bucket = title_hash(&key, size);
            self.buckets[bucket].push((key, value));
        }
    }
}
