//! Phase 1 tests: ID trees, title trie, title hash table.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use record_catalog::index::{next_prime, title_hash};
use record_catalog::{BalancedIndex, CatalogError, HashIndex, OrderedIndex, PrefixIndex};

/// Largest height an AVL tree with `n` nodes can have.
fn avl_height_bound(n: usize) -> usize {
    // Fewest nodes for height h: N(h) = N(h-1) + N(h-2) + 1.
    let (mut a, mut b, mut h) = (0usize, 1usize, 1usize);
    while b <= n {
        let next = a + b + 1;
        a = b;
        b = next;
        h += 1;
    }
    h - 1
}

// ==================== Ordered Index Tests ====================

#[test]
fn test_ordered_insert_and_find() {
    let mut index = OrderedIndex::new();
    for key in [50, 30, 70, 20, 40, 60, 80] {
        assert!(index.insert(key, format!("v{}", key)));
    }
    assert_eq!(index.len(), 7);
    assert_eq!(index.find(40).map(String::as_str), Some("v40"));
    assert!(index.find(45).is_none());
    assert!(index.contains(80));
    assert_eq!(index.min(), Some(20));
    assert_eq!(index.max(), Some(80));
    assert_eq!(index.height(), 3);
}

#[test]
fn test_ordered_duplicate_replaces_payload() {
    let mut index = OrderedIndex::new();
    assert!(index.insert(7, "first"));
    assert!(!index.insert(7, "second"));
    assert_eq!(index.len(), 1);
    assert_eq!(index.find(7), Some(&"second"));
}

#[test]
fn test_ordered_in_order_iteration() {
    let mut index = OrderedIndex::new();
    for key in [5, 3, 9, 1, 4, 8, 10, 2] {
        index.insert(key, key * 10);
    }
    let pairs: Vec<(u64, u64)> = index.iter().map(|(k, v)| (k, *v)).collect();
    assert_eq!(
        pairs,
        vec![(1, 10), (2, 20), (3, 30), (4, 40), (5, 50), (8, 80), (9, 90), (10, 100)]
    );
    // A second walk starts over.
    assert_eq!(index.keys(), vec![1, 2, 3, 4, 5, 8, 9, 10]);
}

#[test]
fn test_ordered_remove_all_shapes() {
    let mut index = OrderedIndex::new();
    for key in [50, 30, 70, 20, 40, 60, 80, 65] {
        index.insert(key, key);
    }

    // Leaf.
    assert_eq!(index.remove(20), Some(20));
    // One child.
    assert_eq!(index.remove(60), Some(60));
    // Two children, root.
    assert_eq!(index.remove(50), Some(50));
    // Absent.
    assert_eq!(index.remove(50), None);

    assert_eq!(index.keys(), vec![30, 40, 65, 70, 80]);
    for key in [30, 40, 65, 70, 80] {
        assert_eq!(index.find(key), Some(&key));
    }
    assert_eq!(index.len(), 5);
}

#[test]
fn test_ordered_sorted_insert_degenerates() {
    let mut index = OrderedIndex::new();
    for key in 1..=200u64 {
        index.insert(key, ());
    }
    assert_eq!(index.height(), 200);
    for key in 1..=200u64 {
        assert!(index.remove(key).is_some());
    }
    assert!(index.is_empty());
    assert_eq!(index.height(), 0);
}

#[test]
fn test_ordered_empty() {
    let index: OrderedIndex<()> = OrderedIndex::new();
    assert!(index.is_empty());
    assert!(index.find(1).is_none());
    assert_eq!(index.min(), None);
    assert_eq!(index.iter().count(), 0);
}

// ==================== Balanced Index Tests ====================

#[test]
fn test_balanced_sorted_insert_stays_shallow() {
    let mut index = BalancedIndex::new();
    for key in 1..=1000u64 {
        assert!(index.insert(key, key));
    }
    assert!(index.is_balanced());
    assert!(index.height() <= avl_height_bound(1000));
    assert_eq!(index.keys(), (1..=1000).collect::<Vec<_>>());
    assert_eq!(index.min(), Some(1));
    assert_eq!(index.max(), Some(1000));
}

#[test]
fn test_balanced_rotation_cases() {
    // Left-left, right-right, left-right, right-left.
    for keys in [[3, 2, 1], [1, 2, 3], [3, 1, 2], [1, 3, 2]] {
        let mut index = BalancedIndex::new();
        for key in keys {
            index.insert(key, ());
        }
        assert!(index.is_balanced(), "unbalanced after {:?}", keys);
        assert_eq!(index.height(), 2);
        assert_eq!(index.keys(), vec![1, 2, 3]);
    }
}

#[test]
fn test_balanced_duplicate_keeps_shape() {
    let mut index = BalancedIndex::new();
    for key in 0..15u64 {
        index.insert(key, 0);
    }
    let height = index.height();
    assert!(!index.insert(7, 99));
    assert_eq!(index.len(), 15);
    assert_eq!(index.height(), height);
    assert_eq!(index.find(7), Some(&99));
}

#[test]
fn test_balanced_random_operations() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut index = BalancedIndex::new();
    let mut model: BTreeMap<u64, u32> = BTreeMap::new();

    for step in 0..5000u32 {
        let key = rng.gen_range(0..400u64);
        if rng.gen_bool(0.6) {
            let created = index.insert(key, step);
            assert_eq!(created, model.insert(key, step).is_none());
        } else {
            assert_eq!(index.remove(key), model.remove(&key));
        }

        if step % 250 == 0 {
            assert!(index.is_balanced(), "AVL shape lost at step {}", step);
        }
    }

    assert!(index.is_balanced());
    assert_eq!(index.len(), model.len());
    assert!(index.height() <= avl_height_bound(model.len()));
    let pairs: Vec<(u64, u32)> = index.iter().map(|(k, v)| (k, *v)).collect();
    let expected: Vec<(u64, u32)> = model.into_iter().collect();
    assert_eq!(pairs, expected);
}

#[test]
fn test_balanced_remove_everything() {
    let mut index = BalancedIndex::new();
    for key in (0..300u64).rev() {
        index.insert(key, ());
    }
    for key in (0..300u64).filter(|k| k % 2 == 0) {
        assert!(index.remove(key).is_some());
        assert!(index.is_balanced());
    }
    for key in (0..300u64).filter(|k| k % 2 == 1) {
        assert!(index.remove(key).is_some());
    }
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert_eq!(index.height(), 0);
}

// ==================== Prefix Index Tests ====================

#[test]
fn test_prefix_autocomplete() {
    let mut trie = PrefixIndex::new();
    trie.insert("Rock");
    trie.insert("Rocket");
    trie.insert("Pop");

    assert_eq!(trie.autocomplete("Ro"), vec!["Rock", "Rocket"]);
    assert_eq!(trie.autocomplete("ro"), vec!["rock", "rocket"]);
    assert_eq!(trie.autocomplete("P"), vec!["Pop"]);
    assert!(trie.autocomplete("Zz").is_empty());
}

#[test]
fn test_prefix_alphabetical_siblings() {
    let mut trie = PrefixIndex::new();
    for title in ["Blue", "Bloom", "Blur", "Bl", "Black"] {
        trie.insert(title);
    }
    assert_eq!(
        trie.autocomplete("bl"),
        vec!["bl", "black", "bloom", "blue", "blur"]
    );
}

#[test]
fn test_prefix_normalization() {
    let mut trie = PrefixIndex::new();
    trie.insert("Rock 'n' Roll");

    assert!(trie.contains_exact("rocknroll"));
    assert!(trie.contains_exact("ROCKNROLL"));
    assert!(trie.has_prefix("rockn"));
    // Queries do not skip invalid characters.
    assert!(!trie.has_prefix("rock n"));
    assert!(trie.autocomplete("rock ").is_empty());
    assert!(!trie.contains_exact("rock"));
}

#[test]
fn test_prefix_exact_vs_prefix() {
    let mut trie = PrefixIndex::new();
    trie.insert("Rocket");
    assert!(trie.has_prefix("Rock"));
    assert!(!trie.contains_exact("Rock"));
    assert!(trie.contains_exact("rocket"));
}

#[test]
fn test_prefix_duplicate_titles_counted() {
    let mut trie = PrefixIndex::new();
    trie.insert("Echo");
    trie.insert("echo");
    assert_eq!(trie.len(), 2);

    assert!(trie.remove("ECHO"));
    assert!(trie.contains_exact("echo"));
    assert!(trie.remove("Echo"));
    assert!(!trie.contains_exact("echo"));
    assert!(!trie.remove("Echo"));
}

#[test]
fn test_prefix_remove_prunes() {
    let mut trie = PrefixIndex::new();
    trie.insert("Rock");
    let after_rock = trie.node_count();
    trie.insert("Rocket");
    assert_eq!(trie.node_count(), after_rock + 2);

    assert!(trie.remove("Rocket"));
    assert_eq!(trie.node_count(), after_rock);
    assert!(trie.contains_exact("rock"));
    assert!(!trie.has_prefix("rocke"));

    assert!(trie.remove("Rock"));
    assert!(trie.is_empty());
    assert_eq!(trie.node_count(), 1);
}

// ==================== Hash Index Tests ====================

#[test]
fn test_title_hash_values() {
    // ((97 * 31 + 98) * 31 + 99) = 96354 = 954 * 101
    assert_eq!(title_hash("abc", 101), 0);
    assert_eq!(title_hash("", 101), 0);
    assert_eq!(title_hash("a", 101), 97);
    assert!(title_hash("a much longer title that wraps the fold", 101) < 101);
}

#[test]
fn test_title_hash_non_ascii_bytes_are_signed() {
    // "é" is 0xC3 0xA9, folded as -61 then -87:
    // (2^32 - 61) * 31 - 87 = 2^32 - 1978 (mod 2^32), and 2^32 = 68 (mod 101).
    assert_eq!(title_hash("é", 101), 9);
    assert_ne!(title_hash("é", 101), (0xC3 * 31 + 0xA9) % 101);
}

#[test]
fn test_next_prime() {
    assert_eq!(next_prime(0), 2);
    assert_eq!(next_prime(2), 2);
    assert_eq!(next_prime(100), 101);
    assert_eq!(next_prime(101), 101);
    assert_eq!(next_prime(202), 211);
}

#[test]
fn test_hash_insert_search_remove() {
    let mut table = HashIndex::new(101);
    assert_eq!(table.insert("Rock", 1), None);
    assert_eq!(table.insert("Pop", 2), None);
    assert_eq!(table.insert("Rock", 3), Some(1));

    assert_eq!(table.len(), 2);
    assert_eq!(table.search("Rock"), Some(&3));
    assert_eq!(table.search("rock"), None);
    assert_eq!(table.remove("Pop"), Some(2));
    assert_eq!(table.remove("Pop"), None);
    assert!(!table.contains("Pop"));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_hash_colliding_keys() {
    // Two buckets: long chains everywhere.
    let mut table = HashIndex::new(2);
    let keys: Vec<String> = (0..20).map(|i| format!("title {}", i)).collect();
    for (i, key) in keys.iter().enumerate() {
        table.insert(key, i);
    }
    assert_eq!(table.bucket_count(), 2);
    assert!(table.longest_chain() >= 10);
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(table.search(key), Some(&i));
    }
    table.remove("title 7");
    assert_eq!(table.search("title 7"), None);
    assert_eq!(table.search("title 8"), Some(&8));
}

#[test]
fn test_hash_prime_bucket_count() {
    let table: HashIndex<()> = HashIndex::new(100);
    assert_eq!(table.bucket_count(), 101);
    assert_eq!(table.load_factor(), 0.0);
}

#[test]
fn test_hash_resize_keeps_entries() {
    let mut table = HashIndex::with_max_load(3, 1.0).unwrap();
    for (i, key) in ["a", "b", "c"].iter().enumerate() {
        table.insert(key, i);
    }
    assert_eq!(table.bucket_count(), 3);

    table.insert("d", 3);
    assert_eq!(table.bucket_count(), 7);
    assert!(table.load_factor() <= 1.0);
    for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
        assert_eq!(table.search(key), Some(&i));
    }

    let mut keys = table.keys();
    keys.sort_unstable();
    assert_eq!(keys, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_hash_rejects_bad_max_load() {
    for max_load in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = HashIndex::<u32>::with_max_load(101, max_load);
        assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
    }
}

#[test]
fn test_hash_small_max_load_grows_gradually() {
    let mut table = HashIndex::with_max_load(101, 0.01).unwrap();
    for i in 0..12u32 {
        table.insert(&format!("song {}", i), i);
    }
    // 101 -> 211 -> 431 -> 863 -> 1733
    assert_eq!(table.bucket_count(), 1733);
    assert!(table.load_factor() <= 0.01);
}

#[test]
fn test_hash_fixed_table_never_grows() {
    let mut table = HashIndex::new(101);
    for i in 0..1000 {
        table.insert(&format!("song {}", i), i);
    }
    assert_eq!(table.bucket_count(), 101);
    assert_eq!(table.len(), 1000);
    assert!(table.load_factor() > 9.0);
    table.clear();
    assert!(table.is_empty());
    assert_eq!(table.bucket_count(), 101);
}
