use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

#[test]
fn test_scenario_insert_and_in_order() {
    let mut t: OrderStatRBTree<i32, &str> = OrderStatRBTree::new();
    for (k, v) in [(5, "a"), (3, "b"), (7, "c"), (1, "d"), (4, "e")] {
        t.insert(k, v);
    }
    assert_eq!(t.len(), 5);
    let collected: Vec<_> = t.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(
        collected,
        vec![(1, "d"), (3, "b"), (4, "e"), (5, "a"), (7, "c")]
    );
    let stats = t.validate().expect("tree must be internally consistent");
    assert_eq!(stats.entries, 5);
}

#[test]
fn test_scenario_remove_by_key() {
    let mut t: OrderStatRBTree<i32, &str> = OrderStatRBTree::new();
    for (k, v) in [(5, "a"), (3, "b"), (7, "c"), (1, "d"), (4, "e")] {
        t.insert(k, v);
    }
    assert_eq!(t.remove(&3), Some("b"));
    assert_eq!(t.len(), 4);
    t.validate().unwrap();
    assert!(t.iter().all(|(k, _)| *k != 3));
}

#[test]
fn test_scenario_remove_at_position() {
    let mut t: OrderStatRBTree<i32, &str> = OrderStatRBTree::new();
    for (k, v) in [(5, "a"), (3, "b"), (7, "c"), (1, "d"), (4, "e")] {
        t.insert(k, v);
    }
    assert_eq!(t.remove_at(2), (4, "e"));
    assert_eq!(t.len(), 4);
    t.validate().unwrap();
    assert_eq!(t.get_at(2), (&5, &"a"));
}

#[test]
fn test_empty_tree_boundaries() {
    let t: OrderStatRBTree<i32, i32> = OrderStatRBTree::new();
    assert!(t.is_empty());
    assert_eq!(t.first(), None);
    assert_eq!(t.last(), None);
    assert_eq!(t.get(&0), None);
    t.validate().unwrap();
}

#[test]
#[should_panic]
fn test_empty_tree_positional_get_panics() {
    let t: OrderStatRBTree<i32, i32> = OrderStatRBTree::new();
    t.get_at(0);
}

#[test]
#[should_panic]
fn test_out_of_range_remove_at_panics() {
    let mut t: OrderStatRBTree<i32, i32> = OrderStatRBTree::new();
    t.insert(1, 1);
    t.remove_at(5);
}

#[test]
fn test_single_node_tree() {
    let mut t: OrderStatRBTree<i32, i32> = OrderStatRBTree::new();
    t.insert(42, 42);
    let stats = t.validate().unwrap();
    assert_eq!(stats.black_height, 1);
    assert_eq!(t.get_at(0), (&42, &42));
}

#[test]
fn test_insert_then_remove_all_is_empty_and_balanced() {
    let mut t: OrderStatRBTree<i32, i32> = OrderStatRBTree::new();
    let keys: Vec<i32> = (0..200).collect();
    for &k in &keys {
        t.insert(k, k * 2);
    }
    t.validate().unwrap();
    for &k in &keys {
        assert_eq!(t.remove(&k), Some(k * 2));
        t.validate().unwrap();
    }
    assert!(t.is_empty());
    assert_eq!(t.root_id(), None);
}

#[test]
fn test_insert_then_lookup_returns_last_value() {
    let mut t: OrderStatRBTree<i32, i32> = OrderStatRBTree::new();
    for k in 0..50 {
        t.insert(k, k);
        t.insert(k, k + 1000);
    }
    for k in 0..50 {
        assert_eq!(t.get(&k), Some(&(k + 1000)));
    }
}

#[test]
fn test_values_view_set_by_position_does_not_resort() {
    let mut t: OrderStatRBTree<i32, i32> = OrderStatRBTree::new();
    for k in [5, 3, 7, 1, 4] {
        t.insert(k, k);
    }
    let old = t.set_value_at(2, 999);
    assert_eq!(old, 4);
    let keys_before: Vec<i32> = t.keys().iter().copied().collect();
    assert_eq!(keys_before, vec![1, 3, 4, 5, 7]);
    assert_eq!(*t.values().get_at(2), 999);
}

#[test]
fn test_hash_is_stable_and_changes_on_mutation() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut t: OrderStatRBTree<i32, i32> = OrderStatRBTree::new();
    t.insert(1, 1);
    t.insert(2, 2);

    let hash_of = |t: &OrderStatRBTree<i32, i32>| {
        let mut h = DefaultHasher::new();
        t.hash(&mut h);
        h.finish()
    };

    let h1 = hash_of(&t);
    let h2 = hash_of(&t);
    assert_eq!(h1, h2, "hash must be stable without mutation");

    t.insert(3, 3);
    let h3 = hash_of(&t);
    assert_ne!(h1, h3, "hash must change after mutation");
}

/// Randomized insert/remove/positional-access sequence checked against a
/// `BTreeMap` oracle plus `validate()`, in the same spirit as the teacher's
/// `test_llrb` (seeded `SmallRng`, compare against `std::collections::BTreeMap`).
#[test]
fn test_randomized_against_btreemap_oracle() {
    let seed: u64 = 0xC0FFEE_u64.wrapping_add(2026);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut tree: OrderStatRBTree<u32, u32> = OrderStatRBTree::new();
    let mut oracle: BTreeMap<u32, u32> = BTreeMap::new();

    for step in 0..5000u32 {
        let key: u32 = rng.gen_range(0..500);
        match rng.gen_range(0..4) {
            0 | 1 => {
                tree.insert(key, step);
                oracle.insert(key, step);
            }
            2 => {
                assert_eq!(tree.remove(&key), oracle.remove(&key));
            }
            _ => {
                assert_eq!(tree.get(&key), oracle.get(&key));
            }
        }
        assert_eq!(tree.len(), oracle.len());
        if step % 200 == 0 {
            tree.validate().expect("invariants must hold after every op");
            let expect: Vec<_> = oracle.iter().map(|(k, v)| (*k, *v)).collect();
            let got: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
            assert_eq!(got, expect);
            for (i, (k, v)) in expect.iter().enumerate() {
                assert_eq!(tree.get_at(i), (k, v));
            }
        }
    }
    tree.validate().unwrap();
}

#[test]
fn test_pop_first_and_pop_last_drain_in_order() {
    let mut t: OrderStatRBTree<i32, i32> = OrderStatRBTree::new();
    for k in 0..20 {
        t.insert(k, k);
    }
    let mut got = Vec::new();
    while let Some((k, _)) = t.pop_first() {
        got.push(k);
    }
    assert_eq!(got, (0..20).collect::<Vec<_>>());

    let mut t: OrderStatRBTree<i32, i32> = OrderStatRBTree::new();
    for k in 0..20 {
        t.insert(k, k);
    }
    let mut got = Vec::new();
    while let Some((k, _)) = t.pop_last() {
        got.push(k);
    }
    assert_eq!(got, (0..20).rev().collect::<Vec<_>>());
}
