//! Property tests for the tree's search, insert and delete behavior.

use std::collections::BTreeMap;

use btree_core::{BTree, BTreeConfig, DuplicatePolicy, Key, UnderflowPolicy};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    Insert(Key),
    Delete(Key),
    Search(Key),
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (-50..50i32).prop_map(Operation::Insert),
        2 => (-50..50i32).prop_map(Operation::Delete),
        1 => (-50..50i32).prop_map(Operation::Search),
    ]
}

fn arb_config() -> impl Strategy<Value = BTreeConfig> {
    (
        2usize..=5,
        prop_oneof![Just(DuplicatePolicy::Allow), Just(DuplicatePolicy::Ignore)],
        prop_oneof![Just(UnderflowPolicy::Tolerate), Just(UnderflowPolicy::Repair)],
    )
        .prop_map(|(t, duplicates, underflow)| {
            BTreeConfig::new(t).duplicates(duplicates).underflow(underflow)
        })
}

/// Multiset model of the tree's contents
fn model_insert(model: &mut BTreeMap<Key, usize>, key: Key, duplicates: DuplicatePolicy) -> bool {
    let count = model.entry(key).or_insert(0);
    if *count > 0 && duplicates == DuplicatePolicy::Ignore {
        return false;
    }
    *count += 1;
    true
}

fn model_delete(model: &mut BTreeMap<Key, usize>, key: Key) -> bool {
    match model.get_mut(&key) {
        Some(count) if *count > 0 => {
            *count -= 1;
            if *count == 0 {
                model.remove(&key);
            }
            true
        }
        _ => false,
    }
}

fn model_keys(model: &BTreeMap<Key, usize>) -> Vec<Key> {
    model
        .iter()
        .flat_map(|(&key, &count)| std::iter::repeat(key).take(count))
        .collect()
}

proptest! {
    #[test]
    fn prop_distinct_keys_round_trip(
        t in 2usize..=6,
        keys in prop::collection::hash_set(-1000..1000i32, 0..200),
        probes in prop::collection::vec(-1000..1000i32, 0..50),
    ) {
        let mut tree = BTree::new(t).unwrap();
        for &key in &keys {
            prop_assert!(tree.insert(key));
        }

        for &key in &keys {
            prop_assert!(tree.search(key));
        }
        for probe in probes {
            prop_assert_eq!(tree.search(probe), keys.contains(&probe));
        }
        prop_assert_eq!(tree.len(), keys.len());
        prop_assert!(tree.validate().is_ok());
    }

    #[test]
    fn prop_operations_match_model(
        config in arb_config(),
        ops in prop::collection::vec(arb_operation(), 1..300),
    ) {
        let duplicates = config.duplicates;
        let mut tree = BTree::with_config(config).unwrap();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Operation::Insert(key) => {
                    let expected = model_insert(&mut model, key, duplicates);
                    prop_assert_eq!(tree.insert(key), expected);
                }
                Operation::Delete(key) => {
                    let expected = model_delete(&mut model, key);
                    prop_assert_eq!(tree.delete(key), expected, "delete {}", key);
                }
                Operation::Search(key) => {
                    prop_assert_eq!(tree.search(key), model.contains_key(&key));
                }
            }
            let valid = tree.validate();
            prop_assert!(valid.is_ok(), "{:?}", valid);
        }

        prop_assert_eq!(tree.keys(), model_keys(&model));
    }

    #[test]
    fn prop_search_does_not_change_shape(
        keys in prop::collection::vec(-100..100i32, 0..100),
        probes in prop::collection::vec(-100..100i32, 1..20),
    ) {
        let mut tree = BTree::new(3).unwrap();
        for key in keys {
            tree.insert(key);
        }

        let before = tree.render();
        for probe in probes {
            tree.search(probe);
        }
        prop_assert_eq!(tree.render(), before);
    }

    #[test]
    fn prop_delete_only_removes_target(
        t in 2usize..=4,
        repair in any::<bool>(),
        keys in prop::collection::btree_set(0..500i32, 1..150),
        pick in any::<prop::sample::Index>(),
    ) {
        let underflow = if repair { UnderflowPolicy::Repair } else { UnderflowPolicy::Tolerate };
        let mut tree = BTree::with_config(BTreeConfig::new(t).underflow(underflow)).unwrap();
        for &key in &keys {
            tree.insert(key);
        }

        let keys: Vec<Key> = keys.into_iter().collect();
        let target = keys[pick.index(keys.len())];
        prop_assert!(tree.delete(target));
        prop_assert!(!tree.search(target));
        for &key in keys.iter().filter(|&&key| key != target) {
            prop_assert!(tree.search(key), "lost {} after deleting {}", key, target);
        }
    }
}
