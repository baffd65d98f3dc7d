//! Property-based tests for RbTree.
//!
//! Random operation sequences are replayed against `std::collections::BTreeMap`
//! as a model; after every step the tree must agree with the model and pass
//! its own structural validation.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rb_map::RbTree;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Insert(i16, u32),
    Remove(i16),
    EraseNth(usize),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<i16>(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k % 64, v)),
        1 => any::<i16>().prop_map(|k| Op::Remove(k % 64)),
        1 => any::<usize>().prop_map(Op::EraseNth),
    ]
}

fn arbitrary_tree(max_size: usize) -> impl Strategy<Value = (RbTree<i32, i32>, Vec<i32>)> {
    prop::collection::vec(any::<i32>(), 0..max_size).prop_map(|keys| {
        let tree = keys.iter().map(|&k| (k, k)).collect();
        (tree, keys)
    })
}

// =============================================================================
// Model Agreement
// =============================================================================

proptest! {
    /// Every operation sequence leaves the tree equal to the model and valid.
    #[test]
    fn prop_matches_btreemap_model(ops in prop::collection::vec(arbitrary_op(), 0..200)) {
        let mut tree = RbTree::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let (handle, inserted) = tree.insert(k, v);
                    let expected = !model.contains_key(&k);
                    if expected {
                        model.insert(k, v);
                    }
                    prop_assert_eq!(inserted, expected);
                    prop_assert_eq!(tree.key(handle), Some(&k));
                    prop_assert_eq!(tree.value(handle), model.get(&k));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(tree.remove(&k), model.remove(&k));
                }
                Op::EraseNth(n) => {
                    if model.is_empty() {
                        continue;
                    }
                    let n = n % model.len();
                    let mut handle = tree.begin();
                    for _ in 0..n {
                        handle = tree.next(handle);
                    }
                    let key = *model.keys().nth(n).unwrap_or(&i16::MIN);
                    prop_assert_eq!(tree.key(handle), Some(&key));

                    let next = tree.erase(handle);
                    model.remove(&key);
                    let expected_next = model.range(key..).next().map(|(k, _)| k);
                    prop_assert_eq!(tree.key(next), expected_next);
                }
            }

            prop_assert_eq!(tree.len(), model.len());
            prop_assert!(tree.validate().is_ok());
            prop_assert_eq!(tree.first(), model.iter().next());
        }

        prop_assert!(tree.iter().eq(model.iter()));
        prop_assert!(tree.iter().rev().eq(model.iter().rev()));
    }
}

// =============================================================================
// Ordering Laws
// =============================================================================

proptest! {
    /// Forward iteration is strictly ascending.
    #[test]
    fn prop_forward_iteration_strictly_ascending((tree, _) in arbitrary_tree(100)) {
        let keys: Vec<i32> = tree.keys().copied().collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    /// Reverse iteration is strictly descending.
    #[test]
    fn prop_reverse_iteration_strictly_descending((tree, _) in arbitrary_tree(100)) {
        let keys: Vec<i32> = tree.keys().rev().copied().collect();
        prop_assert!(keys.windows(2).all(|w| w[0] > w[1]));
    }

    /// Length equals the number of distinct inserted keys.
    #[test]
    fn prop_len_counts_distinct_keys((tree, keys) in arbitrary_tree(100)) {
        let mut distinct = keys.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(tree.len(), distinct.len());
    }
}

// =============================================================================
// Round Trip
// =============================================================================

proptest! {
    /// Inserting distinct keys then erasing them all empties the tree.
    #[test]
    fn prop_insert_then_erase_all_is_empty(
        keys in prop::collection::btree_set(any::<i32>(), 0..150),
        seed in any::<u64>()
    ) {
        let mut tree: RbTree<i32, ()> = keys.iter().map(|&k| (k, ())).collect();
        prop_assert_eq!(tree.len(), keys.len());

        let mut order: Vec<i32> = keys.into_iter().collect();
        let len = order.len().max(1);
        order.rotate_left((seed as usize) % len);

        for key in order {
            prop_assert_eq!(tree.remove(&key), Some(()));
            prop_assert!(tree.validate().is_ok());
        }

        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.begin(), tree.end());
        prop_assert_eq!(tree.validate(), Ok(0));
    }

    /// A duplicate insert changes neither the length nor the stored value.
    #[test]
    fn prop_duplicate_insert_is_noop(
        (mut tree, keys) in arbitrary_tree(50),
        value: i32
    ) {
        prop_assume!(!keys.is_empty());
        let key = keys[0];
        let before_len = tree.len();
        let before_value = tree.get(&key).copied();

        let (handle, inserted) = tree.insert(key, value);
        prop_assert!(!inserted);
        prop_assert_eq!(tree.len(), before_len);
        prop_assert_eq!(tree.get(&key).copied(), before_value);
        prop_assert_eq!(tree.key(handle), Some(&key));
    }
}
