//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations, apply them to the heap
//! and to a plain reference model, and verify after every step that the heap
//! agrees with the model and that its internal invariants hold.

use proptest::prelude::*;
use adaptable_heap::{AdaptableHeap, CompleteBinaryTree, EntryHandle, HeapConfig, NaturalOrder, TieBreak};

use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    RemoveMin,
    Remove(usize),
    ReplaceKey(usize, i16),
    ReplaceValue(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => any::<i16>().prop_map(Op::Insert),
        2 => Just(Op::RemoveMin),
        2 => any::<usize>().prop_map(Op::Remove),
        3 => (any::<usize>(), any::<i16>()).prop_map(|(which, key)| Op::ReplaceKey(which, key)),
        1 => any::<usize>().prop_map(Op::ReplaceValue),
    ]
}

fn tie_break_strategy() -> impl Strategy<Value = TieBreak> {
    prop_oneof![Just(TieBreak::Left), Just(TieBreak::Random)]
}

/// Runs `ops` against the heap and a model of live entries
fn run_against_model(ops: Vec<Op>, config: HeapConfig) -> Result<(), TestCaseError> {
    let mut heap = AdaptableHeap::with_config(NaturalOrder, config);
    // value id -> (handle, key)
    let mut model: HashMap<u32, (EntryHandle, i16)> = HashMap::new();
    let mut live: Vec<u32> = Vec::new();
    let mut next_id = 0u32;

    for op in ops {
        match op {
            Op::Insert(key) => {
                let handle = heap.insert(key, next_id).unwrap();
                model.insert(next_id, (handle, key));
                live.push(next_id);
                next_id += 1;
            }
            Op::RemoveMin => {
                if live.is_empty() {
                    prop_assert!(heap.remove_min().is_err());
                    continue;
                }
                let expected = model.values().map(|&(_, k)| k).min().unwrap();
                let entry = heap.remove_min().unwrap();
                prop_assert_eq!(*entry.key(), expected);
                let id = *entry.value();
                prop_assert_eq!(model.remove(&id).map(|(_, k)| k), Some(expected));
                live.retain(|&x| x != id);
            }
            Op::Remove(which) => {
                if live.is_empty() {
                    continue;
                }
                let id = live.swap_remove(which % live.len());
                let (handle, key) = model.remove(&id).unwrap();
                let entry = heap.remove(handle).unwrap();
                prop_assert_eq!(entry.into_key_value(), (key, id));
                prop_assert!(!heap.contains(handle));
            }
            Op::ReplaceKey(which, key) => {
                if live.is_empty() {
                    continue;
                }
                let id = live[which % live.len()];
                let slot = model.get_mut(&id).unwrap();
                let old = heap.replace_key(slot.0, key).unwrap();
                prop_assert_eq!(old, slot.1);
                slot.1 = key;
            }
            Op::ReplaceValue(which) => {
                if live.is_empty() {
                    continue;
                }
                let id = live[which % live.len()];
                let handle = model[&id].0;
                let before: Vec<_> = live
                    .iter()
                    .map(|other| heap.get(model[other].0).unwrap().position())
                    .collect();
                // Same value back: ids stay unique, ordering must not change.
                prop_assert_eq!(heap.replace_value(handle, id).unwrap(), id);
                let after: Vec<_> = live
                    .iter()
                    .map(|other| heap.get(model[other].0).unwrap().position())
                    .collect();
                prop_assert_eq!(before, after);
            }
        }

        prop_assert!(heap.verify_invariants());
        prop_assert_eq!(heap.len(), model.len());
        match model.values().map(|&(_, k)| k).min() {
            Some(expected) => prop_assert_eq!(*heap.min().unwrap().key(), expected),
            None => prop_assert!(heap.min().is_err()),
        }

        // Every live handle resolves to an entry whose cached position holds it.
        let view = heap.tree();
        for &(handle, key) in model.values() {
            let entry = heap.get(handle).unwrap();
            prop_assert_eq!(*entry.key(), key);
            let pos = entry.position().unwrap();
            prop_assert!(std::ptr::eq(view.element(pos).unwrap(), entry));
        }
    }

    Ok(())
}

proptest! {
    #[test]
    fn prop_heap_matches_model(
        ops in prop::collection::vec(op_strategy(), 0..200),
        tie_break in tie_break_strategy(),
        seed in any::<u64>(),
    ) {
        let config = HeapConfig::default().with_tie_break(tie_break).with_seed(seed);
        run_against_model(ops, config)?;
    }

    #[test]
    fn prop_drain_is_sorted(keys in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut heap = AdaptableHeap::new();
        for &k in &keys {
            heap.insert(k, ()).unwrap();
        }
        let drained: Vec<i32> = heap.into_sorted_vec().into_iter().map(|e| *e.key()).collect();
        let mut expected = keys.clone();
        expected.sort_unstable();
        prop_assert_eq!(drained, expected);
    }

    #[test]
    fn prop_few_distinct_keys(keys in prop::collection::vec(0u8..3, 0..100)) {
        let mut heap = AdaptableHeap::new();
        for (i, &k) in keys.iter().enumerate() {
            heap.insert(k, i).unwrap();
        }
        let mut seen = vec![false; keys.len()];
        let mut last = 0u8;
        while let Ok(entry) = heap.remove_min() {
            prop_assert!(heap.verify_invariants());
            prop_assert!(*entry.key() >= last);
            last = *entry.key();
            prop_assert!(!seen[*entry.value()]);
            seen[*entry.value()] = true;
        }
        prop_assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn prop_tree_shape(adds in prop::collection::vec(any::<bool>(), 0..300)) {
        let mut tree = CompleteBinaryTree::new();
        let mut len = 0usize;
        for add in adds {
            if add {
                tree.add(len);
                len += 1;
            } else if len > 0 {
                prop_assert_eq!(tree.remove_last(), Ok(len - 1));
                len -= 1;
            } else {
                prop_assert!(tree.remove_last().is_err());
            }
            prop_assert_eq!(tree.len(), len);
            prop_assert!(tree.verify_shape());
            if len > 0 {
                // A complete tree of n nodes has height floor(log2(n)).
                prop_assert_eq!(tree.height(), Some(len.ilog2() as usize));
            }
        }
    }
}
