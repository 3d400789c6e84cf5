#![cfg(test)]

// Property tests for HashTable kept inside the crate so the bucket-level
// accounting can be checked alongside the public behavior.

use crate::config::ResizePolicy;
use crate::hash::{KeyHasher, SumHash, WeightedHash};
use crate::hash_table::HashTable;
use hashbrown::HashMap;
use proptest::prelude::*;
use std::collections::BTreeSet;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Resize(usize),
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => (1usize..=16).prop_map(OpI::Resize),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn check_structure<V, H: KeyHasher>(
    sut: &HashTable<V, H>,
    model: &HashMap<String, i32>,
) -> Result<(), TestCaseError> {
    let total: usize = (0..sut.capacity()).filter_map(|i| sut.bucket_len(i)).sum();
    prop_assert_eq!(total, sut.len(), "size must equal the sum of chain lengths");
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());
    let empty = (0..sut.capacity())
        .filter(|&i| sut.bucket_len(i) == Some(0))
        .count();
    prop_assert_eq!(sut.empty_buckets(), empty);
    let load = sut.len() as f64 / sut.capacity() as f64;
    prop_assert!((sut.table_load() - load).abs() < 1e-12);
    Ok(())
}

fn run_state_machine<H: KeyHasher>(
    mut sut: HashTable<i32, H>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = pool[i].clone();
                let prev = sut.put(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k, v));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(!sut.contains_key(k));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "get_mut presence differs for {:?}", k),
                }
            }
            OpI::Resize(n) => {
                let before = sut.len();
                sut.resize_table(n).expect("non-zero capacity");
                prop_assert_eq!(sut.capacity(), n);
                prop_assert_eq!(sut.len(), before);
            }
            OpI::Clear => {
                let cap = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap);
            }
        }

        check_structure(&sut, &model)?;
        // Every live key sits in the bucket its hash selects.
        for k in model.keys() {
            let idx = sut.bucket_index(k);
            prop_assert!(sut.bucket_len(idx).unwrap_or(0) > 0);
            prop_assert_eq!(sut.get(k), model.get(k));
        }
    }

    let live: BTreeSet<&String> = model.keys().collect();
    for k in &pool {
        prop_assert_eq!(sut.contains_key(k), live.contains(k));
    }
    Ok(())
}

// Property: State-machine equivalence against hashbrown::HashMap.
// Invariants exercised across random operation sequences:
// - put returns the replaced value and never double-counts an update.
// - remove decrements size only on success and leaves the key absent.
// - resize_table preserves contents and size at any capacity.
// - size equals the sum of chain lengths after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_weighted((pool, ops) in arb_scenario(), cap in 1usize..=8) {
        let sut = HashTable::new(cap, WeightedHash).unwrap();
        run_state_machine(sut, pool, ops)?;
    }

    #[test]
    fn prop_state_machine_sum((pool, ops) in arb_scenario(), cap in 1usize..=8) {
        let sut = HashTable::new(cap, SumHash).unwrap();
        run_state_machine(sut, pool, ops)?;
    }
}

// Property: Same invariants under worst-case collision behavior (every key
// lands in bucket 0), which stresses chain unlinking.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), cap in 1usize..=8) {
        let sut = HashTable::new(cap, |_: &str| 0u64).unwrap();
        run_state_machine(sut, pool, ops)?;
    }
}

// Property: With a grow policy the table may change capacity on its own,
// but contents and accounting match the model throughout.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_growth((pool, ops) in arb_scenario(), threshold in 0.5f64..3.0) {
        let mut sut = HashTable::new(1, WeightedHash).unwrap();
        sut.set_policy(ResizePolicy::Grow { threshold, factor: 2 }).unwrap();
        run_state_machine(sut, pool, ops)?;
    }
}
