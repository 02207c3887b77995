//! Model-based checks: random operation sequences against a sorted Vec.

use nexus_skiplist::{BoxedSkipStorage, Handle};
use proptest::prelude::*;

mod common;

use common::{List, Storage, check_structure, snapshot};

const CAPACITY: usize = 64;

#[derive(Debug, Clone)]
enum Op {
    Insert { key: u64, entropy: u64 },
    Remove(usize),
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        // Small key range forces duplicates; low entropy values hit tall levels
        4 => (0u64..16, prop_oneof![any::<u64>(), (0u32..64).prop_map(|s| 1u64 << s)])
            .prop_map(|(key, entropy)| Op::Insert { key, entropy }),
        2 => any::<usize>().prop_map(Op::Remove),
        1 => Just(Op::Pop),
    ]
}

/// Live entries as `(handle, key, insertion sequence)`.
type Model = Vec<(Handle, u64, u64)>;

fn model_order(model: &Model) -> Vec<Handle> {
    let mut sorted = model.clone();
    sorted.sort_by_key(|&(_, key, seq)| (key, seq));
    sorted.into_iter().map(|(h, _, _)| h).collect()
}

fn apply(list: &mut List, storage: &mut Storage, model: &mut Model, seq: &mut u64, op: &Op) {
    match *op {
        Op::Insert { key, entropy } => {
            match list.try_insert(storage, key, *seq, entropy) {
                Ok(h) => {
                    model.push((h, key, *seq));
                    *seq += 1;
                }
                Err(full) => {
                    assert_eq!(model.len(), CAPACITY);
                    assert_eq!(full.into_inner(), *seq);
                }
            }
        }
        Op::Remove(i) => {
            if model.is_empty() {
                return;
            }
            let (h, _, value) = model.swap_remove(i % model.len());
            assert_eq!(list.remove(storage, h), Ok(value));
        }
        Op::Pop => {
            let expected = model_order(model).first().copied();
            let popped = list.pop_first(storage);
            match expected {
                None => assert_eq!(popped, None),
                Some(h) => {
                    let pos = model.iter().position(|&(mh, _, _)| mh == h).unwrap();
                    let (_, key, value) = model.swap_remove(pos);
                    assert_eq!(popped, Some((key, value)));
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn matches_sorted_model(ops in prop::collection::vec(op(), 1..200)) {
        let mut storage = BoxedSkipStorage::with_capacity(CAPACITY);
        let mut list = List::new();
        let mut model = Model::new();
        let mut seq = 0;

        for op in &ops {
            apply(&mut list, &mut storage, &mut model, &mut seq, op);

            let order: Vec<_> = list.iter(&storage).map(|(h, _, _)| h).collect();
            prop_assert_eq!(&order, &model_order(&model));
            prop_assert_eq!(list.len(), model.len());

            let min = model.iter().map(|&(_, key, _)| key).min();
            prop_assert_eq!(list.first(&storage).map(|(key, _)| key), min);
        }
        check_structure(&list, &storage);
    }

    #[test]
    fn insert_remove_is_identity(
        ops in prop::collection::vec(op(), 0..CAPACITY),
        key in any::<u64>(),
        entropy in any::<u64>(),
    ) {
        let mut storage = BoxedSkipStorage::with_capacity(CAPACITY);
        let mut list = List::new();
        let mut model = Model::new();
        let mut seq = 0;
        for op in &ops {
            apply(&mut list, &mut storage, &mut model, &mut seq, op);
        }

        let before = snapshot(&list, &storage);
        let h = list.try_insert(&mut storage, key, 0, entropy).unwrap();
        check_structure(&list, &storage);
        list.remove(&mut storage, h).unwrap();
        prop_assert_eq!(snapshot(&list, &storage), before);
        check_structure(&list, &storage);
    }
}
