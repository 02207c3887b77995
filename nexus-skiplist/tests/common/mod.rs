#![allow(dead_code)]

use nexus_skiplist::{BoxedSkipStorage, Handle, MAX_LEVEL, MAX_NUMBER_OF_LEVELS, SkipList};

pub type Storage = BoxedSkipStorage<u64>;
pub type List = SkipList<u64, Storage>;

/// Entropy that draws exactly `level`.
pub fn entropy_for(level: usize) -> u64 {
    1 << (2 * level)
}

/// Every level's chain, front to back, as `(handle, key)`.
pub fn snapshot(list: &List, storage: &Storage) -> (usize, Vec<Vec<(Handle, u64)>>) {
    let chains = (0..MAX_NUMBER_OF_LEVELS)
        .map(|level| list.level_iter(storage, level).collect())
        .collect();
    (list.level(), chains)
}

/// Asserts ordering, link symmetry, level membership, and level bookkeeping.
pub fn check_structure(list: &List, storage: &Storage) {
    assert!(list.level() <= MAX_LEVEL);

    for level in 0..MAX_NUMBER_OF_LEVELS {
        let fwd: Vec<_> = list.level_iter(storage, level).collect();
        let mut bwd: Vec<_> = list.level_iter(storage, level).rev().collect();
        bwd.reverse();
        assert_eq!(fwd, bwd, "prev/next disagree on level {level}");

        assert!(
            fwd.windows(2).all(|w| w[0].1 <= w[1].1),
            "level {level} out of order"
        );
        for (h, _) in &fwd {
            let node_level = list.node_level(storage, *h).expect("dead handle linked");
            assert!(node_level >= level, "level-{node_level} node on level {level}");
        }

        if level <= list.level() {
            assert!(!fwd.is_empty() || list.is_empty(), "level {level} empty below top");
        } else {
            assert!(fwd.is_empty(), "level {level} occupied above top");
        }
    }

    assert_eq!(list.iter(storage).count(), list.len());
    assert_eq!(list.level_iter(storage, 0).count(), list.len());
}
