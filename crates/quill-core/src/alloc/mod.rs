//! Allocation and collection types shared by the quill crates.
//!
//! This module provides:
//! - Re-exports of hash collections using AHash
//! - [`SparseSet`], generational storage used for object handles

pub mod sparse_set;

pub use sparse_set::{IndexSlot, SparseSet};

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert((65u32, 86u32), -3i32);
        assert_eq!(map.get(&(65, 86)), Some(&-3));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert(42u32);
        assert!(set.contains(&42));
    }
}
