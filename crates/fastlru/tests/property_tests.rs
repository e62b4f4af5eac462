//! Property tests for fastlru
//!
//! Random operation sequences are replayed against both the cache and a
//! plain `VecDeque` model (front = most recently used). Order, size and
//! lookup results must agree after every step.

use std::collections::VecDeque;

use fastlru::{Error, LruCache, MIN_CAPACITY};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Get(u8),
    Set(u8, u8),
    Remove(u8),
    Clear,
}

fn strategy_op() -> impl Strategy<Value = Op> {
    // A small key space forces hits, promotions and evictions.
    prop_oneof![
        8 => (0u8..24).prop_map(Op::Get),
        10 => (0u8..24, 0u8..4).prop_map(|(k, v)| Op::Set(k, v)),
        1 => (0u8..24).prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

fn key(k: u8) -> String {
    format!("key-{k}")
}

#[derive(Default)]
struct Model {
    entries: VecDeque<(String, u8)>,
}

impl Model {
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn get(&mut self, key: &str) -> Result<u8, Error> {
        if self.entries.is_empty() {
            return Err(Error::EmptyCache);
        }
        let idx = self.position(key).ok_or(Error::KeyNotFound)?;
        let entry = self.entries.remove(idx).unwrap();
        let value = entry.1;
        self.entries.push_front(entry);
        Ok(value)
    }

    fn set(&mut self, key: String, value: u8, capacity: usize) -> Option<(String, u8)> {
        if let Some(idx) = self.position(&key) {
            self.entries.remove(idx);
            self.entries.push_front((key, value));
            return None;
        }
        let evicted = if self.entries.len() == capacity {
            self.entries.pop_back()
        } else {
            None
        };
        self.entries.push_front((key, value));
        evicted
    }

    fn remove(&mut self, key: &str) -> Option<u8> {
        let idx = self.position(key)?;
        self.entries.remove(idx).map(|(_, v)| v)
    }

    fn values(&self) -> Vec<u8> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }
}

proptest! {
    // Cache agrees with the model after every operation.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(strategy_op(), 1..400)) {
        let mut cache = LruCache::new(MIN_CAPACITY);
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Get(k) => {
                    let got = cache.get(&key(k)).copied();
                    prop_assert_eq!(got, model.get(&key(k)));
                }
                Op::Set(k, v) => {
                    let evicted = cache.set(key(k), v);
                    prop_assert_eq!(evicted, model.set(key(k), v, MIN_CAPACITY));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(cache.remove(&key(k)), model.remove(&key(k)));
                }
                Op::Clear => {
                    cache.clear();
                    model.entries.clear();
                }
            }

            prop_assert!(cache.is_consistent());
            prop_assert_eq!(cache.snapshot(), model.values());
            prop_assert_eq!(cache.len(), model.entries.len());
            prop_assert!(cache.len() <= cache.capacity());
        }
    }

    // Distinct inserts up to capacity come back in reverse insertion order.
    #[test]
    fn prop_distinct_inserts_reverse_order(n in 1usize..=MIN_CAPACITY) {
        let mut cache = LruCache::new(MIN_CAPACITY);
        for i in 0..n {
            prop_assert_eq!(cache.set(format!("k{i}"), i), None);
        }

        let expected: Vec<usize> = (0..n).rev().collect();
        prop_assert_eq!(cache.snapshot(), expected);
    }

    // Each insert past capacity evicts exactly the least recently used key.
    #[test]
    fn prop_overflow_evicts_one(extra in 1usize..30) {
        let mut cache = LruCache::new(MIN_CAPACITY);
        for i in 0..MIN_CAPACITY + extra {
            let evicted = cache.set(format!("k{i}"), i);
            if i < MIN_CAPACITY {
                prop_assert!(evicted.is_none());
            } else {
                let victim = i - MIN_CAPACITY;
                prop_assert_eq!(evicted, Some((format!("k{victim}"), victim)));
            }
            prop_assert!(cache.len() <= MIN_CAPACITY);
            prop_assert!(cache.is_consistent());
        }
    }

    // Get on a cached key moves it to the front and keeps the size.
    #[test]
    fn prop_get_promotes(n in 2usize..=MIN_CAPACITY, pick in any::<prop::sample::Index>()) {
        let mut cache = LruCache::new(MIN_CAPACITY);
        for i in 0..n {
            cache.set(format!("k{i}"), i);
        }

        let target = pick.index(n);
        prop_assert_eq!(cache.get(&format!("k{target}")), Ok(&target));
        prop_assert_eq!(cache.len(), n);
        prop_assert_eq!(cache.snapshot()[0], target);
    }
}

#[test]
fn capacity_ten_walkthrough() {
    let mut cache = LruCache::new(10);

    cache.set("A", 1);
    assert_eq!(cache.snapshot(), [1]);

    cache.set("B", 2);
    cache.set("C", 3);
    assert_eq!(cache.snapshot(), [3, 2, 1]);

    assert_eq!(cache.get("A"), Ok(&1));
    assert_eq!(cache.snapshot(), [1, 3, 2]);

    // Eleven distinct keys in total; B is least recently used when the
    // eleventh arrives.
    let mut evicted = Vec::new();
    for (i, key) in ["D", "E", "F", "G", "H", "I", "J", "K"].into_iter().enumerate() {
        if let Some((key, _)) = cache.set(key, 4 + i as i32) {
            evicted.push(key);
        }
    }

    assert_eq!(evicted, ["B"]);
    assert_eq!(cache.len(), 10);
    assert!(!cache.snapshot().contains(&2));
    assert_eq!(cache.get("B"), Err(Error::KeyNotFound));
}

#[test]
fn clear_then_reuse_matches_fresh_cache() {
    let mut used = LruCache::new(10);
    for i in 0..25 {
        used.set(format!("k{i}"), i);
    }
    used.clear();
    assert!(used.snapshot().is_empty());

    let mut fresh = LruCache::new(10);
    for cache in [&mut used, &mut fresh] {
        cache.set("x", 1);
        cache.set("y", 2);
        cache.get("x").unwrap();
    }

    assert_eq!(used.snapshot(), fresh.snapshot());
    assert_eq!(used.len(), fresh.len());
}
