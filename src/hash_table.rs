//! HashTable: a fixed array of `ChainList` buckets indexed by
//! `hash(key) mod capacity`, with explicit and policy-driven rehashing.

use crate::chain_list::{ChainList, Entry};
use crate::config::{check_capacity, ResizePolicy, TableConfig, DEFAULT_CAPACITY};
use crate::error::Result;
use crate::hash::{KeyHasher, WeightedHash};
use core::fmt;
use tracing::{debug, trace};

/// String-keyed map using separate chaining.
///
/// `size` always equals the sum of the bucket chain lengths, and every key
/// lives in bucket `hasher.hash(key) % capacity`. Capacity is never zero.
pub struct HashTable<V, H = WeightedHash> {
    buckets: Vec<ChainList<V>>,
    size: usize,
    hasher: H,
    policy: ResizePolicy,
}

impl<V, H: KeyHasher> HashTable<V, H> {
    /// Create an empty table with `capacity` buckets and no automatic
    /// resizing. Fails with `ZeroCapacity` if `capacity == 0` and with
    /// `CapacityTooLarge` above `MAX_CAPACITY`.
    pub fn new(capacity: usize, hasher: H) -> Result<Self> {
        TableConfig::new().with_capacity(capacity).build(hasher)
    }

    pub(crate) fn from_parts(capacity: usize, hasher: H, policy: ResizePolicy) -> Self {
        debug_assert!(capacity >= 1);
        Self {
            buckets: Self::empty_buckets_of(capacity),
            size: 0,
            hasher,
            policy,
        }
    }

    fn empty_buckets_of(capacity: usize) -> Vec<ChainList<V>> {
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, ChainList::new);
        buckets
    }

    /// Bucket that `key` maps to under the current capacity.
    pub fn bucket_index(&self, key: &str) -> usize {
        (self.hasher.hash(key) % self.buckets.len() as u64) as usize
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn policy(&self) -> ResizePolicy {
        self.policy
    }

    /// Replace the automatic resize policy. Takes effect on the next insert.
    pub fn set_policy(&mut self, policy: ResizePolicy) -> Result<()> {
        policy.validate()?;
        self.policy = policy;
        Ok(())
    }

    /// Insert or update `key`. An existing entry is unlinked and the new one
    /// is pushed to the front of the chain; the old value is returned and
    /// `len()` does not change.
    ///
    /// Only a fresh insert consults the resize policy.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let old = self.insert_entry(key.into(), value);
        if old.is_none() {
            if let Some(new_capacity) = self.policy.next_capacity(self.table_load(), self.capacity())
            {
                debug!(
                    load = self.table_load(),
                    old_capacity = self.capacity(),
                    new_capacity,
                    "load threshold reached; growing table"
                );
                self.rehash(new_capacity);
            }
        }
        old
    }

    // Shared by `put` and `rehash`; never triggers a resize.
    fn insert_entry(&mut self, key: String, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        let old = bucket.remove(&key);
        bucket.add_front(key, value);
        if old.is_none() {
            self.size += 1;
        }
        trace!(index, replaced = old.is_some(), "put");
        old
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.bucket_index(key)]
            .contains(key)
            .map(Entry::value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index].contains_mut(key).map(Entry::value_mut)
    }

    /// Remove `key` and return its value. `len()` drops by one on success;
    /// a missing key leaves the table untouched.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let removed = self.buckets[index].remove(key);
        if removed.is_some() {
            self.size -= 1;
        }
        trace!(index, removed = removed.is_some(), "remove");
        removed
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.buckets[self.bucket_index(key)].contains(key).is_some()
    }

    /// Drop every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        let dropped = self.size;
        self.buckets = Self::empty_buckets_of(self.capacity());
        self.size = 0;
        debug!(capacity = self.capacity(), dropped, "cleared table");
    }

    /// Rebuild the table with `new_capacity` buckets, rehashing every entry.
    ///
    /// Old buckets are visited in index order and each chain head to tail,
    /// reinserting through the same path as `put`. Rejects zero with
    /// `ZeroCapacity` and anything above `MAX_CAPACITY` with
    /// `CapacityTooLarge`; on error the table is left as it was.
    pub fn resize_table(&mut self, new_capacity: usize) -> Result<()> {
        check_capacity(new_capacity)?;
        self.rehash(new_capacity);
        Ok(())
    }

    fn rehash(&mut self, new_capacity: usize) {
        let mut old = core::mem::replace(&mut self.buckets, Self::empty_buckets_of(new_capacity));
        let old_capacity = old.len();
        self.size = 0;
        for bucket in old.iter_mut() {
            for (key, value) in bucket.drain() {
                self.insert_entry(key, value);
            }
        }
        debug!(old_capacity, new_capacity, entries = self.size, "rehashed table");
    }

    /// Number of buckets whose chain is empty.
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_empty()).count()
    }

    /// Load factor: `len() / capacity()`.
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Whether the configured policy would grow the table at the current load.
    pub fn needs_resize(&self) -> bool {
        self.policy
            .next_capacity(self.table_load(), self.capacity())
            .is_some()
    }

    /// Chain length of bucket `index`, or `None` past the end.
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(ChainList::len)
    }
}

impl<V, H: KeyHasher + Default> Default for HashTable<V, H> {
    fn default() -> Self {
        Self::from_parts(DEFAULT_CAPACITY, H::default(), ResizePolicy::Never)
    }
}

/// One line per bucket in index order: `"{index}: {chain}"`.
impl<V: fmt::Display, H> fmt::Display for HashTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bucket) in self.buckets.iter().enumerate() {
            writeln!(f, "{i}: {bucket}")?;
        }
        Ok(())
    }
}

impl<V: fmt::Debug, H> fmt::Debug for HashTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("capacity", &self.buckets.len())
            .field("size", &self.size)
            .field("policy", &self.policy)
            .field("buckets", &self.buckets)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::hash::SumHash;

    fn bucket_total<V, H: KeyHasher>(t: &HashTable<V, H>) -> usize {
        (0..t.capacity()).filter_map(|i| t.bucket_len(i)).sum()
    }

    /// Invariant: a value is readable right after `put`.
    #[test]
    fn put_then_get() {
        let mut t = HashTable::new(5, WeightedHash).unwrap();
        assert_eq!(t.put("alpha", 1), None);
        assert_eq!(t.get("alpha"), Some(&1));
        assert_eq!(t.get("beta"), None);
        assert_eq!(t.len(), 1);
    }

    /// Invariant: updating a key replaces its value, moves it to the chain
    /// head and leaves `len()` unchanged.
    #[test]
    fn update_overwrites_without_growing() {
        let always_zero = |_: &str| 0u64;
        let mut t = HashTable::new(3, always_zero).unwrap();
        t.put("a", 1);
        t.put("b", 2);
        assert_eq!(t.to_string(), "0: [(b, 2) -> (a, 1)]\n1: []\n2: []\n");

        assert_eq!(t.put("a", 10), Some(1));
        assert_eq!(t.get("a"), Some(&10));
        assert_eq!(t.len(), 2);
        assert_eq!(t.bucket_len(0), Some(2));
        assert_eq!(t.to_string(), "0: [(a, 10) -> (b, 2)]\n1: []\n2: []\n");
    }

    /// Regression: `remove` decrements `len()` so it keeps matching the
    /// total chain length.
    #[test]
    fn remove_decrements_size() {
        let mut t = HashTable::new(4, SumHash).unwrap();
        t.put("x", 1);
        t.put("y", 2);
        assert_eq!(t.remove("x"), Some(1));
        assert_eq!(t.len(), 1);
        assert_eq!(bucket_total(&t), 1);
        assert!(!t.contains_key("x"));
        assert_eq!(t.get("x"), None);

        assert_eq!(t.remove("x"), None);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut t = HashTable::new(2, SumHash).unwrap();
        t.put("k", 5);
        *t.get_mut("k").unwrap() *= 3;
        assert_eq!(t.get("k"), Some(&15));
        assert!(t.get_mut("missing").is_none());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut t = HashTable::new(7, WeightedHash).unwrap();
        for k in ["a", "b", "c", "d"] {
            t.put(k, ());
        }
        t.clear();
        assert_eq!(t.len(), 0);
        assert!(t.is_empty());
        assert_eq!(t.capacity(), 7);
        assert_eq!(t.empty_buckets(), 7);
        assert!(!t.contains_key("a"));
    }

    #[test]
    fn resize_rejects_zero_and_keeps_table() {
        let mut t = HashTable::new(3, SumHash).unwrap();
        t.put("a", 1);
        assert_eq!(t.resize_table(0), Err(TableError::ZeroCapacity));
        assert_eq!(t.capacity(), 3);
        assert_eq!(t.get("a"), Some(&1));
    }

    #[test]
    fn resize_rejects_oversized_and_keeps_table() {
        let mut t = HashTable::new(3, SumHash).unwrap();
        t.put("a", 1);
        for cap in [crate::config::MAX_CAPACITY + 1, usize::MAX] {
            assert!(matches!(
                t.resize_table(cap),
                Err(TableError::CapacityTooLarge { requested, .. }) if requested == cap
            ));
        }
        assert_eq!(t.capacity(), 3);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("a"), Some(&1));
    }

    /// Regression: a huge growth factor is refused up front instead of
    /// overflowing the bucket allocation on a later `put`.
    #[test]
    fn huge_growth_factor_never_reaches_put() {
        let r = TableConfig::new()
            .with_capacity(1)
            .with_policy(ResizePolicy::Grow { threshold: 1.0, factor: usize::MAX })
            .build::<i32, _>(WeightedHash);
        assert!(matches!(r, Err(TableError::InvalidPolicy { .. })));

        let mut t = HashTable::new(1, WeightedHash).unwrap();
        assert!(t
            .set_policy(ResizePolicy::Grow { threshold: 1.0, factor: usize::MAX })
            .is_err());
        // The rejected policy is not installed, so puts stay in one bucket.
        t.put("a", 1);
        t.put("b", 2);
        assert_eq!(t.capacity(), 1);
        assert_eq!(t.get("b"), Some(&2));
    }

    /// Invariant: a large accepted factor grows in one clamped step and the
    /// put completes normally.
    #[test]
    fn large_growth_factor_put_completes() {
        let mut t = TableConfig::new()
            .with_capacity(1)
            .with_policy(ResizePolicy::Grow { threshold: 1.0, factor: 4096 })
            .build(SumHash)
            .unwrap();
        t.put("a", 1);
        assert_eq!(t.capacity(), 4096);
        assert_eq!(t.get("a"), Some(&1));
        assert_eq!(bucket_total(&t), 1);
    }

    #[test]
    fn resize_rehashes_into_new_buckets() {
        let mut t = HashTable::new(1, SumHash).unwrap();
        for (i, k) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            t.put(*k, i);
        }
        assert_eq!(t.bucket_len(0), Some(5));

        t.resize_table(5).unwrap();
        assert_eq!(t.capacity(), 5);
        assert_eq!(t.len(), 5);
        // 'a'..='e' are 97..=101, one per bucket mod 5.
        assert_eq!(t.empty_buckets(), 0);
        for (i, k) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            assert_eq!(t.get(k), Some(&i));
            assert_eq!(t.bucket_index(k), (97 + i) % 5);
        }
    }

    /// Invariant: within one old chain, entries are reinserted head to tail,
    /// so a chain that lands in a single new bucket comes out reversed.
    #[test]
    fn resize_reverses_chain_order_within_bucket() {
        let always_zero = |_: &str| 0u64;
        let mut t = HashTable::new(2, always_zero).unwrap();
        t.put("a", 1);
        t.put("b", 2);
        t.put("c", 3);
        assert_eq!(t.to_string(), "0: [(c, 3) -> (b, 2) -> (a, 1)]\n1: []\n");
        t.resize_table(1).unwrap();
        assert_eq!(t.to_string(), "0: [(a, 1) -> (b, 2) -> (c, 3)]\n");
    }

    #[test]
    fn load_and_empty_buckets() {
        let mut t = HashTable::new(5, SumHash).unwrap();
        t.put("a", 1);
        t.put("b", 2);
        assert!((t.table_load() - 0.4).abs() < f64::EPSILON);
        assert_eq!(t.empty_buckets(), 3);
    }

    #[test]
    fn default_policy_never_grows() {
        let mut t = HashTable::new(1, SumHash).unwrap();
        for i in 0..50 {
            t.put(format!("k{i}"), i);
        }
        assert_eq!(t.capacity(), 1);
        assert!(!t.needs_resize());
        assert!((t.table_load() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn grow_policy_doubles_at_threshold() {
        let mut t: HashTable<i32, _> = TableConfig::new()
            .with_capacity(2)
            .with_policy(ResizePolicy::Grow { threshold: 2.0, factor: 2 })
            .build(WeightedHash)
            .unwrap();
        t.put("a", 1);
        t.put("b", 2);
        t.put("c", 3);
        assert_eq!(t.capacity(), 2);
        // Fourth insert reaches load 2.0.
        t.put("d", 4);
        assert_eq!(t.capacity(), 4);
        assert_eq!(t.len(), 4);
        assert_eq!(bucket_total(&t), 4);
        for (k, v) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            assert_eq!(t.get(k), Some(&v));
        }
        // Updates never grow.
        t.put("d", 40);
        assert_eq!(t.capacity(), 4);
    }

    /// Invariant: a table left far above the threshold by a manual shrink
    /// grows once per insert and never recurses while rehashing.
    #[test]
    fn grow_after_manual_shrink_grows_once() {
        let mut t = HashTable::new(8, SumHash).unwrap();
        for i in 0..16 {
            t.put(format!("k{i}"), i);
        }
        t.resize_table(1).unwrap();
        t.set_policy(ResizePolicy::Grow { threshold: 2.0, factor: 2 })
            .unwrap();
        assert!(t.needs_resize());
        t.put("one-more", 16);
        assert_eq!(t.capacity(), 2);
        assert_eq!(t.len(), 17);
        assert_eq!(bucket_total(&t), 17);
    }

    #[test]
    fn set_policy_validates() {
        let mut t: HashTable<i32, _> = HashTable::new(2, SumHash).unwrap();
        let bad = ResizePolicy::Grow { threshold: 1.0, factor: 0 };
        assert!(matches!(
            t.set_policy(bad),
            Err(TableError::InvalidPolicy { .. })
        ));
        assert_eq!(t.policy(), ResizePolicy::Never);
    }

    #[test]
    fn default_table() {
        let t: HashTable<u8> = HashTable::default();
        assert_eq!(t.capacity(), DEFAULT_CAPACITY);
        assert_eq!(*t.hasher(), WeightedHash);
        assert_eq!(t.bucket_len(DEFAULT_CAPACITY), None);
    }

    #[test]
    fn debug_output_names_fields() {
        let mut t = HashTable::new(1, SumHash).unwrap();
        t.put("a", 1);
        let s = format!("{:?}", t);
        assert!(s.starts_with("HashTable { capacity: 1, size: 1"));
        assert!(s.contains(r#"[("a", 1)]"#));
    }
}
