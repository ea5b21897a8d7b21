//! Unified store builder for both eviction policies.
//!
//! Callers pick a [`Policy`] at construction time and get back a [`Store`]
//! that implements [`CacheStore`], so switching FIFO for LFU changes one
//! argument and nothing else.
//!
//! ## Example
//!
//! ```rust
//! use bytecache::builder::{Policy, StoreBuilder};
//! use bytecache::traits::CacheStore;
//!
//! let mut store = StoreBuilder::<u64, String>::new(1024).build(Policy::Fifo);
//! store.set(1, "hello".to_string());
//! assert_eq!(store.get(&1), Some(&"hello".to_string()));
//! assert_eq!(store.used_bytes(), 5);
//! ```

use std::hash::Hash;

use crate::config::StoreConfig;
use crate::error::InvariantError;
use crate::listener::EvictionListener;
use crate::metrics::StoreMetrics;
use crate::policy::fifo::FifoStore;
use crate::policy::lfu::{LfuStore, Weighting};
use crate::size::{ByteSize, ByteSizer, Sizer};
use crate::traits::CacheStore;

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First in, first out; updates count as arrivals.
    Fifo,
    /// Lowest weight first, ties by insertion order.
    Lfu(Weighting),
}

impl Policy {
    /// LFU with [`Weighting::Fixed`].
    pub fn lfu() -> Self {
        Policy::Lfu(Weighting::Fixed)
    }
}

/// Policy-agnostic store produced by [`StoreBuilder`].
pub struct Store<K, V, S = ByteSizer> {
    inner: StoreInner<K, V, S>,
}

enum StoreInner<K, V, S> {
    Fifo(FifoStore<K, V, S>),
    Lfu(LfuStore<K, V, S>),
}

impl<K, V, S> Store<K, V, S>
where
    K: Eq + Hash + Clone,
    S: Sizer<V>,
{
    /// The policy this store was built with.
    pub fn policy(&self) -> Policy {
        match &self.inner {
            StoreInner::Fifo(_) => Policy::Fifo,
            StoreInner::Lfu(lfu) => Policy::Lfu(lfu.weighting()),
        }
    }

    /// Returns the entry `del_oldest` would remove.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        match &self.inner {
            StoreInner::Fifo(fifo) => fifo.peek_oldest(),
            StoreInner::Lfu(lfu) => lfu.peek_oldest(),
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match &self.inner {
            StoreInner::Fifo(fifo) => fifo.check_invariants(),
            StoreInner::Lfu(lfu) => lfu.check_invariants(),
        }
    }
}

impl<K, V, S> CacheStore<K, V> for Store<K, V, S>
where
    K: Eq + Hash + Clone,
    S: Sizer<V>,
{
    fn set(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            StoreInner::Fifo(fifo) => fifo.set(key, value),
            StoreInner::Lfu(lfu) => lfu.set(key, value),
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            StoreInner::Fifo(fifo) => fifo.get(key),
            StoreInner::Lfu(lfu) => lfu.get(key),
        }
    }

    fn del(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            StoreInner::Fifo(fifo) => fifo.del(key),
            StoreInner::Lfu(lfu) => lfu.del(key),
        }
    }

    fn del_oldest(&mut self) -> Option<(K, V)> {
        match &mut self.inner {
            StoreInner::Fifo(fifo) => fifo.del_oldest(),
            StoreInner::Lfu(lfu) => lfu.del_oldest(),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            StoreInner::Fifo(fifo) => fifo.len(),
            StoreInner::Lfu(lfu) => lfu.len(),
        }
    }

    fn contains(&self, key: &K) -> bool {
        match &self.inner {
            StoreInner::Fifo(fifo) => fifo.contains(key),
            StoreInner::Lfu(lfu) => lfu.contains(key),
        }
    }

    fn used_bytes(&self) -> usize {
        match &self.inner {
            StoreInner::Fifo(fifo) => fifo.used_bytes(),
            StoreInner::Lfu(lfu) => lfu.used_bytes(),
        }
    }

    fn max_bytes(&self) -> usize {
        match &self.inner {
            StoreInner::Fifo(fifo) => fifo.max_bytes(),
            StoreInner::Lfu(lfu) => lfu.max_bytes(),
        }
    }

    fn metrics(&self) -> StoreMetrics {
        match &self.inner {
            StoreInner::Fifo(fifo) => fifo.metrics(),
            StoreInner::Lfu(lfu) => lfu.metrics(),
        }
    }
}

impl<K, V, S> std::fmt::Debug for Store<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            StoreInner::Fifo(fifo) => std::fmt::Debug::fmt(fifo, f),
            StoreInner::Lfu(lfu) => std::fmt::Debug::fmt(lfu, f),
        }
    }
}

/// Builder for [`Store`] instances.
pub struct StoreBuilder<K, V> {
    config: StoreConfig<K, V>,
}

impl<K, V> StoreBuilder<K, V> {
    /// Create a builder with the given byte budget; `0` means unbounded.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            config: StoreConfig::new(max_bytes),
        }
    }

    /// Register a closure called for every removed entry.
    pub fn on_evicted<F>(mut self, f: F) -> Self
    where
        F: FnMut(&K, &V) + 'static,
    {
        self.config = self.config.on_evicted(f);
        self
    }

    /// Register an [`EvictionListener`] implementation.
    pub fn listener<L>(mut self, listener: L) -> Self
    where
        L: EvictionListener<K, V> + 'static,
    {
        self.config = self.config.with_listener(listener);
        self
    }

    /// Build a store that sizes values through [`ByteSize`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use bytecache::builder::{Policy, StoreBuilder};
    /// use bytecache::policy::lfu::Weighting;
    ///
    /// let fifo = StoreBuilder::<u64, Vec<u8>>::new(4096).build(Policy::Fifo);
    /// let lfu = StoreBuilder::<u64, Vec<u8>>::new(4096).build(Policy::lfu());
    /// let counting =
    ///     StoreBuilder::<u64, Vec<u8>>::new(4096).build(Policy::Lfu(Weighting::CountAccesses));
    ///
    /// assert_eq!(fifo.policy(), Policy::Fifo);
    /// assert_eq!(lfu.policy(), Policy::Lfu(Weighting::Fixed));
    /// assert_eq!(counting.policy(), Policy::Lfu(Weighting::CountAccesses));
    /// ```
    pub fn build(self, policy: Policy) -> Store<K, V>
    where
        K: Eq + Hash + Clone,
        V: ByteSize,
    {
        self.build_with_sizer(policy, ByteSizer)
    }

    /// Build a store that sizes values with `sizer`.
    ///
    /// ```rust
    /// use bytecache::builder::{Policy, StoreBuilder};
    /// use bytecache::traits::CacheStore;
    ///
    /// // Count entries instead of bytes: every value weighs 1.
    /// let mut store = StoreBuilder::new(2).build_with_sizer(Policy::Fifo, |_: &u32| 1usize);
    /// store.set("a", 10);
    /// store.set("b", 20);
    /// store.set("c", 30);
    /// assert_eq!(store.len(), 2);
    /// assert!(!store.contains(&"a"));
    /// ```
    pub fn build_with_sizer<S>(self, policy: Policy, sizer: S) -> Store<K, V, S>
    where
        K: Eq + Hash + Clone,
        S: Sizer<V>,
    {
        let inner = match policy {
            Policy::Fifo => StoreInner::Fifo(FifoStore::with_sizer(self.config, sizer)),
            Policy::Lfu(weighting) => {
                StoreInner::Lfu(LfuStore::with_sizer(self.config, sizer).with_weighting(weighting))
            },
        };

        Store { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const POLICIES: [Policy; 3] = [
        Policy::Fifo,
        Policy::Lfu(Weighting::Fixed),
        Policy::Lfu(Weighting::CountAccesses),
    ];

    #[test]
    fn test_all_policies_basic_ops() {
        for policy in POLICIES {
            let mut store = StoreBuilder::<u64, String>::new(100).build(policy);
            assert_eq!(store.policy(), policy);

            // Set
            assert_eq!(store.set(1, "one".to_string()), None);
            assert_eq!(store.set(2, "two".to_string()), None);

            // Get
            assert_eq!(store.get(&1), Some(&"one".to_string()));
            assert_eq!(store.get(&2), Some(&"two".to_string()));
            assert_eq!(store.get(&3), None);

            // Contains
            assert!(store.contains(&1));
            assert!(!store.contains(&99));

            // Len and bytes
            assert_eq!(store.len(), 2);
            assert!(!store.is_empty());
            assert_eq!(store.used_bytes(), 6);
            assert_eq!(store.max_bytes(), 100);

            // Update
            assert_eq!(store.set(1, "ONE!".to_string()), Some("one".to_string()));
            assert_eq!(store.get(&1), Some(&"ONE!".to_string()));
            assert_eq!(store.used_bytes(), 7);

            // Delete
            assert_eq!(store.del(&2), Some("two".to_string()));
            assert_eq!(store.del_oldest(), Some((1, "ONE!".to_string())));
            assert!(store.is_empty());
            assert_eq!(store.used_bytes(), 0);
            store.check_invariants().unwrap();
        }
    }

    #[test]
    fn test_capacity_enforcement() {
        for policy in POLICIES {
            let mut store = StoreBuilder::<&str, Vec<u8>>::new(30).build(policy);
            store.set("a", vec![0; 10]);
            store.set("b", vec![0; 10]);
            store.set("c", vec![0; 15]);

            assert_eq!(store.len(), 2, "{policy:?}");
            assert!(!store.contains(&"a"), "{policy:?}");
            assert!(store.contains(&"b"));
            assert!(store.contains(&"c"));
            assert_eq!(store.used_bytes(), 25);
        }
    }

    #[test]
    fn test_listener_is_wired_for_every_policy() {
        for policy in POLICIES {
            let fired = Rc::new(Cell::new(0));
            let counter = Rc::clone(&fired);
            let mut store = StoreBuilder::new(4)
                .on_evicted(move |_: &u8, _: &u16| counter.set(counter.get() + 1))
                .build(policy);
            store.set(1u8, 1u16);
            store.set(2, 2);
            store.set(3, 3); // capacity eviction
            store.del(&3);
            store.del_oldest();
            assert_eq!(fired.get(), 3, "{policy:?}");
        }
    }

    #[test]
    fn test_peek_oldest_matches_del_oldest() {
        for policy in POLICIES {
            let mut store = StoreBuilder::<u8, u8>::new(0).build(policy);
            for k in 0..5 {
                store.set(k, k);
            }
            let peeked = store.peek_oldest().map(|(k, v)| (*k, *v));
            assert_eq!(peeked, store.del_oldest());
        }
    }

    #[test]
    fn test_debug_delegates_to_policy() {
        let fifo = StoreBuilder::<u8, u8>::new(1).build(Policy::Fifo);
        let lfu = StoreBuilder::<u8, u8>::new(1).build(Policy::lfu());
        assert!(format!("{fifo:?}").starts_with("FifoStore"));
        assert!(format!("{lfu:?}").starts_with("LfuStore"));
    }
}
