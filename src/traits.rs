//! # Store Contract
//!
//! [`CacheStore`] is the one interface every eviction policy implements, so
//! higher layers can hold a FIFO or an LFU store behind the same calls.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │              CacheStore<K, V>                │
//!                    │                                              │
//!                    │  set(&mut, K, V) → Option<V>                 │
//!                    │  get(&mut, &K) → Option<&V>                  │
//!                    │  del(&mut, &K) → Option<V>                   │
//!                    │  del_oldest(&mut) → Option<(K, V)>           │
//!                    │  len(&) → usize                              │
//!                    │  contains / used_bytes / max_bytes / metrics │
//!                    └──────────────────────┬───────────────────────┘
//!                                           │
//!              ┌────────────────────────────┼────────────────────────────┐
//!              ▼                            ▼                            ▼
//!   ┌──────────────────────┐   ┌──────────────────────┐   ┌──────────────────────┐
//!   │ FifoStore<K, V, S>   │   │ LfuStore<K, V, S>    │   │ Store<K, V, S>       │
//!   │ IntrusiveList order  │   │ IndexedHeap order    │   │ enum over both,      │
//!   │                      │   │                      │   │ built by StoreBuilder│
//!   └──────────────────────┘   └──────────────────────┘   └──────────────────────┘
//! ```
//!
//! ## Set semantics
//!
//! ```text
//!   set(key, value)
//!     key present?  ── yes ──► replace value, used_bytes += new - old,
//!          │                   reposition per policy, return Some(old)
//!          │                   (no capacity check on this path)
//!          no
//!          ▼
//!     push entry at newest position, used_bytes += size
//!          │
//!     max_bytes > 0 && used_bytes > max_bytes ?
//!          │ yes
//!          ▼
//!     evict exactly one oldest entry (listener fires), return None
//! ```
//!
//! One eviction per insert means `used_bytes` can stay above `max_bytes`
//! when the new value is larger than the evicted one. Growing a value via
//! the update path never evicts; the next insert pays for it.
//!
//! ## Thread Safety
//!
//! Stores are not synchronized. Mutation takes `&mut self`; wrap a store in
//! a lock to share it.

/// Operations shared by every eviction policy.
///
/// # Example
///
/// ```
/// use bytecache::builder::{Policy, StoreBuilder};
/// use bytecache::traits::CacheStore;
///
/// fn warm<S: CacheStore<u64, String>>(store: &mut S, data: &[(u64, &str)]) {
///     for (key, value) in data {
///         store.set(*key, value.to_string());
///     }
/// }
///
/// let mut fifo = StoreBuilder::new(0).build(Policy::Fifo);
/// let mut lfu = StoreBuilder::new(0).build(Policy::lfu());
/// warm(&mut fifo, &[(1, "one"), (2, "two")]);
/// warm(&mut lfu, &[(1, "one"), (2, "two")]);
/// assert_eq!(fifo.len(), lfu.len());
/// assert_eq!(fifo.used_bytes(), 6);
/// ```
pub trait CacheStore<K, V> {
    /// Inserts or updates `key`, returning the replaced value on update.
    ///
    /// A new key is placed at the policy's newest position; if that takes
    /// `used_bytes` over a non-zero `max_bytes`, exactly one oldest entry is
    /// evicted before returning. Updating an existing key never evicts.
    fn set(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key`.
    ///
    /// LFU stores touch the entry's heap position; FIFO reads have no side
    /// effect on ordering. Use [`contains`](Self::contains) to test presence
    /// without touching.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes `key`, firing the eviction listener. No-op if absent.
    fn del(&mut self, key: &K) -> Option<V>;

    /// Removes the oldest entry by policy order, firing the eviction
    /// listener. No-op on an empty store.
    fn del_oldest(&mut self) -> Option<(K, V)>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Presence test with no effect on ordering.
    fn contains(&self, key: &K) -> bool;

    /// Sum of stored value sizes; keys are not counted.
    fn used_bytes(&self) -> usize;

    /// Configured byte budget; `0` means unbounded.
    fn max_bytes(&self) -> usize;

    /// Snapshot of the store's counters.
    fn metrics(&self) -> crate::metrics::StoreMetrics;

    /// Sentinel-style read: an absent key and a key holding the empty value
    /// (`V::default()`) are indistinguishable.
    ///
    /// ```
    /// use bytecache::builder::{Policy, StoreBuilder};
    /// use bytecache::traits::CacheStore;
    ///
    /// let mut store = StoreBuilder::new(0).build(Policy::Fifo);
    /// store.set("empty", None::<String>);
    ///
    /// assert_eq!(store.get_or_empty(&"empty"), store.get_or_empty(&"missing"));
    /// assert!(store.get(&"empty").is_some());
    /// assert!(store.get(&"missing").is_none());
    /// ```
    fn get_or_empty(&mut self, key: &K) -> V
    where
        V: Default + Clone,
    {
        self.get(key).cloned().unwrap_or_default()
    }
}
