//! # FIFO Store
//!
//! Byte-bounded store that evicts the entry least recently inserted **or
//! updated**. An update re-arms the entry as the newest, so FIFO here means
//! "first written, first out".
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                         FifoStore<K, V, S>                           │
//!   │                                                                      │
//!   │   index: FxHashMap<K, SlotId>        order: IntrusiveList<Entry>     │
//!   │   ┌──────┬────────┐                                                  │
//!   │   │ "a"  │ id_0   │──────────► head ─► [a|10B] ◄─► [b|10B] ◄─► [c|15B] ◄─ tail
//!   │   │ "b"  │ id_1   │                     oldest                 newest│
//!   │   │ "c"  │ id_2   │                                                  │
//!   │   └──────┴────────┘                                                  │
//!   │                                                                      │
//!   │   used_bytes = 35      max_bytes = 30      sizer: S                  │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation    | Effect on order                       | Complexity |
//! |--------------|---------------------------------------|------------|
//! | `set` (new)  | push back, maybe evict one from front | O(1)       |
//! | `set` (upd.) | move to back, no capacity check       | O(1)       |
//! | `get`        | none                                  | O(1)       |
//! | `del`        | unlink                                | O(1)       |
//! | `del_oldest` | pop front                             | O(1)       |
//!
//! ## Example Usage
//!
//! ```
//! use bytecache::config::StoreConfig;
//! use bytecache::policy::fifo::FifoStore;
//! use bytecache::traits::CacheStore;
//!
//! let mut store = FifoStore::new(StoreConfig::new(30));
//! store.set("a", vec![0u8; 10]);
//! store.set("b", vec![0u8; 10]);
//! store.set("c", vec![0u8; 15]); // 35 > 30: "a" goes
//!
//! assert!(!store.contains(&"a"));
//! assert_eq!(store.used_bytes(), 25);
//! assert_eq!(store.len(), 2);
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe. Wrap in external synchronization for shared use.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::config::StoreConfig;
use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;
use crate::listener::BoxedListener;
use crate::metrics::{StoreCounters, StoreMetrics};
use crate::size::{ByteSize, ByteSizer, Sizer};
use crate::traits::CacheStore;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    size: usize,
}

/// FIFO eviction over a byte budget.
///
/// # Type Parameters
///
/// - `K`: key type, `Eq + Hash + Clone` (held by both index and entry)
/// - `V`: value type
/// - `S`: [`Sizer`] used for byte accounting, [`ByteSizer`] by default
pub struct FifoStore<K, V, S = ByteSizer> {
    index: FxHashMap<K, SlotId>,
    order: IntrusiveList<Entry<K, V>>,
    sizer: S,
    max_bytes: usize,
    used_bytes: usize,
    listener: Option<BoxedListener<K, V>>,
    metrics: StoreCounters,
}

impl<K, V> FifoStore<K, V, ByteSizer>
where
    K: Eq + Hash + Clone,
    V: ByteSize,
{
    /// Creates a store that sizes values through [`ByteSize`].
    ///
    /// ```
    /// use bytecache::config::StoreConfig;
    /// use bytecache::policy::fifo::FifoStore;
    /// use bytecache::traits::CacheStore;
    ///
    /// let store: FifoStore<u64, String> = FifoStore::new(StoreConfig::new(1024));
    /// assert!(store.is_empty());
    /// assert_eq!(store.max_bytes(), 1024);
    /// ```
    pub fn new(config: StoreConfig<K, V>) -> Self {
        Self::with_sizer(config, ByteSizer)
    }
}

impl<K, V, S> FifoStore<K, V, S>
where
    K: Eq + Hash + Clone,
    S: Sizer<V>,
{
    /// Creates a store with a custom sizer.
    pub fn with_sizer(config: StoreConfig<K, V>, sizer: S) -> Self {
        Self {
            index: FxHashMap::default(),
            order: IntrusiveList::new(),
            sizer,
            max_bytes: config.max_bytes,
            used_bytes: 0,
            listener: config.listener,
            metrics: StoreCounters::default(),
        }
    }

    /// Returns the entry `del_oldest` would remove, without removing it.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.order.front().map(|entry| (&entry.key, &entry.value))
    }

    /// Iterates entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Checks that the index and the list hold the same keys and that
    /// `used_bytes` is the sum of the stored value sizes.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but order holds {} entries",
                self.index.len(),
                self.order.len()
            )));
        }

        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => return Err(InvariantError::new("index handle points at another key")),
                None => return Err(InvariantError::new("index handle is not in the order list")),
            }
        }

        let mut total = 0usize;
        for entry in self.order.iter() {
            if entry.size != self.sizer.size_of(&entry.value) {
                return Err(InvariantError::new("cached entry size is stale"));
            }
            total += entry.size;
        }
        if total != self.used_bytes {
            return Err(InvariantError::new(format!(
                "used_bytes is {} but entries sum to {total}",
                self.used_bytes
            )));
        }
        Ok(())
    }

    /// Unlinks the front entry and settles accounting before the listener
    /// runs.
    fn pop_front_entry(&mut self) -> Option<Entry<K, V>> {
        let entry = self.order.pop_front()?;
        self.index.remove(&entry.key);
        self.used_bytes -= entry.size;
        self.notify(&entry);
        Some(entry)
    }

    fn notify(&mut self, entry: &Entry<K, V>) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_evict(&entry.key, &entry.value);
        }
    }

    fn replace(&mut self, id: SlotId, value: V, size: usize) -> Option<V> {
        let entry = self.order.get_mut(id)?;
        let old_size = std::mem::replace(&mut entry.size, size);
        let previous = std::mem::replace(&mut entry.value, value);
        self.used_bytes = self.used_bytes - old_size + size;
        self.order.move_to_back(id);
        self.metrics.inc_update();
        trace!(old_size, new_size = size, used_bytes = self.used_bytes, "fifo update");
        Some(previous)
    }
}

impl<K, V, S> CacheStore<K, V> for FifoStore<K, V, S>
where
    K: Eq + Hash + Clone,
    S: Sizer<V>,
{
    fn set(&mut self, key: K, value: V) -> Option<V> {
        let size = self.sizer.size_of(&value);
        if let Some(&id) = self.index.get(&key) {
            return self.replace(id, value, size);
        }

        let id = self.order.push_back(Entry {
            key: key.clone(),
            value,
            size,
        });
        self.index.insert(key, id);
        self.used_bytes += size;
        self.metrics.inc_insert();
        trace!(size, used_bytes = self.used_bytes, "fifo insert");

        if self.max_bytes > 0
            && self.used_bytes > self.max_bytes
            && let Some(evicted) = self.pop_front_entry()
        {
            self.metrics.inc_eviction();
            debug!(
                evicted_bytes = evicted.size,
                used_bytes = self.used_bytes,
                max_bytes = self.max_bytes,
                "fifo capacity eviction"
            );
        }
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key) {
            Some(&id) => {
                self.metrics.inc_hit();
                self.order.get(id).map(|entry| &entry.value)
            },
            None => {
                self.metrics.inc_miss();
                None
            },
        }
    }

    fn del(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.order.remove(id)?;
        self.used_bytes -= entry.size;
        self.notify(&entry);
        self.metrics.inc_remove();
        trace!(size = entry.size, used_bytes = self.used_bytes, "fifo del");
        Some(entry.value)
    }

    fn del_oldest(&mut self) -> Option<(K, V)> {
        let entry = self.pop_front_entry()?;
        self.metrics.inc_remove();
        trace!(size = entry.size, used_bytes = self.used_bytes, "fifo del_oldest");
        Some((entry.key, entry.value))
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    fn metrics(&self) -> StoreMetrics {
        self.metrics.snapshot()
    }
}

impl<K, V, S> fmt::Debug for FifoStore<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoStore")
            .field("len", &self.order.len())
            .field("used_bytes", &self.used_bytes)
            .field("max_bytes", &self.max_bytes)
            .field("on_evicted", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}
