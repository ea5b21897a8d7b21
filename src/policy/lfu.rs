//! # LFU Store
//!
//! Byte-bounded store that evicts the entry with the smallest **weight**.
//! Entries sit in an [`IndexedHeap`] keyed on `(weight, insertion sequence)`,
//! so among equal weights the earliest-inserted entry goes first.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────────────┐
//!   │                          LfuStore<K, V, S>                            │
//!   │                                                                       │
//!   │   index: FxHashMap<K, SlotId>       heap: IndexedHeap<Entry, Rank>    │
//!   │   ┌──────┬───────┐                                                    │
//!   │   │ "a"  │ id_0  │──────►            (a: w=0, seq=0)    ◄── peek/pop  │
//!   │   │ "b"  │ id_1  │                   /             \                  │
//!   │   │ "c"  │ id_2  │       (b: w=0, seq=1)    (c: w=2, seq=2)           │
//!   │   └──────┴───────┘                                                    │
//!   │                                                                       │
//!   │   next_seq = 3    weighting = Fixed | CountAccesses                   │
//!   └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Weighting
//!
//! | Mode            | `get` / update of an existing key                    |
//! |-----------------|------------------------------------------------------|
//! | `Fixed`         | re-fixes the heap at the current weight (no change)  |
//! | `CountAccesses` | weight += 1 (saturating), then re-fixes the heap     |
//!
//! With `Fixed` every entry keeps the weight it was inserted with (`0`), so
//! eviction order degenerates to insertion order unless the caller assigns
//! weights through [`LfuStore::set_weight`]. `CountAccesses` turns the store
//! into a frequency-counting LFU.
//!
//! ## Example Usage
//!
//! ```
//! use bytecache::config::StoreConfig;
//! use bytecache::policy::lfu::{LfuStore, Weighting};
//! use bytecache::traits::CacheStore;
//!
//! let mut store = LfuStore::new(StoreConfig::new(3))
//!     .with_weighting(Weighting::CountAccesses);
//! store.set("a", 1u8);
//! store.set("b", 2u8);
//! store.get(&"a");
//! store.get(&"a");
//!
//! store.set("c", 3u8);
//! store.set("d", 4u8); // 4 > 3: lightest entry ("b") goes
//!
//! assert!(store.contains(&"a"));
//! assert!(!store.contains(&"b"));
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::config::StoreConfig;
use crate::ds::{IndexedHeap, SlotId};
use crate::error::InvariantError;
use crate::listener::BoxedListener;
use crate::metrics::{StoreCounters, StoreMetrics};
use crate::size::{ByteSize, ByteSizer, Sizer};
use crate::traits::CacheStore;

/// Weight given to a newly inserted entry.
pub const INITIAL_WEIGHT: u64 = 0;

/// How reads and updates change an entry's weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Weighting {
    /// Weights never change on access.
    #[default]
    Fixed,
    /// Each `get` hit and each update adds one to the weight.
    CountAccesses,
}

/// Heap priority: lighter first, then older first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Rank {
    weight: u64,
    seq: u64,
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    size: usize,
}

/// LFU eviction over a byte budget.
pub struct LfuStore<K, V, S = ByteSizer> {
    index: FxHashMap<K, SlotId>,
    heap: IndexedHeap<Entry<K, V>, Rank>,
    sizer: S,
    weighting: Weighting,
    next_seq: u64,
    max_bytes: usize,
    used_bytes: usize,
    listener: Option<BoxedListener<K, V>>,
    metrics: StoreCounters,
}

impl<K, V> LfuStore<K, V, ByteSizer>
where
    K: Eq + Hash + Clone,
    V: ByteSize,
{
    /// Creates a store that sizes values through [`ByteSize`], with
    /// [`Weighting::Fixed`].
    pub fn new(config: StoreConfig<K, V>) -> Self {
        Self::with_sizer(config, ByteSizer)
    }
}

impl<K, V, S> LfuStore<K, V, S>
where
    K: Eq + Hash + Clone,
    S: Sizer<V>,
{
    /// Creates a store with a custom sizer.
    pub fn with_sizer(config: StoreConfig<K, V>, sizer: S) -> Self {
        Self {
            index: FxHashMap::default(),
            heap: IndexedHeap::new(),
            sizer,
            weighting: Weighting::default(),
            next_seq: 0,
            max_bytes: config.max_bytes,
            used_bytes: 0,
            listener: config.listener,
            metrics: StoreCounters::default(),
        }
    }

    /// Sets the weighting mode. Existing weights are kept.
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Current weight of `key`, without touching it.
    pub fn weight(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.heap.priority(id).map(|rank| rank.weight)
    }

    /// Assigns an explicit weight to `key` and repositions it.
    ///
    /// Returns `false` if the key is absent.
    ///
    /// ```
    /// use bytecache::config::StoreConfig;
    /// use bytecache::policy::lfu::LfuStore;
    /// use bytecache::traits::CacheStore;
    ///
    /// let mut store = LfuStore::new(StoreConfig::unbounded());
    /// store.set("pinned", 1u32);
    /// store.set("plain", 2u32);
    /// assert!(store.set_weight(&"pinned", 100));
    ///
    /// assert_eq!(store.del_oldest(), Some(("plain", 2)));
    /// ```
    pub fn set_weight(&mut self, key: &K, weight: u64) -> bool {
        match self.index.get(key) {
            Some(&id) => self.heap.update_priority(id, |rank| rank.weight = weight),
            None => false,
        }
    }

    /// Returns the entry `del_oldest` would remove, without removing it.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.heap
            .peek()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }

    /// Keys from next-to-evict to last-to-evict. O(n log n).
    pub fn eviction_order(&self) -> Vec<&K> {
        let mut ranked: Vec<(Rank, &K)> = self
            .heap
            .iter()
            .filter_map(|(id, entry)| self.heap.priority(id).map(|rank| (*rank, &entry.key)))
            .collect();
        ranked.sort_unstable_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, key)| key).collect()
    }

    /// Checks heap order, index/heap agreement and byte accounting.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.heap.check_invariants()?;

        if self.index.len() != self.heap.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but heap holds {} entries",
                self.index.len(),
                self.heap.len()
            )));
        }

        for (key, &id) in &self.index {
            match (self.heap.get(id), self.heap.priority(id)) {
                (Some(entry), Some(rank)) if entry.key == *key => {
                    if rank.seq >= self.next_seq {
                        return Err(InvariantError::new("entry sequence is ahead of the counter"));
                    }
                },
                (Some(_), _) => return Err(InvariantError::new("index handle points at another key")),
                _ => return Err(InvariantError::new("index handle is not in the heap")),
            }
        }

        let mut total = 0usize;
        for (_, entry) in self.heap.iter() {
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

    /// Repositions `id` after a read or an update.
    fn touch(&mut self, id: SlotId) {
        match self.weighting {
            Weighting::Fixed => {
                self.heap.fix(id);
            },
            Weighting::CountAccesses => {
                self.heap
                    .update_priority(id, |rank| rank.weight = rank.weight.saturating_add(1));
            },
        }
    }

    /// Settles accounting for an entry already taken out of the heap, then
    /// runs the listener.
    fn finish_removal(&mut self, entry: &Entry<K, V>) {
        self.index.remove(&entry.key);
        self.used_bytes -= entry.size;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_evict(&entry.key, &entry.value);
        }
    }

    fn pop_lightest(&mut self) -> Option<(Entry<K, V>, Rank)> {
        let (entry, rank) = self.heap.pop()?;
        self.finish_removal(&entry);
        Some((entry, rank))
    }

    fn replace(&mut self, id: SlotId, value: V, size: usize) -> Option<V> {
        let entry = self.heap.get_mut(id)?;
        let old_size = std::mem::replace(&mut entry.size, size);
        let previous = std::mem::replace(&mut entry.value, value);
        self.used_bytes = self.used_bytes - old_size + size;
        self.touch(id);
        self.metrics.inc_update();
        trace!(old_size, new_size = size, used_bytes = self.used_bytes, "lfu update");
        Some(previous)
    }
}

impl<K, V, S> CacheStore<K, V> for LfuStore<K, V, S>
where
    K: Eq + Hash + Clone,
    S: Sizer<V>,
{
    fn set(&mut self, key: K, value: V) -> Option<V> {
        let size = self.sizer.size_of(&value);
        if let Some(&id) = self.index.get(&key) {
            return self.replace(id, value, size);
        }

        let rank = Rank {
            weight: INITIAL_WEIGHT,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let id = self.heap.push(
            Entry {
                key: key.clone(),
                value,
                size,
            },
            rank,
        );
        self.index.insert(key, id);
        self.used_bytes += size;
        self.metrics.inc_insert();
        trace!(size, used_bytes = self.used_bytes, "lfu insert");

        if self.max_bytes > 0
            && self.used_bytes > self.max_bytes
            && let Some((evicted, rank)) = self.pop_lightest()
        {
            self.metrics.inc_eviction();
            debug!(
                evicted_bytes = evicted.size,
                weight = rank.weight,
                used_bytes = self.used_bytes,
                max_bytes = self.max_bytes,
                "lfu capacity eviction"
            );
        }
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            self.metrics.inc_miss();
            return None;
        };
        self.metrics.inc_hit();
        self.touch(id);
        self.heap.get(id).map(|entry| &entry.value)
    }

    fn del(&mut self, key: &K) -> Option<V> {
        let id = *self.index.get(key)?;
        let (entry, _) = self.heap.remove(id)?;
        self.finish_removal(&entry);
        self.metrics.inc_remove();
        trace!(size = entry.size, used_bytes = self.used_bytes, "lfu del");
        Some(entry.value)
    }

    fn del_oldest(&mut self) -> Option<(K, V)> {
        let (entry, _) = self.pop_lightest()?;
        self.metrics.inc_remove();
        trace!(size = entry.size, used_bytes = self.used_bytes, "lfu del_oldest");
        Some((entry.key, entry.value))
    }

    fn len(&self) -> usize {
        self.heap.len()
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

impl<K, V, S> fmt::Debug for LfuStore<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuStore")
            .field("len", &self.heap.len())
            .field("used_bytes", &self.used_bytes)
            .field("max_bytes", &self.max_bytes)
            .field("weighting", &self.weighting)
            .field("on_evicted", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}
