//! Per-store operation counters.
//!
//! Stores are single-threaded, so the counters are plain `u64`s updated
//! through `&mut self`; reads through `get` count a hit or a miss.
//! [`StoreMetrics`] is the copyable snapshot handed to callers.

/// Snapshot of store-level metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    /// `get` calls that found the key.
    pub hits: u64,
    /// `get` calls that did not.
    pub misses: u64,
    /// `set` calls that created an entry.
    pub inserts: u64,
    /// `set` calls that replaced a value in place.
    pub updates: u64,
    /// Entries removed by `del` or `del_oldest`.
    pub removes: u64,
    /// Entries removed by `set` to get back under `max_bytes`.
    pub evictions: u64,
}

impl StoreMetrics {
    /// Fraction of `get` calls that hit, or `0.0` before the first read.
    pub fn hit_ratio(&self) -> f64 {
        let reads = self.hits + self.misses;
        if reads == 0 {
            0.0
        } else {
            self.hits as f64 / reads as f64
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct StoreCounters {
    metrics: StoreMetrics,
}

impl StoreCounters {
    pub(crate) fn snapshot(&self) -> StoreMetrics {
        self.metrics
    }

    pub(crate) fn inc_hit(&mut self) {
        self.metrics.hits += 1;
    }

    pub(crate) fn inc_miss(&mut self) {
        self.metrics.misses += 1;
    }

    pub(crate) fn inc_insert(&mut self) {
        self.metrics.inserts += 1;
    }

    pub(crate) fn inc_update(&mut self) {
        self.metrics.updates += 1;
    }

    pub(crate) fn inc_remove(&mut self) {
        self.metrics.removes += 1;
    }

    pub(crate) fn inc_eviction(&mut self) {
        self.metrics.evictions += 1;
    }
}
