//! Eviction listener: a callback invoked whenever an entry leaves a store.
//!
//! The listener fires for every removal path, `del`, `del_oldest`, and the
//! capacity eviction performed by `set`, and never for an in-place value
//! replacement. It runs synchronously after the entry has been unlinked from
//! both the index and the ordering structure and after `used_bytes` has been
//! adjusted, so a listener observing the store would see it without the
//! entry. A panic inside the listener unwinds through the triggering call.
//!
//! # Example
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use bytecache::builder::{Policy, StoreBuilder};
//! use bytecache::traits::CacheStore;
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&log);
//!
//! let mut store = StoreBuilder::new(8)
//!     .on_evicted(move |key: &&'static str, value: &String| {
//!         sink.borrow_mut().push((*key, value.clone()));
//!     })
//!     .build(Policy::Fifo);
//!
//! store.set("a", "1234".to_string());
//! store.set("b", "5678".to_string());
//! store.set("c", "9".to_string()); // over capacity: "a" is evicted
//! store.del(&"b");
//!
//! assert_eq!(
//!     *log.borrow(),
//!     vec![("a", "1234".to_string()), ("b", "5678".to_string())]
//! );
//! ```

/// A callback invoked each time an entry is removed from a store.
///
/// Stores are single-threaded, so listeners need not be `Send` or `Sync`
/// and may hold mutable state.
pub trait EvictionListener<K, V> {
    fn on_evict(&mut self, key: &K, value: &V);
}

impl<K, V, F> EvictionListener<K, V> for F
where
    F: FnMut(&K, &V),
{
    #[inline]
    fn on_evict(&mut self, key: &K, value: &V) {
        self(key, value)
    }
}

/// Boxed listener as held by a store.
pub type BoxedListener<K, V> = Box<dyn EvictionListener<K, V>>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        seen: Vec<u32>,
    }

    impl EvictionListener<u32, String> for Counter {
        fn on_evict(&mut self, key: &u32, _value: &String) {
            self.seen.push(*key);
        }
    }

    #[test]
    fn closures_are_listeners() {
        let mut total = 0usize;
        {
            let mut listener = |_key: &u32, value: &String| total += value.len();
            listener.on_evict(&1, &"abc".to_string());
            listener.on_evict(&2, &"de".to_string());
        }
        assert_eq!(total, 5);
    }

    #[test]
    fn boxed_trait_objects_dispatch() {
        let mut counter = Counter { seen: Vec::new() };
        {
            let listener: &mut dyn EvictionListener<u32, String> = &mut counter;
            listener.on_evict(&7, &String::new());
            listener.on_evict(&9, &String::new());
        }
        assert_eq!(counter.seen, vec![7, 9]);

        let mut boxed: BoxedListener<u32, String> = Box::new(|_: &u32, _: &String| {});
        boxed.on_evict(&1, &String::new());
    }
}
