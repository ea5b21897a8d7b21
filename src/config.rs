//! Construction-time store configuration.
//!
//! | Field        | Type                       | Default | Description                         |
//! |--------------|----------------------------|---------|-------------------------------------|
//! | `max_bytes`  | `usize`                    | `0`     | Byte budget for values; `0` = none  |
//! | `on_evicted` | `Option<BoxedListener>`    | `None`  | Called for every removed entry      |
//!
//! The configuration is not validated: every `usize` is a valid budget.

use std::fmt;

use crate::listener::{BoxedListener, EvictionListener};

/// Options shared by every policy.
///
/// # Example
///
/// ```
/// use bytecache::config::StoreConfig;
///
/// let config: StoreConfig<String, Vec<u8>> = StoreConfig::new(1 << 20)
///     .on_evicted(|key: &String, _value: &Vec<u8>| println!("evicted {key}"));
/// assert_eq!(config.max_bytes(), 1 << 20);
/// assert!(config.has_listener());
/// ```
pub struct StoreConfig<K, V> {
    pub(crate) max_bytes: usize,
    pub(crate) listener: Option<BoxedListener<K, V>>,
}

impl<K, V> StoreConfig<K, V> {
    /// Bounds the total size of stored values to `max_bytes`; `0` disables
    /// the bound.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            listener: None,
        }
    }

    /// A configuration without a byte budget.
    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Registers an eviction callback closure.
    pub fn on_evicted<F>(self, f: F) -> Self
    where
        F: FnMut(&K, &V) + 'static,
    {
        self.with_listener(f)
    }

    /// Registers an eviction callback via the [`EvictionListener`] trait.
    pub fn with_listener<L>(mut self, listener: L) -> Self
    where
        L: EvictionListener<K, V> + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }
}

impl<K, V> Default for StoreConfig<K, V> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<K, V> fmt::Debug for StoreConfig<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("max_bytes", &self.max_bytes)
            .field("on_evicted", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_without_listener() {
        let config: StoreConfig<u32, u32> = StoreConfig::default();
        assert_eq!(config.max_bytes(), 0);
        assert!(!config.has_listener());
    }

    #[test]
    fn on_evicted_installs_listener() {
        let config: StoreConfig<u32, u32> = StoreConfig::new(10).on_evicted(|_: &u32, _: &u32| {});
        assert_eq!(config.max_bytes(), 10);
        assert!(config.has_listener());
    }

    #[test]
    fn debug_hides_callback() {
        let config: StoreConfig<u32, u32> = StoreConfig::new(3).on_evicted(|_: &u32, _: &u32| {});
        let dbg = format!("{:?}", config);
        assert!(dbg.contains("max_bytes: 3"));
        assert!(dbg.contains("on_evicted: true"));
    }
}
