//! bytecache: byte-bounded in-memory key/value stores with FIFO and LFU
//! eviction.
//!
//! Every store tracks the total size of its values and, when an insert
//! pushes that total past a configured budget, evicts one entry chosen by
//! its policy. An optional listener observes every entry that leaves.
//!
//! ```
//! use bytecache::prelude::*;
//!
//! let mut store = StoreBuilder::new(16).build(Policy::Fifo);
//! store.set("greeting", "hello".to_string());
//! store.set("farewell", "goodbye".to_string());
//! store.set("filler", "xxxxxx".to_string()); // 18 > 16: "greeting" goes
//!
//! assert!(!store.contains(&"greeting"));
//! assert_eq!(store.used_bytes(), 13);
//! ```

pub mod builder;
pub mod config;
pub mod ds;
pub mod error;
pub mod listener;
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod size;
pub mod traits;

pub use crate::builder::{Policy, Store, StoreBuilder};
pub use crate::ds::{IndexedHeap, IntrusiveList, SlotArena, SlotId};
pub use crate::traits::CacheStore;
