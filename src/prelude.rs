pub use crate::builder::{Policy, Store, StoreBuilder};
pub use crate::config::StoreConfig;
pub use crate::error::InvariantError;
pub use crate::listener::EvictionListener;
pub use crate::metrics::StoreMetrics;
pub use crate::policy::fifo::FifoStore;
pub use crate::policy::lfu::{LfuStore, Weighting};
pub use crate::size::{ByteSize, ByteSizer, Sizer};
pub use crate::traits::CacheStore;
