//! Error types for the bytecache library.
//!
//! Store operations never fail: a missing key is `None`, deleting a missing
//! key is a no-op. The only error in the crate is [`InvariantError`], returned
//! by the `check_invariants` methods on stores and data structures when the
//! index, ordering structure and byte accounting disagree.
//!
//! ## Example Usage
//!
//! ```
//! use bytecache::config::StoreConfig;
//! use bytecache::error::InvariantError;
//! use bytecache::policy::fifo::FifoStore;
//! use bytecache::traits::CacheStore;
//!
//! let mut store: FifoStore<&str, String> = FifoStore::new(StoreConfig::new(64));
//! store.set("a", "alpha".to_string());
//!
//! let checked: Result<(), InvariantError> = store.check_invariants();
//! assert!(checked.is_ok());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal store invariants are violated.
///
/// Produced by `check_invariants` on
/// [`FifoStore`](crate::policy::fifo::FifoStore),
/// [`LfuStore`](crate::policy::lfu::LfuStore) and
/// [`Store`](crate::builder::Store). Carries a human-readable description of
/// which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("used_bytes mismatch");
        assert_eq!(err.to_string(), "used_bytes mismatch");
    }

    #[test]
    fn invariant_debug_includes_message() {
        let err = InvariantError::new("dangling handle");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("dangling handle"));
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
