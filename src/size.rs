//! Byte accounting for stored values.
//!
//! Stores bound `Σ size(value) ≤ max_bytes`. Keys never count. The size of a
//! value is computed once, when it enters the store, by the store's
//! [`Sizer`]; sizers must be deterministic so that the cached figure always
//! matches what the sizer would report for the same value.
//!
//! Two ways to account for a value:
//!
//! - implement [`ByteSize`] on the value type and use the default
//!   [`ByteSizer`];
//! - pass any `Fn(&V) -> usize` closure as the sizer.
//!
//! # Example
//! ```
//! use bytecache::config::StoreConfig;
//! use bytecache::policy::fifo::FifoStore;
//! use bytecache::size::ByteSize;
//! use bytecache::traits::CacheStore;
//!
//! assert_eq!("hello".byte_size(), 5);
//! assert_eq!(vec![1u32, 2, 3].byte_size(), 12);
//!
//! // Count every value as 100 bytes regardless of content.
//! let mut store = FifoStore::with_sizer(StoreConfig::new(250), |_: &u8| 100usize);
//! store.set("a", 1u8);
//! store.set("b", 2u8);
//! store.set("c", 3u8);
//! assert_eq!(store.used_bytes(), 200);
//! ```

use std::borrow::Cow;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

/// A value that knows its own byte footprint.
pub trait ByteSize {
    fn byte_size(&self) -> usize;
}

/// Strategy a store uses to size the values it holds.
pub trait Sizer<V: ?Sized> {
    fn size_of(&self, value: &V) -> usize;
}

/// Default sizer: delegates to [`ByteSize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteSizer;

impl<V: ByteSize + ?Sized> Sizer<V> for ByteSizer {
    #[inline]
    fn size_of(&self, value: &V) -> usize {
        value.byte_size()
    }
}

impl<V: ?Sized, F> Sizer<V> for F
where
    F: Fn(&V) -> usize,
{
    #[inline]
    fn size_of(&self, value: &V) -> usize {
        self(value)
    }
}

// ---------------------------------------------------------------------------
// Built-in implementations
// ---------------------------------------------------------------------------

macro_rules! fixed_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ByteSize for $ty {
                #[inline]
                fn byte_size(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }
            }
        )*
    };
}

fixed_width!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

impl ByteSize for () {
    #[inline]
    fn byte_size(&self) -> usize {
        0
    }
}

impl ByteSize for str {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for String {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Cow<'_, str> {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl<T: ByteSize> ByteSize for [T] {
    fn byte_size(&self) -> usize {
        self.iter().map(ByteSize::byte_size).sum()
    }
}

impl<T: ByteSize, const N: usize> ByteSize for [T; N] {
    fn byte_size(&self) -> usize {
        self.as_slice().byte_size()
    }
}

impl<T: ByteSize> ByteSize for Vec<T> {
    fn byte_size(&self) -> usize {
        self.as_slice().byte_size()
    }
}

impl<T: ByteSize> ByteSize for VecDeque<T> {
    fn byte_size(&self) -> usize {
        self.iter().map(ByteSize::byte_size).sum()
    }
}

/// `None` is the empty value and weighs nothing.
impl<T: ByteSize> ByteSize for Option<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        self.as_ref().map_or(0, ByteSize::byte_size)
    }
}

impl<A: ByteSize, B: ByteSize> ByteSize for (A, B) {
    #[inline]
    fn byte_size(&self) -> usize {
        self.0.byte_size() + self.1.byte_size()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for &T {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for Box<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for Rc<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for Arc<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}
