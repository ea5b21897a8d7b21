//! Ordering structures shared by the eviction policies.
//!
//! - [`SlotArena`]: vector arena with stable [`SlotId`] handles
//! - [`IntrusiveList`]: doubly linked list over a `SlotArena` (FIFO order)
//! - [`IndexedHeap`]: binary min-heap over a `SlotArena` (LFU order)

pub mod indexed_heap;
pub mod intrusive_list;
pub mod slot_arena;

pub use indexed_heap::IndexedHeap;
pub use intrusive_list::IntrusiveList;
pub use slot_arena::{SlotArena, SlotId};
