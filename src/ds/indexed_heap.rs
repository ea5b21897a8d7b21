//! Indexed binary min-heap with stable handles.
//!
//! A priority queue that, unlike `std::collections::BinaryHeap`, supports
//! in-place priority fixes and removal of an arbitrary element in O(log n).
//! Nodes live in a [`SlotArena`] and each node records its current position
//! in the heap array, so a caller holding a [`SlotId`] can find the element
//! without scanning.
//!
//! ## Architecture
//!
//! ```text
//!   heap: Vec<SlotId>                 arena: SlotArena<HeapNode>
//!   ┌─────┬─────┬─────┬─────┐         ┌────────┬──────────────────────────┐
//!   │ id_2│ id_0│ id_3│ id_1│         │ SlotId │ { value, priority, pos } │
//!   └─────┴─────┴─────┴─────┘         ├────────┼──────────────────────────┤
//!      0     1     2     3            │ id_0   │ { A, 4, pos: 1 }         │
//!                                     │ id_1   │ { B, 9, pos: 3 }         │
//!            (id_2: 1)                │ id_2   │ { C, 1, pos: 0 }         │
//!           /         \               │ id_3   │ { D, 5, pos: 2 }         │
//!     (id_0: 4)     (id_3: 5)         └────────┴──────────────────────────┘
//!        /
//!   (id_1: 9)
//!
//!   Invariant: arena[heap[i]].pos == i for every i
//! ```
//!
//! ## Operations
//!
//! | Operation      | Description                                  | Complexity |
//! |----------------|----------------------------------------------|------------|
//! | `push`         | Insert with priority, returns handle         | O(log n)   |
//! | `pop`          | Remove minimum                               | O(log n)   |
//! | `peek`         | Minimum without removal                      | O(1)       |
//! | `fix`          | Restore order after priority change          | O(log n)   |
//! | `set_priority` | Replace priority and fix                     | O(log n)   |
//! | `remove`       | Remove arbitrary element by handle           | O(log n)   |
//!
//! Elements with equal priority are not ordered among themselves; callers
//! that need a stable order fold a tie-breaker into `P` (the LFU store uses
//! `(weight, insertion sequence)`).
//!
//! ## Example Usage
//!
//! ```
//! use bytecache::ds::IndexedHeap;
//!
//! let mut heap = IndexedHeap::new();
//! let a = heap.push("a", 5u32);
//! let _b = heap.push("b", 2u32);
//! let c = heap.push("c", 8u32);
//!
//! heap.set_priority(c, 1);
//! assert_eq!(heap.peek().map(|(_, v)| *v), Some("c"));
//!
//! assert_eq!(heap.remove(a), Some(("a", 5)));
//! assert_eq!(heap.pop(), Some(("c", 1)));
//! assert_eq!(heap.pop(), Some(("b", 2)));
//! assert!(heap.is_empty());
//! ```

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct HeapNode<T, P> {
    value: T,
    priority: P,
    pos: usize,
}

/// Array-backed binary min-heap whose elements are addressable by [`SlotId`].
#[derive(Debug)]
pub struct IndexedHeap<T, P> {
    arena: SlotArena<HeapNode<T, P>>,
    heap: Vec<SlotId>,
}

impl<T, P: Ord> IndexedHeap<T, P> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            heap: Vec::new(),
        }
    }

    /// Creates an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns `true` if `id` is currently an element of this heap.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Mutable access to an element's value. The priority is not reachable
    /// from here, so heap order cannot be disturbed.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    pub fn priority(&self, id: SlotId) -> Option<&P> {
        self.arena.get(id).map(|node| &node.priority)
    }

    /// Current heap-array slot of `id`.
    pub fn position(&self, id: SlotId) -> Option<usize> {
        self.arena.get(id).map(|node| node.pos)
    }

    /// Inserts `value` with `priority` and returns its handle.
    pub fn push(&mut self, value: T, priority: P) -> SlotId {
        let pos = self.heap.len();
        let id = self.arena.insert(HeapNode {
            value,
            priority,
            pos,
        });
        self.heap.push(id);
        self.sift_up(pos);
        id
    }

    /// Returns the handle and value of the minimum element.
    pub fn peek(&self) -> Option<(SlotId, &T)> {
        let id = *self.heap.first()?;
        self.get(id).map(|value| (id, value))
    }

    /// Removes and returns the minimum element.
    pub fn pop(&mut self) -> Option<(T, P)> {
        let id = *self.heap.first()?;
        self.remove(id)
    }

    /// Removes the element `id` from anywhere in the heap.
    pub fn remove(&mut self, id: SlotId) -> Option<(T, P)> {
        let pos = self.arena.get(id)?.pos;
        let last = self.heap.len() - 1;
        if pos != last {
            self.swap(pos, last);
        }
        self.heap.pop();
        if pos < self.heap.len() {
            self.fix_at(pos);
        }
        self.arena
            .remove(id)
            .map(|node| (node.value, node.priority))
    }

    /// Re-establishes heap order around `id` after its priority changed.
    /// Returns `false` if `id` is not present.
    pub fn fix(&mut self, id: SlotId) -> bool {
        match self.arena.get(id) {
            Some(node) => {
                let pos = node.pos;
                self.fix_at(pos);
                true
            },
            None => false,
        }
    }

    /// Replaces the priority of `id` and fixes its position.
    pub fn set_priority(&mut self, id: SlotId, priority: P) -> bool {
        match self.arena.get_mut(id) {
            Some(node) => node.priority = priority,
            None => return false,
        }
        self.fix(id)
    }

    /// Mutates the priority of `id` in place and fixes its position.
    pub fn update_priority(&mut self, id: SlotId, f: impl FnOnce(&mut P)) -> bool {
        match self.arena.get_mut(id) {
            Some(node) => f(&mut node.priority),
            None => return false,
        }
        self.fix(id)
    }

    /// Iterates `(handle, value)` pairs in heap-array order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.heap
            .iter()
            .filter_map(|&id| self.get(id).map(|value| (id, value)))
    }

    /// Verifies heap order and the slot back-references.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.arena.len() != self.heap.len() {
            return Err(InvariantError::new(format!(
                "heap holds {} slots but arena holds {} nodes",
                self.heap.len(),
                self.arena.len()
            )));
        }
        for (pos, &id) in self.heap.iter().enumerate() {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("heap slot {pos} is dangling")))?;
            if node.pos != pos {
                return Err(InvariantError::new(format!(
                    "node at heap slot {pos} records slot {}",
                    node.pos
                )));
            }
            if pos > 0 {
                let parent = (pos - 1) / 2;
                if self.less(pos, parent) {
                    return Err(InvariantError::new(format!(
                        "heap order violated between slot {parent} and slot {pos}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn fix_at(&mut self, pos: usize) {
        if !self.sift_down(pos) {
            self.sift_up(pos);
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    /// Returns `true` if the element moved.
    fn sift_down(&mut self, start: usize) -> bool {
        let len = self.heap.len();
        let mut pos = start;
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, pos) {
                break;
            }
            self.swap(pos, child);
            pos = child;
        }
        pos > start
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let lhs = self.heap.get(a).and_then(|&id| self.arena.get(id));
        let rhs = self.heap.get(b).and_then(|&id| self.arena.get(id));
        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => lhs.priority < rhs.priority,
            _ => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        let (id_a, id_b) = (self.heap[a], self.heap[b]);
        if let Some(node) = self.arena.get_mut(id_a) {
            node.pos = a;
        }
        if let Some(node) = self.arena.get_mut(id_b) {
            node.pos = b;
        }
    }
}

impl<T, P: Ord> Default for IndexedHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}
