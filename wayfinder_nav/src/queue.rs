// Indexed binary min-heap with decrease-key.
//
// `std::collections::BinaryHeap` cannot change the priority of an entry
// already in the heap, so the A* open set would have to tolerate stale
// duplicates. This queue keeps exactly one entry per item and an
// `FxHashMap<T, usize>` from item to heap slot, which gives O(log n)
// `insert`, `extract_min` and `update_priority`, and O(1) `contains`.
//
// Priorities only need a total order (`Priority`). `f64` uses `total_cmp`;
// tuples compare lexicographically so callers can add tie-breakers
// (`pathfinding.rs` uses `(f_score, g_score)`).
//
// Heap invariant: after every public method returns, each entry's priority
// is <= both children's. Order among equal priorities is unspecified.

use crate::error::{NavError, Result};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;

/// A totally ordered priority value. Smaller is extracted first.
pub trait Priority: Copy {
    fn compare(&self, other: &Self) -> Ordering;
}

impl Priority for f64 {
    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Priority for f32 {
    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Priority for u32 {
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl<A: Priority, B: Priority> Priority for (A, B) {
    fn compare(&self, other: &Self) -> Ordering {
        self.0.compare(&other.0).then_with(|| self.1.compare(&other.1))
    }
}

/// Min-priority queue keyed by item identity.
#[derive(Clone, Debug)]
pub struct IndexedPriorityQueue<T, P = f64> {
    heap: Vec<(T, P)>,
    /// Item -> its slot in `heap`.
    slots: FxHashMap<T, usize>,
}

impl<T, P> Default for IndexedPriorityQueue<T, P> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            slots: FxHashMap::default(),
        }
    }
}

impl<T: Clone + Eq + Hash, P: Priority> IndexedPriorityQueue<T, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slots: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.slots.contains_key(item)
    }

    /// Current priority of `item`, if queued.
    pub fn priority_of(&self, item: &T) -> Option<P> {
        self.slots.get(item).map(|&slot| self.heap[slot].1)
    }

    /// The minimum entry without removing it.
    pub fn peek(&self) -> Option<(&T, P)> {
        self.heap.first().map(|(item, priority)| (item, *priority))
    }

    /// Decrease-or-insert. A new item is pushed; an item already queued has
    /// its priority lowered to `priority` if that is smaller, and is left
    /// alone otherwise. Never creates a duplicate entry.
    pub fn insert(&mut self, item: T, priority: P) {
        match self.slots.get(&item) {
            Some(&slot) => {
                if priority.compare(&self.heap[slot].1) == Ordering::Less {
                    self.heap[slot].1 = priority;
                    self.sift_up(slot);
                }
            }
            None => self.push(item, priority),
        }
    }

    /// Set `item`'s priority to exactly `priority`, moving it up or down as
    /// needed. An item not in the queue is inserted fresh.
    pub fn update_priority(&mut self, item: T, priority: P) {
        match self.slots.get(&item) {
            Some(&slot) => {
                self.heap[slot].1 = priority;
                let slot = self.sift_up(slot);
                self.sift_down(slot);
            }
            None => self.push(item, priority),
        }
    }

    /// Remove and return the item with the smallest priority.
    pub fn extract_min(&mut self) -> Result<T> {
        self.extract_min_with_priority().map(|(item, _)| item)
    }

    /// Like `extract_min`, also returning the priority it had.
    pub fn extract_min_with_priority(&mut self) -> Result<(T, P)> {
        if self.heap.is_empty() {
            return Err(NavError::EmptyQueue);
        }
        let (item, priority) = self.heap.swap_remove(0);
        self.slots.remove(&item);
        if let Some((moved, _)) = self.heap.first() {
            self.slots.insert(moved.clone(), 0);
            self.sift_down(0);
        }
        Ok((item, priority))
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    fn push(&mut self, item: T, priority: P) {
        let slot = self.heap.len();
        self.slots.insert(item.clone(), slot);
        self.heap.push((item, priority));
        self.sift_up(slot);
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a].1.compare(&self.heap[b].1) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].0.clone(), a);
        self.slots.insert(self.heap[b].0.clone(), b);
    }

    /// Returns the slot the entry ended up in.
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}
