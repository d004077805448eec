//! Indexed binary min-heap.
//!
//! A plain `BinaryHeap` fixes an entry's priority when it is pushed. Dijkstra
//! needs the opposite: the queue order must follow the live distance table,
//! so a relaxed vertex is taken out and put back with its new distance. This
//! heap tracks each key's slot, which makes `remove` O(log n).

use graphxt_common::utils::hash::FxHashMap;
use std::hash::Hash;

/// Binary min-heap of `(priority, key)` pairs addressable by key.
///
/// Entries are ordered by priority, then by key, so ties resolve the same
/// way on every run.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<K, P> {
    entries: Vec<(P, K)>,
    positions: FxHashMap<K, usize>,
}

impl<K, P> IndexedMinHeap<K, P>
where
    K: Copy + Eq + Hash + Ord,
    P: Copy + Ord,
{
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Number of queued keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is queued.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Returns the queued priority of `key`.
    #[must_use]
    pub fn priority(&self, key: &K) -> Option<P> {
        self.positions.get(key).map(|&slot| self.entries[slot].0)
    }

    /// Returns the minimum entry without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<(K, P)> {
        self.entries.first().map(|&(p, k)| (k, p))
    }

    /// Queues `key` with `priority`.
    ///
    /// A key that is already queued is removed first, so this doubles as
    /// decrease-key (and increase-key).
    pub fn push(&mut self, key: K, priority: P) {
        self.remove(&key);

        let slot = self.entries.len();
        self.entries.push((priority, key));
        self.positions.insert(key, slot);
        self.sift_up(slot);
    }

    /// Removes and returns the minimum entry.
    pub fn pop(&mut self) -> Option<(K, P)> {
        let (_, key) = *self.entries.first()?;
        let priority = self.remove(&key)?;
        Some((key, priority))
    }

    /// Removes `key` from the heap, returning its priority.
    pub fn remove(&mut self, key: &K) -> Option<P> {
        let slot = self.positions.remove(key)?;
        let last = self.entries.len() - 1;

        self.entries.swap(slot, last);
        let (priority, _) = self.entries.pop()?;

        if slot < self.entries.len() {
            let moved = self.entries[slot].1;
            self.positions.insert(moved, slot);
            self.sift_down(slot);
            self.sift_up(slot);
        }

        Some(priority)
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[slot] >= self.entries[parent] {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.entries[left] < self.entries[smallest] {
                smallest = left;
            }
            if right < len && self.entries[right] < self.entries[smallest] {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.positions.insert(self.entries[a].1, a);
        self.positions.insert(self.entries[b].1, b);
    }
}

impl<K, P> Default for IndexedMinHeap<K, P>
where
    K: Copy + Eq + Hash + Ord,
    P: Copy + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pop_in_priority_order() {
        let mut heap = IndexedMinHeap::new();
        heap.push('c', 3);
        heap.push('a', 1);
        heap.push('d', 4);
        heap.push('b', 2);

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).collect();
        assert_eq!(order, vec![('a', 1), ('b', 2), ('c', 3), ('d', 4)]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_push_existing_key_updates_priority() {
        let mut heap = IndexedMinHeap::new();
        heap.push(1u32, 10i64);
        heap.push(2, 5);
        heap.push(1, 1);

        assert_eq!(heap.len(), 2);
        assert_eq!(heap.priority(&1), Some(1));
        assert_eq!(heap.pop(), Some((1, 1)));
        assert_eq!(heap.pop(), Some((2, 5)));
    }

    #[test]
    fn test_remove_middle_entry() {
        let mut heap = IndexedMinHeap::new();
        for (k, p) in [(1u32, 7i64), (2, 3), (3, 9), (4, 1), (5, 5)] {
            heap.push(k, p);
        }

        assert_eq!(heap.remove(&5), Some(5));
        assert_eq!(heap.remove(&5), None);
        assert!(!heap.contains(&5));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|(k, _)| k).collect();
        assert_eq!(order, vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_ties_break_by_key() {
        let mut heap = IndexedMinHeap::new();
        heap.push(3u32, 0i64);
        heap.push(1, 0);
        heap.push(2, 0);

        assert_eq!(heap.peek(), Some((1, 0)));
        let keys: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|(k, _)| k).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    proptest! {
        #[test]
        fn prop_heap_matches_sorted_reference(
            ops in proptest::collection::vec((0u8..16, -50i64..50, any::<bool>()), 0..80)
        ) {
            let mut heap = IndexedMinHeap::new();
            let mut reference = std::collections::BTreeMap::new();

            for (key, priority, remove) in ops {
                if remove {
                    prop_assert_eq!(heap.remove(&key), reference.remove(&key));
                } else {
                    heap.push(key, priority);
                    reference.insert(key, priority);
                }
                prop_assert_eq!(heap.len(), reference.len());
            }

            let mut expected: Vec<_> = reference.into_iter().map(|(k, p)| (p, k)).collect();
            expected.sort();
            let popped: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|(k, p)| (p, k)).collect();
            prop_assert_eq!(popped, expected);
        }
    }
}
