//! Adaptable priority queue on a linked complete binary tree
//!
//! [`AdaptableHeap`] is a binary min-heap whose entries can be reached again
//! after insertion. `insert` returns an [`EntryHandle`]; the handle can later
//! remove the entry or change its key or value, wherever the entry has moved.
//!
//! # Time Complexity
//!
//! | Operation       | Complexity |
//! |-----------------|------------|
//! | `len`           | O(1)       |
//! | `min`           | O(1)       |
//! | `insert`        | O(log n)   |
//! | `remove_min`    | O(log n)   |
//! | `remove`        | O(log n)   |
//! | `replace_key`   | O(log n)   |
//! | `replace_value` | O(1)       |
//!
//! # Structure
//!
//! Entries live in an arena owned by the heap. The tree stores only entry
//! keys, and each entry caches the [`Position`] of the node holding it. Every
//! swap performed while restoring heap order refreshes the cached position of
//! both entries involved, so an entry can always be found from its handle in
//! O(1).
//!
//! # Example
//!
//! ```rust
//! use adaptable_heap::AdaptableHeap;
//!
//! let mut heap = AdaptableHeap::new();
//! let a = heap.insert(11, "a").unwrap();
//! heap.insert(13, "b").unwrap();
//! heap.insert(64, "c").unwrap();
//!
//! heap.replace_key(a, 70).unwrap();
//! assert_eq!(heap.min().unwrap().key(), &13);
//!
//! let removed = heap.remove(a).unwrap();
//! assert_eq!(removed.into_key_value(), (70, "a"));
//! assert_eq!(heap.len(), 2);
//! ```

use std::cmp::Ordering;

use slotmap::SlotMap;

use crate::compare::{Comparator, NaturalOrder};
use crate::config::{HeapConfig, TieBreaker};
use crate::entry::{EntryHandle, EntryKey, HeapId, QueueEntry};
use crate::traits::{DecreaseKeyHeap, Heap, HeapError};
use crate::tree::{CompleteBinaryTree, Position};
use crate::view::TreeView;

/// An adaptable min-heap ordered by a [`Comparator`]
pub struct AdaptableHeap<K, V, C = NaturalOrder> {
    tree: CompleteBinaryTree<EntryKey>,
    entries: SlotMap<EntryKey, QueueEntry<K, V>>,
    comparator: C,
    tie_breaker: TieBreaker,
    id: HeapId,
}

impl<K, V> AdaptableHeap<K, V, NaturalOrder>
where
    K: PartialOrd,
{
    /// Creates an empty heap ordered by `PartialOrd`
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V> Default for AdaptableHeap<K, V, NaturalOrder>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> std::fmt::Debug for AdaptableHeap<K, V, C>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
    C: Comparator<K>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptableHeap")
            .field("len", &self.len())
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<K, V, C> AdaptableHeap<K, V, C>
where
    C: Comparator<K>,
{
    /// Creates an empty heap with the given comparator and default settings
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_config(comparator, HeapConfig::default())
    }

    /// Creates an empty heap with the given comparator and settings
    pub fn with_config(comparator: C, config: HeapConfig) -> Self {
        Self {
            tree: CompleteBinaryTree::with_capacity(config.capacity),
            entries: SlotMap::with_capacity_and_key(config.capacity),
            comparator,
            tie_breaker: TieBreaker::from_config(&config),
            id: HeapId::next(),
        }
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the heap holds no entries
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Replaces the comparator
    ///
    /// # Errors
    /// `HeapError::IllegalState` if the heap is not empty.
    pub fn set_comparator(&mut self, comparator: C) -> Result<(), HeapError> {
        if !self.is_empty() {
            return Err(HeapError::IllegalState);
        }
        self.comparator = comparator;
        Ok(())
    }

    /// Returns an entry with the minimum key without removing it
    ///
    /// # Errors
    /// `HeapError::EmptyQueue` if the heap is empty.
    pub fn min(&self) -> Result<&QueueEntry<K, V>, HeapError> {
        let root = self.tree.root().map_err(|_| HeapError::EmptyQueue)?;
        Ok(&self.entries[*self.tree.get(root)])
    }

    /// Returns the handle of an entry with the minimum key
    ///
    /// # Errors
    /// `HeapError::EmptyQueue` if the heap is empty.
    pub fn min_handle(&self) -> Result<EntryHandle, HeapError> {
        let root = self.tree.root().map_err(|_| HeapError::EmptyQueue)?;
        Ok(self.handle(*self.tree.get(root)))
    }

    /// Inserts a key/value pair and returns a handle to the new entry
    ///
    /// # Errors
    /// `HeapError::InvalidKey` if the comparator cannot order `key`.
    pub fn insert(&mut self, key: K, value: V) -> Result<EntryHandle, HeapError> {
        self.check_key(&key)?;
        Ok(self.insert_unchecked(key, value))
    }

    fn insert_unchecked(&mut self, key: K, value: V) -> EntryHandle {
        let entry_key = self.entries.insert(QueueEntry::new(key, value));
        let pos = self.tree.add(entry_key);
        self.entries[entry_key].set_position(Some(pos));
        self.sift_up(pos);
        self.handle(entry_key)
    }

    /// Removes and returns an entry with the minimum key
    ///
    /// # Errors
    /// `HeapError::EmptyQueue` if the heap is empty.
    pub fn remove_min(&mut self) -> Result<QueueEntry<K, V>, HeapError> {
        let root = self.tree.root().map_err(|_| HeapError::EmptyQueue)?;
        if self.len() == 1 {
            let entry_key = self.tree.remove_last()?;
            return Ok(self.detach(entry_key));
        }

        let last = self.tree.last()?;
        self.tree.swap(root, last);
        let entry_key = self.tree.remove_last()?;
        self.refresh(root);
        self.sift_down(root);
        Ok(self.detach(entry_key))
    }

    /// Removes the entry behind `handle` and returns it
    ///
    /// # Errors
    /// `HeapError::InvalidEntry` if the handle is foreign or stale.
    pub fn remove(&mut self, handle: EntryHandle) -> Result<QueueEntry<K, V>, HeapError> {
        let pos = self.position_of(handle)?;
        let last = self.tree.last()?;
        if pos == last {
            let entry_key = self.tree.remove_last()?;
            return Ok(self.detach(entry_key));
        }

        self.tree.swap(pos, last);
        let entry_key = self.tree.remove_last()?;
        // The former last entry now sits at `pos` and may be out of order with
        // either its new parent or its new children.
        self.refresh(pos);
        self.restore(pos);
        Ok(self.detach(entry_key))
    }

    /// Replaces the key of the entry behind `handle`, returning the old key
    ///
    /// # Errors
    /// `HeapError::InvalidEntry` if the handle is foreign or stale,
    /// `HeapError::InvalidKey` if the comparator cannot order `key`.
    pub fn replace_key(&mut self, handle: EntryHandle, key: K) -> Result<K, HeapError> {
        let pos = self.position_of(handle)?;
        self.check_key(&key)?;
        let old = self.entries[handle.key].set_key(key);
        self.restore(pos);
        Ok(old)
    }

    /// Replaces the value of the entry behind `handle`, returning the old value
    ///
    /// # Errors
    /// `HeapError::InvalidEntry` if the handle is foreign or stale.
    pub fn replace_value(&mut self, handle: EntryHandle, value: V) -> Result<V, HeapError> {
        self.position_of(handle)?;
        Ok(self.entries[handle.key].set_value(value))
    }

    /// Returns the entry behind `handle`
    ///
    /// # Errors
    /// `HeapError::InvalidEntry` if the handle is foreign or stale.
    pub fn get(&self, handle: EntryHandle) -> Result<&QueueEntry<K, V>, HeapError> {
        if handle.heap != self.id {
            return Err(HeapError::InvalidEntry);
        }
        self.entries.get(handle.key).ok_or(HeapError::InvalidEntry)
    }

    /// Returns true if `handle` names an entry currently in this heap
    pub fn contains(&self, handle: EntryHandle) -> bool {
        self.get(handle).is_ok()
    }

    /// Iterates over all entries in level order (not sorted)
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry<K, V>> + '_ {
        self.tree
            .positions()
            .map(move |pos| &self.entries[*self.tree.get(pos)])
    }

    /// Removes every entry; outstanding handles become invalid
    pub fn clear(&mut self) {
        self.tree.clear();
        self.entries.clear();
    }

    /// Read-only access to the underlying tree, for rendering and inspection
    pub fn tree(&self) -> TreeView<'_, K, V> {
        TreeView::new(&self.tree, &self.entries)
    }

    /// Drains the heap into a vector of entries in non-decreasing key order
    pub fn into_sorted_vec(mut self) -> Vec<QueueEntry<K, V>> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(entry) = self.remove_min() {
            sorted.push(entry);
        }
        sorted
    }

    /// Verifies every structural invariant of the heap
    ///
    /// Checks left-completeness and the open-slot queue, that the number of
    /// entries matches the number of nodes, that every cached entry position
    /// resolves back to that entry, and that no child is smaller than its parent.
    pub fn verify_invariants(&self) -> bool {
        if !self.tree.verify_shape() || self.entries.len() != self.tree.len() {
            return false;
        }

        for (entry_key, entry) in &self.entries {
            match entry.position() {
                Some(pos) if self.tree.element(pos) == Ok(&entry_key) => {}
                _ => return false,
            }
        }

        self.tree.positions().all(|pos| match self.tree.parent_of(pos) {
            None => true,
            Some(parent) => !matches!(self.compare_at(pos, parent), Some(Ordering::Less)),
        })
    }

    fn handle(&self, key: EntryKey) -> EntryHandle {
        EntryHandle { heap: self.id, key }
    }

    fn check_key(&self, key: &K) -> Result<(), HeapError> {
        match self.comparator.compare(key, key) {
            Some(_) => Ok(()),
            None => Err(HeapError::InvalidKey),
        }
    }

    fn position_of(&self, handle: EntryHandle) -> Result<Position, HeapError> {
        self.get(handle)?
            .position()
            .ok_or(HeapError::InvalidEntry)
    }

    /// Removes an entry that is no longer in the tree from the arena.
    fn detach(&mut self, entry_key: EntryKey) -> QueueEntry<K, V> {
        let mut entry = self
            .entries
            .remove(entry_key)
            .expect("tree element names a live entry");
        entry.set_position(None);
        entry
    }

    /// Points the entry stored at `pos` back at `pos`.
    fn refresh(&mut self, pos: Position) {
        let entry_key = *self.tree.get(pos);
        self.entries[entry_key].set_position(Some(pos));
    }

    fn swap(&mut self, a: Position, b: Position) {
        self.tree.swap(a, b);
        self.refresh(a);
        self.refresh(b);
    }

    fn key_at(&self, pos: Position) -> &K {
        self.entries[*self.tree.get(pos)].key()
    }

    fn compare_at(&self, a: Position, b: Position) -> Option<Ordering> {
        self.comparator.compare(self.key_at(a), self.key_at(b))
    }

    /// Sifts the entry at `pos` up or down, whichever way it is out of order.
    fn restore(&mut self, pos: Position) {
        if self.sift_up(pos) == pos {
            self.sift_down(pos);
        }
    }

    /// Moves the entry at `pos` toward the root while it is smaller than its
    /// parent. Returns the position where it settled.
    fn sift_up(&mut self, mut pos: Position) -> Position {
        while let Some(parent) = self.tree.parent_of(pos) {
            if self.compare_at(pos, parent) != Some(Ordering::Less) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
        pos
    }

    /// Moves the entry at `pos` toward the leaves while it is larger than its
    /// smaller child.
    fn sift_down(&mut self, mut pos: Position) {
        loop {
            let child = match self.tree.children_of(pos) {
                (None, _) => break,
                (Some(left), None) => left,
                (Some(left), Some(right)) => match self.compare_at(left, right) {
                    Some(Ordering::Less) => left,
                    Some(Ordering::Greater) => right,
                    _ => {
                        if self.tie_breaker.prefer_left() {
                            left
                        } else {
                            right
                        }
                    }
                },
            };

            if self.compare_at(pos, child) != Some(Ordering::Greater) {
                break;
            }
            self.swap(pos, child);
            pos = child;
        }
    }
}

impl<T, P: Ord> Heap<T, P> for AdaptableHeap<P, T, NaturalOrder> {
    fn new() -> Self {
        AdaptableHeap::with_comparator(NaturalOrder)
    }

    fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    fn len(&self) -> usize {
        self.tree.len()
    }

    fn push(&mut self, priority: P, item: T) {
        // `Ord` keys always compare, so the key check cannot fail.
        self.insert_unchecked(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.min().ok().map(|entry| (entry.key(), entry.value()))
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.remove_min().ok().map(QueueEntry::into_key_value)
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for AdaptableHeap<P, T, NaturalOrder> {
    type Handle = EntryHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.insert_unchecked(priority, item)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        if new_priority >= *self.get(*handle)?.key() {
            return Err(HeapError::PriorityNotDecreased);
        }
        self.replace_key(*handle, new_priority).map(|_| ())
    }
}
