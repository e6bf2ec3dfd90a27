//! Read-only view of a heap's tree
//!
//! [`TreeView`] is what renderers and debuggers get from
//! [`AdaptableHeap::tree`](crate::heap::AdaptableHeap::tree). It can walk the
//! tree and read every entry, but it only holds shared borrows and has no
//! mutating methods, so nothing reached through it can break heap order.
//!
//! # Example
//!
//! ```rust
//! use adaptable_heap::AdaptableHeap;
//!
//! let mut heap = AdaptableHeap::new();
//! for k in [5, 3, 8] {
//!     heap.insert(k, ()).unwrap();
//! }
//!
//! let view = heap.tree();
//! let root = view.root().unwrap();
//! assert_eq!(view.element(root).unwrap().key(), &3);
//! let keys: Vec<i32> = view
//!     .positions()
//!     .map(|pos| *view.element(pos).unwrap().key())
//!     .collect();
//! assert_eq!(keys, vec![3, 5, 8]);
//! ```

use slotmap::SlotMap;

use crate::entry::{EntryKey, QueueEntry};
use crate::traits::HeapError;
use crate::tree::{CompleteBinaryTree, Position};

/// Shared, read-only access to the tree behind a heap
pub struct TreeView<'a, K, V> {
    tree: &'a CompleteBinaryTree<EntryKey>,
    entries: &'a SlotMap<EntryKey, QueueEntry<K, V>>,
}

impl<K, V> Clone for TreeView<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for TreeView<'_, K, V> {}

impl<'a, K, V> TreeView<'a, K, V> {
    pub(crate) fn new(
        tree: &'a CompleteBinaryTree<EntryKey>,
        entries: &'a SlotMap<EntryKey, QueueEntry<K, V>>,
    ) -> Self {
        Self { tree, entries }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn root(&self) -> Result<Position, HeapError> {
        self.tree.root()
    }

    pub fn last(&self) -> Result<Position, HeapError> {
        self.tree.last()
    }

    pub fn parent(&self, pos: Position) -> Result<Position, HeapError> {
        self.tree.parent(pos)
    }

    pub fn left(&self, pos: Position) -> Result<Position, HeapError> {
        self.tree.left(pos)
    }

    pub fn right(&self, pos: Position) -> Result<Position, HeapError> {
        self.tree.right(pos)
    }

    pub fn has_left(&self, pos: Position) -> Result<bool, HeapError> {
        self.tree.has_left(pos)
    }

    pub fn has_right(&self, pos: Position) -> Result<bool, HeapError> {
        self.tree.has_right(pos)
    }

    pub fn depth(&self, pos: Position) -> Result<usize, HeapError> {
        self.tree.depth(pos)
    }

    /// Returns the entry stored at `pos`
    pub fn element(&self, pos: Position) -> Result<&'a QueueEntry<K, V>, HeapError> {
        let entry_key = self.tree.element(pos)?;
        Ok(&self.entries[*entry_key])
    }

    /// Iterates over all positions in level order
    pub fn positions(&self) -> impl Iterator<Item = Position> + 'a {
        self.tree.positions()
    }
}

#[cfg(test)]
mod tests {
    use crate::heap::AdaptableHeap;
    use crate::traits::HeapError;

    #[test]
    fn test_view_navigation() {
        let mut heap = AdaptableHeap::new();
        for k in [4, 2, 6, 1, 3] {
            heap.insert(k, k * 10).unwrap();
        }
        let view = heap.tree();
        assert_eq!(view.len(), 5);
        assert!(!view.is_empty());

        let root = view.root().unwrap();
        assert_eq!(view.element(root).unwrap().value(), &10);
        assert_eq!(view.parent(root), Err(HeapError::BoundaryViolation));

        let left = view.left(root).unwrap();
        assert_eq!(view.parent(left), Ok(root));
        assert_eq!(view.has_left(left), Ok(true));
        assert_eq!(view.has_right(left), Ok(true));

        let right = view.right(root).unwrap();
        assert_eq!(view.has_left(right), Ok(false));
        assert_eq!(view.depth(view.last().unwrap()), Ok(2));
    }

    #[test]
    fn test_view_entries_point_back() {
        let mut heap = AdaptableHeap::new();
        for k in (0..20).rev() {
            heap.insert(k, ()).unwrap();
        }
        let view = heap.tree();
        for pos in view.positions() {
            assert_eq!(view.element(pos).unwrap().position(), Some(pos));
        }
    }

    #[test]
    fn test_empty_view() {
        let heap: AdaptableHeap<i32, ()> = AdaptableHeap::new();
        let view = heap.tree();
        assert!(view.is_empty());
        assert_eq!(view.root(), Err(HeapError::EmptyStructure));
        assert_eq!(view.positions().count(), 0);
    }
}
