//! Common traits and the error taxonomy for the adaptable heap
//!
//! This module provides a two-tier trait hierarchy for priority queues:
//!
//! - [`Heap`]: Base trait with the familiar `push`/`peek`/`pop` surface
//! - [`DecreaseKeyHeap`]: Extended trait adding handle-based `decrease_key`
//!
//! The richer adaptable surface (`remove`, `replace_key`, `replace_value`) lives
//! directly on [`AdaptableHeap`](crate::heap::AdaptableHeap); these traits let it
//! be used anywhere a plain or decrease-key heap is expected.

use std::fmt;

/// Error type for heap and tree operations
///
/// Every error is raised before any mutation takes place, so a failed call
/// leaves the structure exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapError {
    /// `min` or `remove_min` was called on an empty heap
    EmptyQueue,
    /// `root`, `last` or `remove_last` was called on an empty tree
    EmptyStructure,
    /// The key has no ordering under the bound comparator
    InvalidKey,
    /// The handle belongs to another heap or its entry was already removed
    InvalidEntry,
    /// The position does not name a node currently in the tree
    InvalidPosition,
    /// Navigation past the tree boundary (parent of the root, missing child)
    BoundaryViolation,
    /// The comparator was rebound while the heap still holds entries
    IllegalState,
    /// The new priority is not less than the current priority
    PriorityNotDecreased,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyQueue => write!(f, "priority queue is empty"),
            HeapError::EmptyStructure => write!(f, "tree is empty"),
            HeapError::InvalidKey => {
                write!(f, "key is not comparable under the heap's comparator")
            }
            HeapError::InvalidEntry => {
                write!(f, "entry does not belong to this heap or was already removed")
            }
            HeapError::InvalidPosition => write!(f, "position is not part of this tree"),
            HeapError::BoundaryViolation => {
                write!(f, "navigation past the boundary of the tree")
            }
            HeapError::IllegalState => {
                write!(f, "comparator can only be changed while the heap is empty")
            }
            HeapError::PriorityNotDecreased => {
                write!(f, "new priority is not less than current priority")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for adaptable operations
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use adaptable_heap::{AdaptableHeap, Heap};
///
/// let mut heap: AdaptableHeap<i32, &str> = Heap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    ///
    /// # Time Complexity
    /// O(log n)
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// # Time Complexity
    /// O(log n)
    fn pop(&mut self) -> Option<(P, T)>;
}

/// Extended heap trait with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use adaptable_heap::{AdaptableHeap, DecreaseKeyHeap, Heap};
///
/// let mut heap: AdaptableHeap<i32, &str> = Heap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    ///
    /// # Time Complexity
    /// O(log n)
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Decreases the priority of an element identified by the handle
    ///
    /// # Errors
    /// Returns `HeapError::PriorityNotDecreased` if the new priority is not
    /// less than the current priority, and `HeapError::InvalidEntry` if the
    /// handle is stale or foreign.
    ///
    /// # Time Complexity
    /// O(log n)
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(HeapError::EmptyQueue.to_string(), "priority queue is empty");
        assert_eq!(HeapError::EmptyStructure.to_string(), "tree is empty");
        assert!(HeapError::IllegalState.to_string().contains("empty"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: E) {}
        assert_error(HeapError::InvalidKey);
    }
}
