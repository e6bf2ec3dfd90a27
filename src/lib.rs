//! Adaptable Priority Queue for Rust
//!
//! This crate provides [`AdaptableHeap`], a binary min-heap built on a linked
//! complete binary tree, whose entries stay addressable after insertion.
//!
//! # Features
//!
//! - **O(1)** `len`, `min`, `replace_value`
//! - **O(log n)** `insert`, `remove_min`, and removal or re-keying of *any*
//!   entry through its [`EntryHandle`]
//! - **O(1)** insertion and removal of the tree's last node, using a queue of
//!   open slots instead of index arithmetic
//! - Pluggable key ordering through [`Comparator`]
//! - A read-only [`TreeView`] for visualizers
//!
//! # Example
//!
//! ```rust
//! use adaptable_heap::AdaptableHeap;
//!
//! let mut heap = AdaptableHeap::new();
//! let job = heap.insert(16, "compile").unwrap();
//! heap.insert(11, "fetch").unwrap();
//! heap.insert(44, "test").unwrap();
//!
//! // Bump the priority of an entry that is not at the root.
//! heap.replace_key(job, 2).unwrap();
//!
//! assert_eq!(heap.remove_min().unwrap().value(), &"compile");
//! assert_eq!(heap.remove_min().unwrap().value(), &"fetch");
//! assert_eq!(heap.remove_min().unwrap().value(), &"test");
//! assert!(heap.remove_min().is_err());
//! ```

pub mod compare;
pub mod config;
pub mod entry;
pub mod heap;
pub mod traits;
pub mod tree;
pub mod view;

// Re-export the main types for convenience
pub use compare::{Comparator, NaturalOrder, ReverseOrder};
pub use config::{HeapConfig, TieBreak};
pub use entry::{EntryHandle, QueueEntry};
pub use heap::AdaptableHeap;
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
pub use tree::{CompleteBinaryTree, Position};
pub use view::TreeView;
