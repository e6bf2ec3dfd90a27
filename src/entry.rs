//! Queue entries and the handles callers use to reach them
//!
//! A [`QueueEntry`] is a key/value pair that also remembers which tree node
//! currently holds it. The heap refreshes that cached [`Position`] after every
//! swap that moves the entry, which is what lets `remove` and `replace_key`
//! start from an arbitrary entry instead of searching for it.
//!
//! Callers never hold entries directly while they are in a heap. They hold an
//! [`EntryHandle`], which names the owning heap and the entry's arena slot.

use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::new_key_type;

use crate::traits::Handle;
use crate::tree::Position;

new_key_type! {
    /// Arena key of an entry inside its heap
    pub(crate) struct EntryKey;
}

/// Identity tag distinguishing one heap instance from every other
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct HeapId(u64);

impl HeapId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        HeapId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to an entry stored in an [`AdaptableHeap`](crate::heap::AdaptableHeap)
///
/// Handles are cheap to copy and stay valid for as long as the entry is in
/// the heap, no matter how often the entry moves. Using a handle with a
/// different heap, or after its entry was removed, fails with
/// [`HeapError::InvalidEntry`](crate::HeapError::InvalidEntry).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EntryHandle {
    pub(crate) heap: HeapId,
    pub(crate) key: EntryKey,
}

impl Handle for EntryHandle {}

/// A key/value pair with a cached tree position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry<K, V> {
    key: K,
    value: V,
    position: Option<Position>,
}

impl<K, V> QueueEntry<K, V> {
    /// Creates an entry that has not been placed in a tree yet
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            position: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Sets the key, returning the previous one
    pub fn set_key(&mut self, key: K) -> K {
        std::mem::replace(&mut self.key, key)
    }

    /// Sets the value, returning the previous one
    pub fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// The node currently holding this entry, `None` once detached
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    pub fn into_key_value(self) -> (K, V) {
        (self.key, self.value)
    }
}
