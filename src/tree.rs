//! Linked complete binary tree
//!
//! [`CompleteBinaryTree`] is a linked binary tree that always stays
//! left-complete: every level is full except possibly the last, which fills
//! left to right with no gaps.
//!
//! # Time Complexity
//!
//! | Operation        | Complexity |
//! |------------------|------------|
//! | `add`            | O(1)       |
//! | `remove_last`    | O(1)       |
//! | `last`           | O(1)       |
//! | navigation       | O(1)       |
//! | `swap_elements`  | O(1)       |
//! | `depth`          | O(log n)   |
//!
//! # Open slots
//!
//! Besides the nodes themselves the tree keeps a double-ended queue of every
//! node that has fewer than two children, in level order. The front of that
//! queue is always the parent of the next node to be added, and the back is
//! always the last node. This is what makes `add` and `remove_last` constant
//! time without walking down from the root.
//!
//! # Example
//!
//! ```rust
//! use adaptable_heap::tree::CompleteBinaryTree;
//!
//! let mut tree = CompleteBinaryTree::new();
//! let root = tree.add("a");
//! let left = tree.add("b");
//! let right = tree.add("c");
//!
//! assert_eq!(tree.left(root), Ok(left));
//! assert_eq!(tree.right(root), Ok(right));
//! assert_eq!(tree.last(), Ok(right));
//! assert_eq!(tree.remove_last(), Ok("c"));
//! assert_eq!(tree.last(), Ok(left));
//! ```

use std::collections::VecDeque;

use slotmap::{new_key_type, SlotMap};

use crate::traits::HeapError;

new_key_type! {
    /// Opaque handle naming one node of a [`CompleteBinaryTree`]
    ///
    /// Positions are generational: once the node is removed, the position no
    /// longer resolves, even if its slot is later reused.
    pub struct Position;
}

#[derive(Debug, Clone)]
struct Node<E> {
    element: E,
    parent: Option<Position>,
    left: Option<Position>,
    right: Option<Position>,
}

impl<E> Node<E> {
    fn new(element: E, parent: Option<Position>) -> Self {
        Self {
            element,
            parent,
            left: None,
            right: None,
        }
    }

    fn is_full(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}

/// A left-complete binary tree backed by a node arena
#[derive(Debug, Clone)]
pub struct CompleteBinaryTree<E> {
    nodes: SlotMap<Position, Node<E>>,
    root: Option<Position>,
    /// Nodes with fewer than two children, in level order
    open: VecDeque<Position>,
}

impl<E> Default for CompleteBinaryTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> CompleteBinaryTree<E> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            open: VecDeque::new(),
        }
    }

    /// Creates an empty tree with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            root: None,
            open: VecDeque::with_capacity(capacity / 2 + 1),
        }
    }

    /// Returns the number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the root position
    ///
    /// # Errors
    /// `HeapError::EmptyStructure` if the tree is empty.
    pub fn root(&self) -> Result<Position, HeapError> {
        self.root.ok_or(HeapError::EmptyStructure)
    }

    /// Returns the position of the last node (rightmost on the lowest level)
    ///
    /// # Errors
    /// `HeapError::EmptyStructure` if the tree is empty.
    pub fn last(&self) -> Result<Position, HeapError> {
        self.open.back().copied().ok_or(HeapError::EmptyStructure)
    }

    /// Returns true if `pos` names a node currently in this tree
    pub fn contains(&self, pos: Position) -> bool {
        self.nodes.contains_key(pos)
    }

    fn checked(&self, pos: Position) -> Result<&Node<E>, HeapError> {
        self.nodes.get(pos).ok_or(HeapError::InvalidPosition)
    }

    // Lookup for positions the tree itself handed out.
    fn node(&self, pos: Position) -> &Node<E> {
        &self.nodes[pos]
    }

    pub(crate) fn parent_of(&self, pos: Position) -> Option<Position> {
        self.node(pos).parent
    }

    pub(crate) fn children_of(&self, pos: Position) -> (Option<Position>, Option<Position>) {
        let node = self.node(pos);
        (node.left, node.right)
    }

    pub(crate) fn get(&self, pos: Position) -> &E {
        &self.node(pos).element
    }

    pub(crate) fn swap(&mut self, a: Position, b: Position) {
        debug_assert_ne!(a, b);
        if let Some([first, second]) = self.nodes.get_disjoint_mut([a, b]) {
            std::mem::swap(&mut first.element, &mut second.element);
        }
    }

    /// Returns the parent of `pos`
    ///
    /// # Errors
    /// `HeapError::InvalidPosition` for a stale position,
    /// `HeapError::BoundaryViolation` for the root.
    pub fn parent(&self, pos: Position) -> Result<Position, HeapError> {
        self.checked(pos)?
            .parent
            .ok_or(HeapError::BoundaryViolation)
    }

    /// Returns the left child of `pos`
    ///
    /// # Errors
    /// `HeapError::InvalidPosition` for a stale position,
    /// `HeapError::BoundaryViolation` if there is no left child.
    pub fn left(&self, pos: Position) -> Result<Position, HeapError> {
        self.checked(pos)?.left.ok_or(HeapError::BoundaryViolation)
    }

    /// Returns the right child of `pos`
    ///
    /// # Errors
    /// `HeapError::InvalidPosition` for a stale position,
    /// `HeapError::BoundaryViolation` if there is no right child.
    pub fn right(&self, pos: Position) -> Result<Position, HeapError> {
        self.checked(pos)?.right.ok_or(HeapError::BoundaryViolation)
    }

    pub fn has_left(&self, pos: Position) -> Result<bool, HeapError> {
        Ok(self.checked(pos)?.left.is_some())
    }

    pub fn has_right(&self, pos: Position) -> Result<bool, HeapError> {
        Ok(self.checked(pos)?.right.is_some())
    }

    pub fn is_root(&self, pos: Position) -> Result<bool, HeapError> {
        Ok(self.checked(pos)?.parent.is_none())
    }

    /// Returns true if `pos` has at least one child
    pub fn is_internal(&self, pos: Position) -> Result<bool, HeapError> {
        Ok(self.checked(pos)?.left.is_some())
    }

    /// Returns true if `pos` is a leaf
    pub fn is_external(&self, pos: Position) -> Result<bool, HeapError> {
        self.is_internal(pos).map(|internal| !internal)
    }

    /// Returns the children of `pos`, left first
    pub fn children(&self, pos: Position) -> Result<impl Iterator<Item = Position>, HeapError> {
        let node = self.checked(pos)?;
        Ok(node.left.into_iter().chain(node.right))
    }

    /// Number of edges between `pos` and the root
    pub fn depth(&self, pos: Position) -> Result<usize, HeapError> {
        let mut depth = 0;
        let mut current = self.checked(pos)?;
        while let Some(parent) = current.parent {
            depth += 1;
            current = self.node(parent);
        }
        Ok(depth)
    }

    /// Height of the tree: depth of the last node, or `None` when empty
    pub fn height(&self) -> Option<usize> {
        let last = self.open.back().copied()?;
        self.depth(last).ok()
    }

    /// Returns the element stored at `pos`
    pub fn element(&self, pos: Position) -> Result<&E, HeapError> {
        Ok(&self.checked(pos)?.element)
    }

    /// Replaces the element stored at `pos`, returning the previous one
    pub fn replace_element(&mut self, pos: Position, element: E) -> Result<E, HeapError> {
        let node = self.nodes.get_mut(pos).ok_or(HeapError::InvalidPosition)?;
        Ok(std::mem::replace(&mut node.element, element))
    }

    /// Exchanges the elements stored at two positions
    ///
    /// The shape of the tree and the positions themselves are untouched.
    pub fn swap_elements(&mut self, a: Position, b: Position) -> Result<(), HeapError> {
        if a == b {
            return self.checked(a).map(|_| ());
        }
        self.checked(a)?;
        self.checked(b)?;
        self.swap(a, b);
        Ok(())
    }

    /// Adds `element` as the new last node and returns its position
    ///
    /// The node goes into the leftmost free slot of the lowest level, or
    /// starts a new level when the lowest one is full.
    pub fn add(&mut self, element: E) -> Position {
        let Some(&front) = self.open.front() else {
            let root = self.nodes.insert(Node::new(element, None));
            self.root = Some(root);
            self.open.push_back(root);
            return root;
        };

        let pos = self.nodes.insert(Node::new(element, Some(front)));
        let parent = &mut self.nodes[front];
        if parent.left.is_none() {
            parent.left = Some(pos);
        } else {
            parent.right = Some(pos);
            self.open.pop_front();
        }
        self.open.push_back(pos);
        pos
    }

    /// Removes the last node and returns its element
    ///
    /// # Errors
    /// `HeapError::EmptyStructure` if the tree is empty.
    pub fn remove_last(&mut self) -> Result<E, HeapError> {
        let last = self.open.pop_back().ok_or(HeapError::EmptyStructure)?;
        let removed = self
            .nodes
            .remove(last)
            .expect("open-slot queue names a live node");

        match removed.parent {
            None => {
                self.root = None;
                self.open.clear();
            }
            Some(parent) => {
                let parent_node = &mut self.nodes[parent];
                if parent_node.right == Some(last) {
                    // The parent lost its second child and is open again. Every
                    // node before it in level order is still full.
                    parent_node.right = None;
                    self.open.push_front(parent);
                } else {
                    // A single-child parent is already at the front.
                    parent_node.left = None;
                }
            }
        }

        Ok(removed.element)
    }

    /// Iterates over all positions in level order
    pub fn positions(&self) -> Positions<'_, E> {
        Positions {
            tree: self,
            queue: self.root.into_iter().collect(),
        }
    }

    /// Removes every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.open.clear();
    }

    /// Checks left-completeness and the open-slot queue against the nodes.
    pub fn verify_shape(&self) -> bool {
        let order: Vec<Position> = self.positions().collect();
        if order.len() != self.nodes.len() {
            return false;
        }

        // In level order, once a node is missing a child every later node must
        // be a leaf, and a right child never appears without a left one.
        let mut seen_gap = false;
        for &pos in &order {
            let node = self.node(pos);
            if node.left.is_none() && node.right.is_some() {
                return false;
            }
            if seen_gap && node.left.is_some() {
                return false;
            }
            if !node.is_full() {
                seen_gap = true;
            }
            for child in node.left.into_iter().chain(node.right) {
                if self.node(child).parent != Some(pos) {
                    return false;
                }
            }
        }

        let expected_open: Vec<Position> = order
            .iter()
            .copied()
            .filter(|&pos| !self.node(pos).is_full())
            .collect();
        self.open.iter().copied().eq(expected_open)
    }
}

/// Level-order iterator over the positions of a [`CompleteBinaryTree`]
pub struct Positions<'a, E> {
    tree: &'a CompleteBinaryTree<E>,
    queue: VecDeque<Position>,
}

impl<E> Iterator for Positions<'_, E> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let pos = self.queue.pop_front()?;
        let node = self.tree.node(pos);
        self.queue.extend(node.left.into_iter().chain(node.right));
        Some(pos)
    }
}
