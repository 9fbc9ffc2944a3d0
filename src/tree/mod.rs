//! Shared binary-search-tree substrate used by both balancing strategies.
//!
//! Nodes live in a slab addressed by [`NodeId`]; child and parent links are
//! plain indices with no ownership, so fix-up code can navigate upward without
//! creating reference cycles. Everything strategy-agnostic lives here: slot
//! management, the plain BST leaf insertion, the two rotations, transplanting,
//! search, and in-order traversal. Height and color bookkeeping stay in the
//! strategy modules.

pub mod node;

use crate::entry::Entry;
use crate::tree::node::{Balance, Node, NodeId, NIL};
use std::cmp::Ordering;
use std::mem;

/// A binary search tree over a slab of nodes, parameterized by the balance
/// metadata `M`.
pub struct BstCore<T, U, M> {
    slots: Vec<Option<Node<T, U, M>>>,
    vacant: Vec<NodeId>,
    pub root: NodeId,
    len: usize,
}

impl<T, U, M> BstCore<T, U, M> {
    pub fn new() -> Self {
        BstCore {
            slots: Vec::new(),
            vacant: Vec::new(),
            root: NIL,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
        self.root = NIL;
        self.len = 0;
    }

    pub fn node(&self, id: NodeId) -> &Node<T, U, M> {
        self.slots[id].as_ref().expect("Expected an occupied slot.")
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<T, U, M> {
        self.slots[id].as_mut().expect("Expected an occupied slot.")
    }

    /// Releases a node's slot and returns its entry. The caller must have
    /// unlinked the node already.
    pub fn release(&mut self, id: NodeId) -> Entry<T, U> {
        self.len -= 1;
        self.vacant.push(id);
        self.slots[id].take().expect("Expected an occupied slot.").entry
    }

    /// Swaps the entries stored at two distinct occupied slots, leaving all
    /// links and metadata in place.
    pub fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        let mut node_a = self.slots[a].take().expect("Expected an occupied slot.");
        {
            let node_b = self.slots[b].as_mut().expect("Expected an occupied slot.");
            mem::swap(&mut node_a.entry, &mut node_b.entry);
        }
        self.slots[a] = Some(node_a);
    }

    /// Ordinary binary search by key; returns the matching node's id or
    /// `NIL`.
    pub fn find(&self, key: &T) -> NodeId
    where
        T: Ord,
    {
        let mut curr = self.root;
        while curr != NIL {
            let node = self.node(curr);
            curr = match key.cmp(&node.entry.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return curr,
            };
        }
        NIL
    }

    pub fn get(&self, key: &T) -> Option<&Entry<T, U>>
    where
        T: Ord,
    {
        match self.find(key) {
            NIL => None,
            id => Some(&self.node(id).entry),
        }
    }

    pub fn get_mut(&mut self, key: &T) -> Option<&mut Entry<T, U>>
    where
        T: Ord,
    {
        match self.find(key) {
            NIL => None,
            id => Some(&mut self.node_mut(id).entry),
        }
    }

    /// Leftmost node of the subtree rooted at the occupied slot `id`.
    pub fn min_node(&self, id: NodeId) -> NodeId {
        let mut curr = id;
        while self.node(curr).left != NIL {
            curr = self.node(curr).left;
        }
        curr
    }

    /// Rightmost node of the subtree rooted at the occupied slot `id`.
    pub fn max_node(&self, id: NodeId) -> NodeId {
        let mut curr = id;
        while self.node(curr).right != NIL {
            curr = self.node(curr).right;
        }
        curr
    }

    /// Rotates the subtree rooted at `x` to the left: `x`'s right child takes
    /// its place, `x` becomes that child's left child, and the displaced
    /// grandchild reattaches as `x`'s right child. Exactly three links are
    /// rewired (plus the parent back-references); metadata is untouched, so
    /// recoloring and height recomputation are the caller's move.
    ///
    /// precondition: `x` has a right child
    pub fn rotate_left(&mut self, x: NodeId) {
        let y = self.node(x).right;
        let displaced = self.node(y).left;

        self.node_mut(x).right = displaced;
        if displaced != NIL {
            self.node_mut(displaced).parent = x;
        }

        let parent = self.node(x).parent;
        self.node_mut(y).parent = parent;
        if parent == NIL {
            self.root = y;
        } else if self.node(parent).left == x {
            self.node_mut(parent).left = y;
        } else {
            self.node_mut(parent).right = y;
        }

        self.node_mut(y).left = x;
        self.node_mut(x).parent = y;
    }

    /// Mirror image of [`rotate_left`](BstCore::rotate_left).
    ///
    /// precondition: `x` has a left child
    pub fn rotate_right(&mut self, x: NodeId) {
        let y = self.node(x).left;
        let displaced = self.node(y).right;

        self.node_mut(x).left = displaced;
        if displaced != NIL {
            self.node_mut(displaced).parent = x;
        }

        let parent = self.node(x).parent;
        self.node_mut(y).parent = parent;
        if parent == NIL {
            self.root = y;
        } else if self.node(parent).right == x {
            self.node_mut(parent).right = y;
        } else {
            self.node_mut(parent).left = y;
        }

        self.node_mut(y).right = x;
        self.node_mut(x).parent = y;
    }

    /// Replaces the subtree rooted at `u` with the subtree rooted at `v` in
    /// `u`'s parent link. `u`'s own links are left dangling for the caller to
    /// release.
    pub fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.node(u).parent;
        if parent == NIL {
            self.root = v;
        } else if self.node(parent).left == u {
            self.node_mut(parent).left = v;
        } else {
            self.node_mut(parent).right = v;
        }
        if v != NIL {
            self.node_mut(v).parent = parent;
        }
    }

    /// Returns an in-order iterator over the tree.
    pub fn iter(&self) -> Iter<'_, T, U, M> {
        let mut iter = Iter {
            core: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Consumes the tree into an owning in-order iterator.
    pub fn into_iter(self) -> IntoIter<T, U, M> {
        let root = self.root;
        let mut iter = IntoIter {
            core: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(root);
        iter
    }
}

impl<T, U, M> BstCore<T, U, M>
where
    M: Balance,
{
    /// Allocates a node in the just-inserted state and returns its id. Links
    /// are wired by the caller.
    pub fn alloc(&mut self, key: T, value: U) -> NodeId {
        self.len += 1;
        let node = Node::new(key, value);
        match self.vacant.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            },
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            },
        }
    }

    /// The plain BST half of every insertion: descends along the ordering
    /// path and attaches a fresh node as a leaf, returning its id. The
    /// strategy-specific fix-up runs afterwards.
    ///
    /// precondition: the key is not present
    pub fn insert_leaf(&mut self, key: T, value: U) -> NodeId
    where
        T: Ord,
    {
        let mut parent = NIL;
        let mut curr = self.root;
        let mut went_left = false;
        while curr != NIL {
            parent = curr;
            went_left = key < self.node(curr).entry.key;
            curr = if went_left {
                self.node(curr).left
            } else {
                self.node(curr).right
            };
        }

        let id = self.alloc(key, value);
        self.node_mut(id).parent = parent;
        if parent == NIL {
            self.root = id;
        } else if went_left {
            self.node_mut(parent).left = id;
        } else {
            self.node_mut(parent).right = id;
        }
        id
    }
}

/// A borrowing in-order iterator over a tree.
///
/// The stack holds the ids of every node whose own entry is still pending, so
/// traversal is lazy and restartable and never touches the tree.
pub struct Iter<'a, T, U, M> {
    core: &'a BstCore<T, U, M>,
    stack: Vec<NodeId>,
}

impl<'a, T, U, M> Iter<'a, T, U, M> {
    fn push_left_spine(&mut self, mut id: NodeId) {
        while id != NIL {
            self.stack.push(id);
            id = self.core.node(id).left;
        }
    }
}

impl<'a, T, U, M> Iterator for Iter<'a, T, U, M> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let core = self.core;
        let node = core.node(id);
        self.push_left_spine(node.right);
        Some((&node.entry.key, &node.entry.value))
    }
}

/// An owning in-order iterator over a tree.
pub struct IntoIter<T, U, M> {
    core: BstCore<T, U, M>,
    stack: Vec<NodeId>,
}

impl<T, U, M> IntoIter<T, U, M> {
    fn push_left_spine(&mut self, mut id: NodeId) {
        while id != NIL {
            self.stack.push(id);
            id = self.core.node(id).left;
        }
    }
}

impl<T, U, M> Iterator for IntoIter<T, U, M> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.core.slots[id]
            .take()
            .expect("Expected an occupied slot.");
        self.push_left_spine(node.right);
        let Entry { key, value } = node.entry;
        Some((key, value))
    }
}
