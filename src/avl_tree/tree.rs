//! Height bookkeeping and the four-case rebalancing walks of the
//! height-balanced strategy.

use crate::entry::Entry;
use crate::tree::node::{Balance, NodeId, NIL};
use crate::tree::BstCore;
use std::cmp;

/// Height metadata of a height-balanced node: an absent child counts as -1
/// and a fresh leaf starts at 0.
pub type Height = i32;

impl Balance for Height {
    fn fresh() -> Self {
        0
    }
}

pub type Core<T, U> = BstCore<T, U, Height>;

fn height<T, U>(core: &Core<T, U>, id: NodeId) -> i32 {
    if id == NIL {
        -1
    } else {
        core.node(id).meta
    }
}

fn update_height<T, U>(core: &mut Core<T, U>, id: NodeId) {
    let node = core.node(id);
    let recomputed = cmp::max(height(core, node.left), height(core, node.right)) + 1;
    core.node_mut(id).meta = recomputed;
}

fn balance_factor<T, U>(core: &Core<T, U>, id: NodeId) -> i32 {
    let node = core.node(id);
    height(core, node.left) - height(core, node.right)
}

/// Rotates left and recomputes both participants' heights immediately after
/// relinking, lower node first. Returns the new local subtree root.
fn rotate_left<T, U>(core: &mut Core<T, U>, x: NodeId) -> NodeId {
    let y = core.node(x).right;
    core.rotate_left(x);
    update_height(core, x);
    update_height(core, y);
    y
}

/// Mirror image of [`rotate_left`].
fn rotate_right<T, U>(core: &mut Core<T, U>, x: NodeId) -> NodeId {
    let y = core.node(x).left;
    core.rotate_right(x);
    update_height(core, x);
    update_height(core, y);
    y
}

/// Inserts a key-value pair as a leaf, then walks back to the root
/// recomputing heights. Where a balance factor leaves [-1, 1] the rotation
/// case is selected by comparing the inserted key against the unbalanced
/// ancestor's heavy child's key; at most one rebalancing fires, at the lowest
/// unbalanced ancestor, but the height walk always continues to the root.
///
/// precondition: the key is not present
pub fn insert<T, U>(core: &mut Core<T, U>, key: T, value: U) -> NodeId
where
    T: Ord,
{
    let inserted = core.insert_leaf(key, value);

    let mut curr = core.node(inserted).parent;
    while curr != NIL {
        update_height(core, curr);
        let factor = balance_factor(core, curr);
        let local_root = if factor > 1 {
            let child = core.node(curr).left;
            if core.node(inserted).entry.key < core.node(child).entry.key {
                rotate_right(core, curr)
            } else {
                rotate_left(core, child);
                rotate_right(core, curr)
            }
        } else if factor < -1 {
            let child = core.node(curr).right;
            if core.node(inserted).entry.key > core.node(child).entry.key {
                rotate_left(core, curr)
            } else {
                rotate_right(core, child);
                rotate_left(core, curr)
            }
        } else {
            curr
        };
        curr = core.node(local_root).parent;
    }

    inserted
}

/// Removes the node at `target` and returns its entry. A node with two
/// children trades entries with its in-order successor and the successor is
/// spliced out instead; a node with at most one child is replaced in place by
/// that child. Every ancestor up to the root then has its height recomputed
/// and its balance factor checked, the rotation case being selected by the
/// heavy child's own balance factor. After a deletion more than one ancestor
/// may need rebalancing, so the walk never stops at the first fix.
///
/// precondition: `target` is occupied
pub fn remove<T, U>(core: &mut Core<T, U>, mut target: NodeId) -> Entry<T, U> {
    if core.node(target).left != NIL && core.node(target).right != NIL {
        let successor = core.min_node(core.node(target).right);
        core.swap_entries(target, successor);
        target = successor;
    }

    let child = if core.node(target).left != NIL {
        core.node(target).left
    } else {
        core.node(target).right
    };
    let parent = core.node(target).parent;
    core.transplant(target, child);
    let entry = core.release(target);

    let mut curr = parent;
    while curr != NIL {
        update_height(core, curr);
        let factor = balance_factor(core, curr);
        let local_root = if factor > 1 {
            let child = core.node(curr).left;
            if balance_factor(core, child) >= 0 {
                rotate_right(core, curr)
            } else {
                rotate_left(core, child);
                rotate_right(core, curr)
            }
        } else if factor < -1 {
            let child = core.node(curr).right;
            if balance_factor(core, child) <= 0 {
                rotate_left(core, curr)
            } else {
                rotate_right(core, child);
                rotate_left(core, curr)
            }
        } else {
            curr
        };
        curr = core.node(local_root).parent;
    }

    entry
}

/// Walks the whole subtree checking ordering, parent links, stored heights,
/// and the balance bound, panicking on the first violation. Returns the
/// subtree height. Test support.
pub fn audit<T, U>(core: &Core<T, U>, id: NodeId) -> i32
where
    T: Ord,
{
    if id == NIL {
        return -1;
    }
    let node = core.node(id);
    if node.left != NIL {
        assert!(core.node(node.left).entry.key < node.entry.key);
        assert_eq!(core.node(node.left).parent, id);
    }
    if node.right != NIL {
        assert!(core.node(node.right).entry.key > node.entry.key);
        assert_eq!(core.node(node.right).parent, id);
    }
    let left_height = audit(core, node.left);
    let right_height = audit(core, node.right);
    assert!((left_height - right_height).abs() <= 1);
    assert_eq!(node.meta, cmp::max(left_height, right_height) + 1);
    node.meta
}
