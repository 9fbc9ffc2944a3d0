//! Color metadata and the insertion/deletion fix-up state machines of the
//! color-balanced strategy.

use crate::entry::Entry;
use crate::tree::node::{Balance, NodeId, NIL};
use crate::tree::BstCore;

/// The color of a node in a red-black tree. Fresh nodes start red; the
/// reserved `NIL` id always reads black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

impl Balance for Color {
    fn fresh() -> Self {
        Color::Red
    }
}

pub type Core<T, U> = BstCore<T, U, Color>;

fn color<T, U>(core: &Core<T, U>, id: NodeId) -> Color {
    if id == NIL {
        Color::Black
    } else {
        core.node(id).meta
    }
}

/// Color writes through the sentinel are dropped: it stays black.
fn set_color<T, U>(core: &mut Core<T, U>, id: NodeId, color: Color) {
    if id != NIL {
        core.node_mut(id).meta = color;
    }
}

/// Inserts a key-value pair as a red leaf, then climbs while the parent is
/// red: a red uncle means recolor and continue from the grandparent, a black
/// uncle means rotate an inner grandchild outward first, then recolor and
/// rotate the grandparent away, which ends the climb. The root leaves this
/// function black unconditionally.
///
/// precondition: the key is not present
pub fn insert<T, U>(core: &mut Core<T, U>, key: T, value: U) -> NodeId
where
    T: Ord,
{
    let inserted = core.insert_leaf(key, value);

    let mut curr = inserted;
    while curr != core.root && color(core, core.node(curr).parent) == Color::Red {
        let parent = core.node(curr).parent;
        // a red parent is never the root, so the grandparent exists
        let grandparent = core.node(parent).parent;
        if parent == core.node(grandparent).left {
            let uncle = core.node(grandparent).right;
            if color(core, uncle) == Color::Red {
                set_color(core, parent, Color::Black);
                set_color(core, uncle, Color::Black);
                set_color(core, grandparent, Color::Red);
                curr = grandparent;
            } else {
                if curr == core.node(parent).right {
                    curr = parent;
                    core.rotate_left(curr);
                }
                let parent = core.node(curr).parent;
                let grandparent = core.node(parent).parent;
                set_color(core, parent, Color::Black);
                set_color(core, grandparent, Color::Red);
                core.rotate_right(grandparent);
            }
        } else {
            let uncle = core.node(grandparent).left;
            if color(core, uncle) == Color::Red {
                set_color(core, parent, Color::Black);
                set_color(core, uncle, Color::Black);
                set_color(core, grandparent, Color::Red);
                curr = grandparent;
            } else {
                if curr == core.node(parent).left {
                    curr = parent;
                    core.rotate_right(curr);
                }
                let parent = core.node(curr).parent;
                let grandparent = core.node(parent).parent;
                set_color(core, parent, Color::Black);
                set_color(core, grandparent, Color::Red);
                core.rotate_left(grandparent);
            }
        }
    }

    let root = core.root;
    set_color(core, root, Color::Black);
    inserted
}

/// Removes the node at `target` along the general path and returns its entry.
///
/// A node with two children trades entries with its in-order successor and
/// the successor (which has at most one child) is spliced out instead; a node
/// with at most one child is transplanted away directly. If the node that
/// actually left the structure was black, the child that took its place is
/// handed to [`fixup_remove`] to restore the black-height invariant.
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
    let removed_color = core.node(target).meta;
    core.transplant(target, child);
    let entry = core.release(target);

    if removed_color == Color::Black {
        fixup_remove(core, child, parent);
    }
    entry
}

/// Returns `true` if `target` is the root of a tree holding exactly three
/// nodes with both children present.
pub fn is_three_node_root<T, U>(core: &Core<T, U>, target: NodeId) -> bool {
    core.len() == 3
        && target == core.root
        && core.node(target).left != NIL
        && core.node(target).right != NIL
}

/// Bespoke small-tree path: removing the root of an exactly-three-node tree
/// bypasses the general fix-up. The left child (the smaller key) is
/// promoted to a black root and the right child is re-hung as its red right
/// child. The general path would promote the in-order successor, i.e. the
/// larger key; the divergence is pinned by a differential test in `map.rs`.
///
/// precondition: `is_three_node_root` holds for the current root
pub fn remove_three_node_root<T, U>(core: &mut Core<T, U>) -> Entry<T, U> {
    let old_root = core.root;
    let left = core.node(old_root).left;
    let right = core.node(old_root).right;

    core.node_mut(left).parent = NIL;
    core.node_mut(left).right = right;
    core.node_mut(left).meta = Color::Black;
    core.node_mut(right).parent = left;
    core.node_mut(right).meta = Color::Red;
    core.root = left;
    core.release(old_root)
}

/// Restores the black-height invariant after a black node left the structure,
/// climbing from the node that took its place. `curr` may be `NIL` (the
/// sentinel carries no parent link, so the parent rides along):
///
/// - red sibling: recolor it black and the parent red, rotate the parent
///   toward the sibling, recompute the sibling;
/// - sibling with two black children: recolor the sibling red and move the
///   deficit up to the parent;
/// - otherwise: if the far nephew is black, rotate within the sibling subtree
///   so the red nephew becomes the outer one; then the sibling takes the
///   parent's color, the parent and far nephew go black, and rotating the
///   parent away ends the climb.
///
/// The node the climb ends on is recolored black regardless of the path
/// taken.
fn fixup_remove<T, U>(core: &mut Core<T, U>, mut curr: NodeId, mut parent: NodeId) {
    while curr != core.root && color(core, curr) == Color::Black {
        if curr == core.node(parent).left {
            let mut sibling = core.node(parent).right;
            if color(core, sibling) == Color::Red {
                set_color(core, sibling, Color::Black);
                set_color(core, parent, Color::Red);
                core.rotate_left(parent);
                sibling = core.node(parent).right;
            }
            if color(core, core.node(sibling).left) == Color::Black
                && color(core, core.node(sibling).right) == Color::Black
            {
                set_color(core, sibling, Color::Red);
                curr = parent;
                parent = core.node(curr).parent;
            } else {
                if color(core, core.node(sibling).right) == Color::Black {
                    let near = core.node(sibling).left;
                    set_color(core, near, Color::Black);
                    set_color(core, sibling, Color::Red);
                    core.rotate_right(sibling);
                    sibling = core.node(parent).right;
                }
                let parent_color = color(core, parent);
                set_color(core, sibling, parent_color);
                set_color(core, parent, Color::Black);
                let far = core.node(sibling).right;
                set_color(core, far, Color::Black);
                core.rotate_left(parent);
                curr = core.root;
            }
        } else {
            let mut sibling = core.node(parent).left;
            if color(core, sibling) == Color::Red {
                set_color(core, sibling, Color::Black);
                set_color(core, parent, Color::Red);
                core.rotate_right(parent);
                sibling = core.node(parent).left;
            }
            if color(core, core.node(sibling).left) == Color::Black
                && color(core, core.node(sibling).right) == Color::Black
            {
                set_color(core, sibling, Color::Red);
                curr = parent;
                parent = core.node(curr).parent;
            } else {
                if color(core, core.node(sibling).left) == Color::Black {
                    let near = core.node(sibling).right;
                    set_color(core, near, Color::Black);
                    set_color(core, sibling, Color::Red);
                    core.rotate_left(sibling);
                    sibling = core.node(parent).left;
                }
                let parent_color = color(core, parent);
                set_color(core, sibling, parent_color);
                set_color(core, parent, Color::Black);
                let far = core.node(sibling).left;
                set_color(core, far, Color::Black);
                core.rotate_right(parent);
                curr = core.root;
            }
        }
    }
    set_color(core, curr, Color::Black);
}

/// Walks the whole subtree checking ordering, parent links, the red-red
/// prohibition, and equal black counts on every path, panicking on the first
/// violation. Returns the subtree's black-height. Test support.
pub fn audit<T, U>(core: &Core<T, U>, id: NodeId) -> usize
where
    T: Ord,
{
    if id == NIL {
        return 0;
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
    if node.meta == Color::Red {
        assert_eq!(color(core, node.left), Color::Black);
        assert_eq!(color(core, node.right), Color::Black);
    }
    let left_height = audit(core, node.left);
    let right_height = audit(core, node.right);
    assert_eq!(left_height, right_height);
    left_height + (node.meta == Color::Black) as usize
}
