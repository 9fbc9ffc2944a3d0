use crate::entry::Entry;

/// Index of a node inside its tree's slab.
pub type NodeId = usize;

/// Reserved id standing in for every absent child and the root's absent
/// parent.
///
/// No slot backs it: the strategy modules read a fixed metadata value through
/// it (black for the color-balanced variant, height -1 for the height-balanced
/// one), so fix-up code can inspect a child without a presence check first.
pub const NIL: NodeId = usize::MAX;

/// Balance metadata carried by every node; one implementing type per
/// strategy.
pub trait Balance {
    /// Metadata of a node in the just-inserted state.
    fn fresh() -> Self;
}

/// An internal node of a balanced binary search tree.
///
/// Links are slab indices and carry no ownership; in particular the parent
/// back-reference exists only so rotations and fix-ups can walk upward.
pub struct Node<T, U, M> {
    pub entry: Entry<T, U>,
    pub meta: M,
    pub left: NodeId,
    pub right: NodeId,
    pub parent: NodeId,
}

impl<T, U, M> Node<T, U, M>
where
    M: Balance,
{
    /// Constructs an unlinked node in the just-inserted state. Key uniqueness
    /// is the inserting caller's responsibility.
    pub fn new(key: T, value: U) -> Self {
        Node {
            entry: Entry { key, value },
            meta: M::fresh(),
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }
}
