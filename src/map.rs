/// A recoverable condition reported by a map operation.
///
/// Every variant leaves the map exactly as it was: no rotation, recoloring, or
/// allocation happens before the condition is detected, so repeating a failed
/// operation yields the same result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// An insertion found its key already present.
    #[error("key is already present")]
    DuplicateKey,
    /// A removal found no node with the requested key.
    #[error("key is not present")]
    NotFound,
    /// A removal was attempted on a map with no entries.
    #[error("map is empty")]
    EmptyTree,
}

/// The contract shared by both balancing strategies.
///
/// `AvlMap` and `RedBlackMap` expose the same operations with the same
/// semantics; this trait makes them interchangeable behind one interface, so
/// generic callers (and the differential tests) need not care which fix-up
/// machinery runs underneath.
pub trait OrderedMap<T, U>
where
    T: Ord,
{
    /// Borrowing iterator yielding entries in ascending key order.
    type Iter<'a>: Iterator<Item = (&'a T, &'a U)>
    where
        Self: 'a,
        T: 'a,
        U: 'a;

    /// Inserts a key-value pair, rejecting duplicates with
    /// [`Error::DuplicateKey`].
    fn insert(&mut self, key: T, value: U) -> Result<(), Error>;

    /// Removes a key and returns its pair, reporting [`Error::EmptyTree`] on
    /// an empty map and [`Error::NotFound`] for an absent key.
    fn remove(&mut self, key: &T) -> Result<(T, U), Error>;

    /// Returns a reference to the value associated with `key`, if any.
    fn get(&self, key: &T) -> Option<&U>;

    /// Returns the number of entries in the map.
    fn len(&self) -> usize;

    /// Returns `true` if the map has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    fn clear(&mut self);

    /// Returns an in-order iterator over the map.
    fn iter(&self) -> Self::Iter<'_>;
}
