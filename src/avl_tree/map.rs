use crate::avl_tree::tree::{self, Height};
use crate::entry::Entry;
use crate::map::{Error, OrderedMap};
use crate::tree::node::NIL;
use crate::tree::{IntoIter, Iter};

/// An ordered map implemented using a height-balanced (AVL) tree.
///
/// Every node stores the height of its subtree; after each insertion or
/// removal the heights along the mutated path are recomputed and one of four
/// rotation cases restores the invariant that the two child subtrees of any
/// node differ in height by at most one.
///
/// # Examples
///
/// ```
/// use balanced_collections::avl_tree::AvlMap;
/// use balanced_collections::Error;
///
/// let mut map = AvlMap::new();
/// assert_eq!(map.insert(0, "a"), Ok(()));
/// assert_eq!(map.insert(3, "b"), Ok(()));
/// assert_eq!(map.insert(0, "c"), Err(Error::DuplicateKey));
///
/// assert_eq!(map.get(&0), Some(&"a"));
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.remove(&0), Ok((0, "a")));
/// assert_eq!(map.remove(&1), Err(Error::NotFound));
/// ```
pub struct AvlMap<T, U> {
    core: tree::Core<T, U>,
}

impl<T, U> AvlMap<T, U> {
    /// Constructs a new, empty `AvlMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// ```
    pub fn new() -> Self {
        AvlMap {
            core: tree::Core::new(),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists the
    /// map is left unchanged and [`Error::DuplicateKey`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    /// use balanced_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(1, 1), Ok(()));
    /// assert_eq!(map.insert(1, 2), Err(Error::DuplicateKey));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Result<(), Error>
    where
        T: Ord,
    {
        if self.core.find(&key) != NIL {
            return Err(Error::DuplicateKey);
        }
        tree::insert(&mut self.core, key, value);
        Ok(())
    }

    /// Removes a key from the map, returning the associated key-value pair.
    /// Reports [`Error::EmptyTree`] if the map has no entries and
    /// [`Error::NotFound`] if the key is absent; the map is unchanged in both
    /// cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    /// use balanced_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.remove(&1), Ok((1, 1)));
    /// assert_eq!(map.remove(&1), Err(Error::EmptyTree));
    /// ```
    pub fn remove(&mut self, key: &T) -> Result<(T, U), Error>
    where
        T: Ord,
    {
        if self.core.is_empty() {
            return Err(Error::EmptyTree);
        }
        let target = self.core.find(key);
        if target == NIL {
            return Err(Error::NotFound);
        }
        let Entry { key, value } = tree::remove(&mut self.core, target);
        Ok((key, value))
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &T) -> bool
    where
        T: Ord,
    {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a
    /// particular key, or `None` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &T) -> Option<&U>
    where
        T: Ord,
    {
        self.core.get(key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular
    /// key, or `None` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &T) -> Option<&mut U>
    where
        T: Ord,
    {
        self.core.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Clears the map, removing all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Returns the minimum key of the map, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        match self.core.root {
            NIL => None,
            root => Some(&self.core.node(self.core.min_node(root)).entry.key),
        }
    }

    /// Returns the maximum key of the map, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        match self.core.root {
            NIL => None,
            root => Some(&self.core.node(self.core.max_node(root)).entry.key),
        }
    }

    /// Returns an iterator over the map yielding key-value pairs in ascending
    /// key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlMapIter<'_, T, U> {
        AvlMapIter {
            inner: self.core.iter(),
        }
    }

    /// Verifies every structural invariant of the tree, panicking on the
    /// first violation. Test support.
    #[doc(hidden)]
    pub fn assert_invariants(&self)
    where
        T: Ord,
    {
        tree::audit(&self.core, self.core.root);
        assert_eq!(self.iter().count(), self.len());
    }

    /// Pre-order walk yielding each key with its stored subtree height, which
    /// pins the exact tree shape. Test support.
    #[doc(hidden)]
    pub fn preorder_heights(&self) -> Vec<(&T, i32)> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        if self.core.root != NIL {
            stack.push(self.core.root);
        }
        while let Some(id) = stack.pop() {
            let node = self.core.node(id);
            out.push((&node.entry.key, node.meta));
            if node.right != NIL {
                stack.push(node.right);
            }
            if node.left != NIL {
                stack.push(node.left);
            }
        }
        out
    }
}

impl<T, U> OrderedMap<T, U> for AvlMap<T, U>
where
    T: Ord,
{
    type Iter<'a> = AvlMapIter<'a, T, U>
    where
        Self: 'a,
        T: 'a,
        U: 'a;

    fn insert(&mut self, key: T, value: U) -> Result<(), Error> {
        AvlMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &T) -> Result<(T, U), Error> {
        AvlMap::remove(self, key)
    }

    fn get(&self, key: &T) -> Option<&U> {
        AvlMap::get(self, key)
    }

    fn len(&self) -> usize {
        AvlMap::len(self)
    }

    fn clear(&mut self) {
        AvlMap::clear(self)
    }

    fn iter(&self) -> AvlMapIter<'_, T, U> {
        AvlMap::iter(self)
    }
}

impl<T, U> IntoIterator for AvlMap<T, U> {
    type IntoIter = AvlMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        AvlMapIntoIter {
            inner: self.core.into_iter(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a AvlMap<T, U> {
    type IntoIter = AvlMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned
/// entries.
pub struct AvlMapIntoIter<T, U> {
    inner: IntoIter<T, U, Height>,
}

impl<T, U> Iterator for AvlMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An iterator for `AvlMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields
/// immutable references.
pub struct AvlMapIter<'a, T, U> {
    inner: Iter<'a, T, U, Height>,
}

impl<'a, T, U> Iterator for AvlMapIter<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T, U> Default for AvlMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::AvlMap;
    use crate::map::Error;

    #[test]
    fn test_len_empty() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = AvlMap::new();
        assert_eq!(map.insert(1, 1), Ok(()));
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut map = AvlMap::new();
        assert_eq!(map.insert(1, 1), Ok(()));
        assert_eq!(map.insert(1, 3), Err(Error::DuplicateKey));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&1));
        map.assert_invariants();
    }

    #[test]
    fn test_remove() {
        let mut map = AvlMap::new();
        map.insert(1, 1).unwrap();
        assert_eq!(map.remove(&1), Ok((1, 1)));
        assert!(!map.contains_key(&1));
    }

    #[test]
    fn test_remove_empty() {
        let mut map: AvlMap<u32, u32> = AvlMap::new();
        assert_eq!(map.remove(&1), Err(Error::EmptyTree));
    }

    #[test]
    fn test_remove_not_found_leaves_map_unchanged() {
        let mut map = AvlMap::new();
        map.insert(1, 1).unwrap();
        map.insert(3, 3).unwrap();
        assert_eq!(map.remove(&2), Err(Error::NotFound));
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            vec![(&1, &1), (&3, &3)],
        );
        map.assert_invariants();
    }

    #[test]
    fn test_get_mut() {
        let mut map = AvlMap::new();
        map.insert(1, 1).unwrap();
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_min_max() {
        let mut map = AvlMap::new();
        map.insert(1, 1).unwrap();
        map.insert(3, 3).unwrap();
        map.insert(5, 5).unwrap();

        assert_eq!(map.min(), Some(&1));
        assert_eq!(map.max(), Some(&5));
    }

    // three names inserted in root/left/right order leave a balanced root
    #[test]
    fn test_three_names_balanced_root() {
        let mut map = AvlMap::new();
        map.insert("Beto", 0).unwrap();
        map.insert("Ana", 1).unwrap();
        map.insert("Carlos", 2).unwrap();

        let root = map.core.node(map.core.root);
        assert_eq!(root.entry.key, "Beto");
        assert_eq!(root.meta, 1);
        assert_eq!(map.core.node(root.left).entry.key, "Ana");
        assert_eq!(map.core.node(root.right).entry.key, "Carlos");
        map.assert_invariants();
    }

    // ascending insertions force the right-right rotation case
    #[test]
    fn test_ascending_insertions_rebalance() {
        let mut map = AvlMap::new();
        for key in 0..64 {
            map.insert(key, key).unwrap();
            map.assert_invariants();
        }
        assert_eq!(map.len(), 64);
    }

    // descending insertions force the left-left rotation case
    #[test]
    fn test_descending_insertions_rebalance() {
        let mut map = AvlMap::new();
        for key in (0..64).rev() {
            map.insert(key, key).unwrap();
            map.assert_invariants();
        }
        assert_eq!(map.len(), 64);
    }

    // zig-zag insertions force both double-rotation cases
    #[test]
    fn test_double_rotation_cases() {
        let mut map = AvlMap::new();
        for &key in &[50, 25, 40, 75, 60, 30, 35] {
            map.insert(key, key).unwrap();
            map.assert_invariants();
        }
        assert_eq!(
            map.iter().map(|pair| *pair.0).collect::<Vec<_>>(),
            vec![25, 30, 35, 40, 50, 60, 75],
        );
    }

    #[test]
    fn test_preorder_heights_pins_shape() {
        let mut map = AvlMap::new();
        for &key in &[2, 1, 3] {
            map.insert(key, key).unwrap();
        }
        assert_eq!(map.preorder_heights(), vec![(&2, 1), (&1, 0), (&3, 0)]);
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        let mut map = AvlMap::new();
        for &key in &[50, 25, 75, 10, 30, 60, 90] {
            map.insert(key, key).unwrap();
        }
        assert_eq!(map.remove(&50), Ok((50, 50)));
        map.assert_invariants();
        assert_eq!(map.get(&50), None);
        assert_eq!(
            map.iter().map(|pair| *pair.0).collect::<Vec<_>>(),
            vec![10, 25, 30, 60, 75, 90],
        );
    }

    #[test]
    fn test_remove_rebalances_whole_path() {
        let mut map = AvlMap::new();
        for key in 0..128 {
            map.insert(key, key).unwrap();
        }
        for key in (64..128).rev() {
            assert_eq!(map.remove(&key), Ok((key, key)));
            map.assert_invariants();
        }
        assert_eq!(map.len(), 64);
    }

    #[test]
    fn test_into_iter() {
        let mut map = AvlMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut map = AvlMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
    }
}
