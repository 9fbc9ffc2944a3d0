use crate::entry::Entry;
use crate::map::{Error, OrderedMap};
use crate::red_black_tree::tree::{self, Color};
use crate::tree::node::NIL;
use crate::tree::{IntoIter, Iter};

/// An ordered map implemented using a red-black tree.
///
/// Every node carries a color bit; the tree maintains a black root, forbids a
/// red node from having a red child, and keeps the count of black nodes equal
/// on every path from the root down to an absent child. Insertions and
/// removals restore those invariants with the classic recoloring and rotation
/// case analysis.
///
/// # Examples
///
/// ```
/// use balanced_collections::red_black_tree::RedBlackMap;
/// use balanced_collections::Error;
///
/// let mut map = RedBlackMap::new();
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
pub struct RedBlackMap<T, U> {
    core: tree::Core<T, U>,
}

impl<T, U> RedBlackMap<T, U> {
    /// Constructs a new, empty `RedBlackMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap {
            core: tree::Core::new(),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists the
    /// map is left unchanged and [`Error::DuplicateKey`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackMap;
    /// use balanced_collections::Error;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// Removing the root of an exactly-three-node tree takes a dedicated
    /// shortcut that promotes the smaller remaining key to the root; see
    /// `tree::remove_three_node_root`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackMap;
    /// use balanced_collections::Error;
    ///
    /// let mut map = RedBlackMap::new();
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
        let entry = if tree::is_three_node_root(&self.core, target) {
            tree::remove_three_node_root(&mut self.core)
        } else {
            tree::remove(&mut self.core, target)
        };
        let Entry { key, value } = entry;
        Ok((key, value))
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<'_, T, U> {
        RedBlackMapIter {
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
        if self.core.root != NIL {
            assert_eq!(self.core.node(self.core.root).meta, Color::Black);
            assert_eq!(self.core.node(self.core.root).parent, NIL);
        }
        tree::audit(&self.core, self.core.root);
        assert_eq!(self.iter().count(), self.len());
    }
}

impl<T, U> OrderedMap<T, U> for RedBlackMap<T, U>
where
    T: Ord,
{
    type Iter<'a> = RedBlackMapIter<'a, T, U>
    where
        Self: 'a,
        T: 'a,
        U: 'a;

    fn insert(&mut self, key: T, value: U) -> Result<(), Error> {
        RedBlackMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &T) -> Result<(T, U), Error> {
        RedBlackMap::remove(self, key)
    }

    fn get(&self, key: &T) -> Option<&U> {
        RedBlackMap::get(self, key)
    }

    fn len(&self) -> usize {
        RedBlackMap::len(self)
    }

    fn clear(&mut self) {
        RedBlackMap::clear(self)
    }

    fn iter(&self) -> RedBlackMapIter<'_, T, U> {
        RedBlackMap::iter(self)
    }
}

impl<T, U> IntoIterator for RedBlackMap<T, U> {
    type IntoIter = RedBlackMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        RedBlackMapIntoIter {
            inner: self.core.into_iter(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a RedBlackMap<T, U> {
    type IntoIter = RedBlackMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned
/// entries.
pub struct RedBlackMapIntoIter<T, U> {
    inner: IntoIter<T, U, Color>,
}

impl<T, U> Iterator for RedBlackMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields
/// immutable references.
pub struct RedBlackMapIter<'a, T, U> {
    inner: Iter<'a, T, U, Color>,
}

impl<'a, T, U> Iterator for RedBlackMapIter<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T, U> Default for RedBlackMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}
