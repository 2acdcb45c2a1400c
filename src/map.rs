use std::{borrow::Borrow, fmt, ops::Index};

use crate::{Cursor, CursorMut, Iter, KeyNotFound, Keys, Map, Tree, Values};

impl<K, V> Map<K, V> {
    pub const fn new() -> Self {
        Self { tree: Tree::new() }
    }
}

impl<K, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Map<K, V> {
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    pub const fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        self.tree.keys()
    }

    pub fn values(&self) -> Values<'_, K, V> {
        self.tree.values()
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first_key_value()
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last_key_value()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_key_value(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_mut(key)
    }

    /// Checked access to the value of `key`.
    ///
    /// ```
    /// use remerge::{KeyNotFound, Map};
    ///
    /// let map: Map<_, _> = [(1, "one")].into_iter().collect();
    /// assert_eq!(Ok(&"one"), map.at(&1));
    /// assert_eq!(Err(KeyNotFound), map.at(&2));
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key).ok_or(KeyNotFound)
    }

    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_mut(key).ok_or(KeyNotFound)
    }

    /// A cursor on `key`, or at the end if it is absent.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key)
    }
}

impl<K: Ord, V> Map<K, V> {
    /// Inserts `key` with `value` unless the key is already present, in which
    /// case the map is left untouched. Returns whether the pair went in.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.tree.insert_unique(key, value)
    }

    /// Inserts `key` with `value`, overwriting the value of an existing
    /// entry. Returns whether the key is new.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> bool {
        match self.tree.get_mut(&key) {
            Some(slot) => {
                *slot = value;
                false
            }
            None => self.tree.insert_unique(key, value),
        }
    }

    /// The value of `key`, inserting `V::default()` first if it is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let node = match self.tree.raw().find(&key) {
            Some(node) => node,
            None => self.tree.insert_unique_entry(key, V::default()).0,
        };
        self.tree.entry_mut(node).1
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove_entry(key)
    }

    /// A cursor on `key`, or at the end if it is absent. It can edit the
    /// value under it or remove the entry and move on to the next one.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find_mut(key)
    }

    pub fn lower_bound_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.lower_bound_mut(key)
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V> {
        self.tree.cursor_front_mut()
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }

    /// Moves every entry of `other` into `self`, leaving `other` empty. For a
    /// key present in both maps the entry already in `self` is kept.
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge_unique(&mut other.tree);
    }
}

impl<K, Q: ?Sized, V> Index<&Q> for Map<K, V>
where
    K: Borrow<Q>,
    Q: Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `Map`.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Map<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Map<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq> Eq for Map<K, V> {}
