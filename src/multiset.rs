use std::{borrow::Borrow, fmt, iter::FusedIterator};

use crate::{Cursor, CursorMut, MultiSet, SetIter, Tree};

impl<T> MultiSet<T> {
    pub const fn new() -> Self {
        Self { tree: Tree::new() }
    }
}

impl<T> Default for MultiSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MultiSet<T> {
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Every element in sorted order, equal elements once per occurrence.
    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter::new(self.tree.keys())
    }

    /// The total number of elements, counting every occurrence.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub const fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first_key_value().map(|(k, _)| k)
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last_key_value().map(|(k, _)| k)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
    }

    /// How many occurrences of `key` the multiset holds.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.count(key)
    }

    /// A cursor on the first occurrence of `key`, or at the end if it is
    /// absent.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, T, ()>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key)
    }

    /// A cursor on the first element not less than `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor<'_, T, ()>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.lower_bound(key)
    }

    /// A cursor on the first element greater than `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor<'_, T, ()>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.upper_bound(key)
    }

    /// Every occurrence of `key`.
    ///
    /// ```
    /// use remerge::MultiSet;
    ///
    /// let set: MultiSet<_> = ["b", "a", "b", "c"].into_iter().collect();
    /// assert_eq!(set.equal_range("b").collect::<Vec<_>>(), [&"b", &"b"]);
    /// ```
    pub fn equal_range<Q>(&self, key: &Q) -> impl DoubleEndedIterator<Item = &T> + FusedIterator + Clone
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.equal_range(key).map(|(k, _)| k)
    }
}

impl<T: Ord> MultiSet<T> {
    /// Adds an occurrence of `key`, even if equal elements are present.
    pub fn insert(&mut self, key: T) {
        self.tree.insert_multi(key, ());
    }

    /// Removes a single occurrence of `key`. Returns whether there was one.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).is_some()
    }

    /// Removes every occurrence of `key`, returning how many there were.
    pub fn remove_all<Q>(&mut self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut removed = 0;
        while self.tree.remove(key).is_some() {
            removed += 1;
        }
        removed
    }

    /// A cursor on the first occurrence of `key`, or at the end if it is
    /// absent. [`CursorMut::remove_current`] takes out exactly the
    /// occurrence under it.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, T, ()>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find_mut(key)
    }

    pub fn lower_bound_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, T, ()>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.lower_bound_mut(key)
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, ()> {
        self.tree.cursor_front_mut()
    }

    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first().map(|kv| kv.0)
    }

    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last().map(|kv| kv.0)
    }

    /// Moves every element of `other` into `self`, leaving `other` empty.
    /// Occurrences add up.
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge_multi(&mut other.tree);
    }
}

impl<T: fmt::Debug> fmt::Debug for MultiSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for MultiSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq> Eq for MultiSet<T> {}
