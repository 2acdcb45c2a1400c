use std::{borrow::Borrow, fmt};

use crate::{Cursor, CursorMut, Set, SetIter, Tree};

impl<T> Set<T> {
    pub const fn new() -> Self {
        Self { tree: Tree::new() }
    }
}

impl<T> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Set<T> {
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter::new(self.tree.keys())
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

    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_key_value(key).map(|(k, _)| k)
    }

    /// A cursor on `key`, or at the end if it is absent.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, T, ()>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key)
    }
}

impl<T: Ord> Set<T> {
    /// Adds `key` to the set. Returns whether it was newly inserted; an
    /// element already present is left as is.
    pub fn insert(&mut self, key: T) -> bool {
        self.tree.insert_unique(key, ())
    }

    /// A cursor on `key`, or at the end if it is absent.
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

    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).is_some()
    }

    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove_entry(key).map(|kv| kv.0)
    }

    /// Moves every element of `other` into `self`, leaving `other` empty.
    /// Elements present in both sets are kept once.
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge_unique(&mut other.tree);
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq> Eq for Set<T> {}
