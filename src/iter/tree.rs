use std::{
    borrow::Borrow,
    iter::FusedIterator,
    ops::{Bound, RangeBounds},
    vec,
};

use crate::{Arena, Handle, Node, Tree};

impl<K, V> Tree<K, V> {
    /// Gets an iterator over the entries of the tree, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use remerge::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert_multi(3, "c");
    /// tree.insert_multi(1, "a");
    /// tree.insert_multi(3, "d");
    ///
    /// let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [1, 3, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: self.root.nodes(),
            front: self.root.first(),
            back: self.root.last(),
            len: self.len,
        }
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the tree, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Every element comparing equal to `key`, in order.
    pub fn equal_range<Q>(&self, key: &Q) -> Range<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Range::new(self, self.root.lower_bound(key), self.root.upper_bound(key))
    }

    /// Constructs a double-ended iterator over a sub-range of elements.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`, or if range `start == end` and both
    /// bounds are `Excluded`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Excluded, Included};
    /// use remerge::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for k in [8, 3, 5, 1, 13] {
    ///     tree.insert_unique(k, ());
    /// }
    /// let keys: Vec<_> = tree.range(3..8).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [3, 5]);
    /// let keys: Vec<_> = tree.range((Excluded(3), Included(8))).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [5, 8]);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> Range<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        R: RangeBounds<Q>,
    {
        match (range.start_bound(), range.end_bound()) {
            (Bound::Excluded(s), Bound::Excluded(e)) if s == e => {
                panic!("range start and end are equal and excluded in Tree")
            }
            (Bound::Included(s) | Bound::Excluded(s), Bound::Included(e) | Bound::Excluded(e))
                if s > e =>
            {
                panic!("range start is greater than range end in Tree")
            }
            _ => {}
        }

        let start = match range.start_bound() {
            Bound::Included(key) => self.root.lower_bound(key),
            Bound::Excluded(key) => self.root.upper_bound(key),
            Bound::Unbounded => self.root.first(),
        };
        let end = match range.end_bound() {
            Bound::Included(key) => self.root.upper_bound(key),
            Bound::Excluded(key) => self.root.lower_bound(key),
            Bound::Unbounded => None,
        };
        Range::new(self, start, end)
    }
}

/// An iterator over the entries of a [`Tree`], walking parent links.
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    front: Option<Handle>,
    back: Option<Handle>,
    len: usize,
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.front?;
        self.len -= 1;
        self.front = self.nodes.next(node);
        let node = self.nodes.get(node);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<(&'a K, &'a V)> {
        self.next_back()
    }

    fn min(mut self) -> Option<(&'a K, &'a V)>
    where
        (&'a K, &'a V): Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<(&'a K, &'a V)>
    where
        (&'a K, &'a V): Ord,
    {
        self.next_back()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 {
            return None;
        }
        let node = self.back?;
        self.len -= 1;
        self.back = self.nodes.prev(node);
        let node = self.nodes.get(node);
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

/// An iterator over the keys of a [`Tree`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over the values of a [`Tree`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a V> {
        self.next_back()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

/// An owning iterator over the entries of a [`Tree`], in sorted order.
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIterator for Tree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.drain_sorted().into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An owning iterator over the keys of a [`Tree`], in sorted order.
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

/// An iterator over a sub-range of the entries of a [`Tree`]: from a
/// lower-bound position up to, but excluding, an upper-bound position.
pub struct Range<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    // Both ends are inclusive; `None` once the range is exhausted.
    front: Option<Handle>,
    back: Option<Handle>,
}

impl<'a, K, V> Range<'a, K, V> {
    /// `start` is the first node in range, `end` the first node past it
    /// (`None` for the end marker). `start` must not come after `end`.
    pub(crate) fn new(tree: &'a Tree<K, V>, start: Option<Handle>, end: Option<Handle>) -> Self {
        let nodes = tree.raw().nodes();
        if start == end {
            return Range {
                nodes,
                front: None,
                back: None,
            };
        }
        let back = match end {
            Some(end) => nodes.prev(end),
            None => tree.raw().last(),
        };
        Range {
            nodes,
            front: start,
            back,
        }
    }

    fn exhaust_if_met(&mut self, node: Handle) {
        if self.front == Some(node) && self.back == Some(node) {
            self.front = None;
            self.back = None;
        }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.front?;
        self.exhaust_if_met(node);
        if self.front.is_some() {
            self.front = self.nodes.next(node);
        }
        let node = self.nodes.get(node);
        Some((&node.key, &node.value))
    }

    fn last(mut self) -> Option<(&'a K, &'a V)> {
        self.next_back()
    }
}

impl<'a, K, V> DoubleEndedIterator for Range<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        let node = self.back?;
        self.exhaust_if_met(node);
        if self.back.is_some() {
            self.back = self.nodes.prev(node);
        }
        let node = self.nodes.get(node);
        Some((&node.key, &node.value))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    /// Builds a tree with unique keys: later duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    /// Inserts every pair whose key is not present yet.
    #[inline]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        iter.into_iter().for_each(move |(k, v)| {
            self.insert_unique(k, v);
        });
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}
