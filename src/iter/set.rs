use std::iter::FusedIterator;

use crate::{IntoKeys, Keys, MultiSet, Set};

/// An iterator over the elements of a [`Set`] or [`MultiSet`], in sorted
/// order. Equal elements of a multiset are yielded once per occurrence.
pub struct SetIter<'a, T> {
    inner: Keys<'a, T, ()>,
}

impl<'a, T> SetIter<'a, T> {
    pub(crate) fn new(inner: Keys<'a, T, ()>) -> Self {
        SetIter { inner }
    }
}

impl<'a, T> Iterator for SetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }

    fn min(mut self) -> Option<&'a T>
    where
        &'a T: Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<&'a T>
    where
        &'a T: Ord,
    {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for SetIter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for SetIter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for SetIter<'_, T> {}

impl<T> Clone for SetIter<'_, T> {
    fn clone(&self) -> Self {
        SetIter {
            inner: self.inner.clone(),
        }
    }
}

/// An owning iterator over the elements of a [`Set`] or [`MultiSet`].
pub struct SetIntoIter<T> {
    inner: IntoKeys<T, ()>,
}

impl<T> Iterator for SetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for SetIntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for SetIntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for SetIntoIter<T> {}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> SetIter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = SetIntoIter<T>;

    fn into_iter(self) -> SetIntoIter<T> {
        SetIntoIter {
            inner: self.tree.into_keys(),
        }
    }
}

impl<'a, T> IntoIterator for &'a MultiSet<T> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> SetIter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for MultiSet<T> {
    type Item = T;
    type IntoIter = SetIntoIter<T>;

    fn into_iter(self) -> SetIntoIter<T> {
        SetIntoIter {
            inner: self.tree.into_keys(),
        }
    }
}

impl<T: Ord> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Set<T> {
        let mut set = Set::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for Set<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |elem| {
            self.insert(elem);
        });
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for Set<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord> FromIterator<T> for MultiSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> MultiSet<T> {
        let mut set = MultiSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for MultiSet<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |elem| self.insert(elem));
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for MultiSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(test)]
mod test {
    use crate::{MultiSet, Set};
    use pretty_assertions::assert_eq;

    #[test]
    fn set_from_iter_dedups() {
        let set: Set<i32> = [5, 1, 5, 3, 1].into_iter().collect();
        assert_eq!(3, set.len());
        assert_eq!(vec![1, 3, 5], set.iter().copied().collect::<Vec<_>>());
        assert_eq!(vec![5, 3, 1], set.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn multiset_from_iter_keeps_all() {
        let set: MultiSet<i32> = [5, 1, 5, 3, 1].into_iter().collect();
        assert_eq!(5, set.len());
        let mut iter = set.iter();
        assert_eq!(5, iter.len());
        assert_eq!(Some(&1), iter.next());
        assert_eq!(Some(&5), iter.next_back());
        assert_eq!(vec![1, 3, 5], iter.copied().collect::<Vec<_>>());
        assert_eq!(vec![1, 1, 3, 5, 5], set.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn extend_by_reference() {
        let source = [2, 4, 2];
        let mut set: Set<i32> = Set::new();
        set.extend(&source);
        let mut multi: MultiSet<i32> = MultiSet::new();
        multi.extend(&source);
        assert_eq!(vec![2, 4], (&set).into_iter().copied().collect::<Vec<_>>());
        assert_eq!(vec![2, 2, 4], (&multi).into_iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn empty_iterators() {
        let set: Set<u8> = Set::new();
        assert_eq!(None, set.iter().next());
        assert_eq!(None, set.iter().max());
        let multi: MultiSet<u8> = MultiSet::new();
        assert_eq!(0, multi.into_iter().len());
    }
}
