use std::{fmt, ptr};

use crate::{Handle, Tree};

/// A read-only position in a [`Tree`]: either on an element or at the
/// one-past-the-end marker.
///
/// The end marker sits after the largest element: moving forward from the
/// largest element reaches it and moving backward from it reaches the
/// largest element. Moving forward from the end, or backward from the
/// smallest element, leaves the cursor where it is.
pub struct Cursor<'a, K, V> {
    tree: &'a Tree<K, V>,
    current: Option<Handle>,
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value()).finish()
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn new(tree: &'a Tree<K, V>, current: Option<Handle>) -> Self {
        Cursor { tree, current }
    }

    pub(crate) fn handle(&self) -> Option<Handle> {
        self.current
    }

    /// Whether the cursor is at the one-past-the-end marker.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn key(&self) -> Option<&'a K> {
        self.key_value().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.key_value().map(|(_, v)| v)
    }

    /// The element under the cursor; `None` at the end marker.
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        let tree: &'a Tree<K, V> = self.tree;
        self.current.map(|h| tree.entry(h))
    }

    /// Steps to the in-order successor.
    pub fn move_next(&mut self) {
        if let Some(h) = self.current {
            self.current = self.tree.raw().nodes().next(h);
        }
    }

    /// Steps to the in-order predecessor.
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            None => self.tree.raw().last(),
            Some(h) => Some(self.tree.raw().nodes().prev(h).unwrap_or(h)),
        };
    }
}

/// A position in a [`Tree`] that can also modify the value under it or remove
/// the element.
pub struct CursorMut<'a, K, V> {
    tree: &'a mut Tree<K, V>,
    current: Option<Handle>,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(crate) fn new(tree: &'a mut Tree<K, V>, current: Option<Handle>) -> Self {
        CursorMut { tree, current }
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn key(&self) -> Option<&K> {
        self.current.map(|h| self.tree.entry(h).0)
    }

    pub fn value(&self) -> Option<&V> {
        self.current.map(|h| self.tree.entry(h).1)
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        let h = self.current?;
        Some(self.tree.entry_mut(h).1)
    }

    pub fn move_next(&mut self) {
        let mut cursor = self.as_cursor();
        cursor.move_next();
        self.current = cursor.handle();
    }

    pub fn move_prev(&mut self) {
        let mut cursor = self.as_cursor();
        cursor.move_prev();
        self.current = cursor.handle();
    }

    /// A read-only view of the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.tree, self.current)
    }
}

impl<K: Ord, V> CursorMut<'_, K, V> {
    /// Removes the element under the cursor and moves to its successor. At
    /// the end marker this does nothing.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let h = self.current?;
        // Remerging relinks the surviving nodes in place without reordering
        // them, equal keys included, so the successor is still next.
        let next = self.tree.raw().nodes().next(h);
        let removed = self.tree.remove_node(h);
        self.current = next;
        Some(removed)
    }
}

#[cfg(test)]
mod test {
    use crate::Tree;
    use pretty_assertions::assert_eq;

    fn sample() -> Tree<i32, &'static str> {
        let mut tree = Tree::new();
        for (k, v) in [(10, "ten"), (5, "five"), (15, "fifteen"), (3, "three")] {
            tree.insert_unique(k, v);
        }
        tree
    }

    #[test]
    fn walk_forward_to_end() {
        let tree = sample();
        let mut cursor = tree.cursor_front();
        let mut seen = vec![];
        while let Some(k) = cursor.key() {
            seen.push(*k);
            cursor.move_next();
        }
        assert_eq!(vec![3, 5, 10, 15], seen);
        assert!(cursor.is_end());
        assert_eq!(tree.cursor_end(), cursor);
        assert_eq!(None, cursor.key_value());

        // Moving past the end stays at the end.
        cursor.move_next();
        assert!(cursor.is_end());
    }

    #[test]
    fn back_from_end_is_max() {
        let tree = sample();
        let mut cursor = tree.cursor_end();
        cursor.move_prev();
        assert_eq!(Some((&15, &"fifteen")), cursor.key_value());
        assert_eq!(tree.cursor_back(), cursor);
        cursor.move_next();
        assert!(cursor.is_end());
    }

    #[test]
    fn back_from_front_saturates() {
        let tree = sample();
        let mut cursor = tree.cursor_front();
        cursor.move_prev();
        assert_eq!(Some(&3), cursor.key());
    }

    #[test]
    fn empty_tree_cursor() {
        let tree: Tree<i32, ()> = Tree::new();
        let mut cursor = tree.cursor_front();
        assert!(cursor.is_end());
        cursor.move_prev();
        assert!(cursor.is_end());
        assert_eq!(tree.cursor_end(), tree.cursor_back());
    }

    #[test]
    fn find_positions() {
        let tree = sample();
        assert_eq!(Some(&"five"), tree.find(&5).value());
        assert!(tree.find(&6).is_end());
        let mut cursor = tree.find(&5);
        cursor.move_next();
        assert_eq!(Some(&10), cursor.key());
    }

    #[test]
    fn cursor_mut_edits_and_removes() {
        let mut tree = sample();
        {
            let mut cursor = tree.find_mut(&5);
            *cursor.value_mut().unwrap() = "FIVE";
            assert_eq!(Some((5, "FIVE")), cursor.remove_current());
            assert_eq!(Some(&10), cursor.key());
            cursor.move_prev();
            assert_eq!(Some(&3), cursor.key());
        }
        assert_eq!(3, tree.len());
        assert_eq!(None, tree.get(&5));
        tree.check_invariants();
    }

    #[test]
    fn cursor_mut_drains_everything() {
        let mut tree = Tree::new();
        for k in 0..50 {
            tree.insert_unique((k * 7) % 50, ());
        }
        let mut cursor = tree.cursor_front_mut();
        let mut drained = vec![];
        while let Some((k, ())) = cursor.remove_current() {
            drained.push(k);
        }
        assert!(cursor.is_end());
        assert_eq!(None, cursor.remove_current());
        assert_eq!((0..50).collect::<Vec<_>>(), drained);
        assert!(tree.is_empty());
    }

    #[test]
    fn cursor_mut_drains_duplicates() {
        let mut tree = Tree::new();
        for k in 0..200 {
            tree.insert_multi((k * 7) % 5, ());
        }
        let mut cursor = tree.cursor_front_mut();
        let mut drained = vec![];
        while let Some((k, ())) = cursor.remove_current() {
            drained.push(k);
        }
        let mut expected: Vec<i32> = (0..200).map(|k| (k * 7) % 5).collect();
        expected.sort();
        assert_eq!(expected, drained);
        assert!(tree.is_empty());
    }

    #[test]
    fn cursor_mut_filters_duplicates_by_value() {
        let mut tree = Tree::new();
        for v in 0..120 {
            tree.insert_multi(v % 3, v);
        }
        let mut cursor = tree.cursor_front_mut();
        let mut visited = 0;
        while let Some(&v) = cursor.value() {
            visited += 1;
            if v % 2 == 1 {
                cursor.remove_current();
            } else {
                cursor.move_next();
            }
        }
        assert_eq!(120, visited);
        assert_eq!(60, tree.len());
        assert!(tree.values().all(|v| v % 2 == 0));
        assert_eq!(vec![20, 20, 20], (0..3).map(|k| tree.count(&k)).collect::<Vec<_>>());
        tree.check_invariants();
    }
}
