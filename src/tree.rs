use std::{borrow::Borrow, fmt, mem};

use log::debug;

use crate::{
    Arena, Cursor, CursorMut, Handle, Node, Root, Tree,
    root::{Placement, Slot},
};

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Tree<K, V> {
    pub const fn new() -> Self {
        Tree {
            root: Root::new(),
            len: 0,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The largest number of elements a tree can hold.
    pub const fn max_size(&self) -> usize {
        Handle::MAX
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        if self.len > 0 {
            debug!("clear: dropping {} nodes", self.len);
        }
        self.root.clear();
        self.len = 0;
    }

    /// Exchanges the contents of two trees in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.root.first().map(|h| self.entry(h))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root.last().map(|h| self.entry(h))
    }

    pub(crate) fn raw(&self) -> &Root<K, V> {
        &self.root
    }

    pub(crate) fn entry(&self, node: Handle) -> (&K, &V) {
        let node = self.root.node(node);
        (&node.key, &node.value)
    }

    pub(crate) fn entry_mut(&mut self, node: Handle) -> (&K, &mut V) {
        let node = self.root.node_mut(node);
        (&node.key, &mut node.value)
    }

    /// Empties the tree, returning its elements in ascending order.
    pub(crate) fn drain_sorted(&mut self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.root.first();
        while let Some(h) = current {
            order.push(h);
            current = self.root.nodes().next(h);
        }
        let (mut nodes, _) = self.root.take_all();
        self.len = 0;
        order
            .into_iter()
            .map(|h| {
                let node = nodes.take(h);
                (node.key, node.value)
            })
            .collect()
    }
}

// Lookup.
impl<K, V> Tree<K, V> {
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root.find(key).is_some()
    }

    /// The value of the first (leftmost) element equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root.find(key).map(|h| self.entry(h))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.root.find(key)?;
        Some(self.entry_mut(node).1)
    }

    /// A cursor on the first (leftmost) element equal to `key`, or at the end
    /// if there is none.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(self, self.root.find(key))
    }

    /// A cursor on the first element not less than `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(self, self.root.lower_bound(key))
    }

    /// A cursor on the first element greater than `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(self, self.root.upper_bound(key))
    }

    /// How many elements compare equal to `key`.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.equal_range(key).count()
    }

    pub fn cursor_front(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, self.root.first())
    }

    pub fn cursor_back(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, self.root.last())
    }

    /// A cursor at the one-past-the-end position.
    pub fn cursor_end(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, None)
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V> {
        let first = self.root.first();
        CursorMut::new(self, first)
    }

    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.root.find(key);
        CursorMut::new(self, node)
    }

    pub fn lower_bound_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.root.lower_bound(key);
        CursorMut::new(self, node)
    }
}

// Mutation.
impl<K: Ord, V> Tree<K, V> {
    /// Inserts `key` unless an equal key is already present, in which case
    /// the tree is unchanged and `false` is returned.
    pub fn insert_unique(&mut self, key: K, value: V) -> bool {
        self.insert_unique_entry(key, value).1
    }

    /// Inserts `key` even if equal keys are present. Ties go to the smaller
    /// of the two subtrees of the node they compare equal to.
    pub fn insert_multi(&mut self, key: K, value: V) {
        let slot = self.root.slot_for(&key, Placement::Multi);
        self.link(key, value, slot);
    }

    /// Returns the node holding `key` and whether it was just inserted.
    pub(crate) fn insert_unique_entry(&mut self, key: K, value: V) -> (Handle, bool) {
        match self.root.slot_for(&key, Placement::Unique) {
            Slot::Occupied(existing) => (existing, false),
            slot => (self.link(key, value, slot), true),
        }
    }

    fn link(&mut self, key: K, value: V, slot: Slot) -> Handle {
        let node = self.root.alloc(key, value);
        self.root.attach(node, slot);
        self.len += 1;
        node
    }

    /// Removes the first (leftmost) element equal to `key` and returns its
    /// value. Absent keys are a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.root.find(key)?;
        Some(self.remove_node(node))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.root.first()?;
        Some(self.remove_node(first))
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.root.last()?;
        Some(self.remove_node(last))
    }

    pub(crate) fn remove_node(&mut self, node: Handle) -> (K, V) {
        let Node { key, value, .. } = self.root.erase(node);
        self.len -= 1;
        (key, value)
    }

    /// Moves every element of `other` into `self`, leaving `other` empty.
    /// Keys already present in `self` are not duplicated: the element that
    /// was in `self` before the merge is kept.
    pub fn merge_unique(&mut self, other: &mut Self) {
        // After a swap the incoming elements are the ones `self` started
        // with, so on a collision their value wins.
        let swapped = self.fold_smaller(other);
        let (nodes, root) = other.root.take_all();
        other.len = 0;
        let mut collisions = 0;
        for_each_preorder(nodes, root, |key, value| {
            match self.root.slot_for(&key, Placement::Unique) {
                Slot::Occupied(existing) => {
                    collisions += 1;
                    if swapped {
                        *self.entry_mut(existing).1 = value;
                    }
                }
                slot => {
                    self.link(key, value, slot);
                }
            }
        });
        if collisions > 0 {
            debug!("merge: {collisions} colliding keys collapsed");
        }
    }

    /// Moves every element of `other` into `self`, leaving `other` empty.
    pub fn merge_multi(&mut self, other: &mut Self) {
        self.fold_smaller(other);
        let (nodes, root) = other.root.take_all();
        other.len = 0;
        for_each_preorder(nodes, root, |key, value| self.insert_multi(key, value));
    }

    /// Arranges for `self` to be the larger of the two trees. Returns whether
    /// the contents were swapped to get there.
    fn fold_smaller(&mut self, other: &mut Self) -> bool {
        let swapped = self.len < other.len;
        if swapped {
            self.swap(other);
        }
        debug!(
            "merge: folding {} nodes into a tree of {}{}",
            other.len,
            self.len,
            if swapped { " (swapped)" } else { "" }
        );
        swapped
    }
}

/// Feeds the nodes of a detached tree to `f` in pre-order, freeing each node
/// as it is consumed; children are captured before their parent is freed.
fn for_each_preorder<K, V>(
    mut nodes: Arena<Node<K, V>>,
    root: Option<Handle>,
    mut f: impl FnMut(K, V),
) {
    let mut pending: Vec<Handle> = root.into_iter().collect();
    while let Some(current) = pending.pop() {
        let node = nodes.take(current);
        pending.extend(node.right);
        pending.extend(node.left);
        f(node.key, node.value);
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Tree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Tree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Tree<K, V> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Color;

    use pretty_assertions::assert_eq;

    fn keys<V>(tree: &Tree<i32, V>) -> Vec<i32> {
        tree.keys().copied().collect()
    }

    #[test]
    fn tree_ctor_works() {
        let tree = Tree::<usize, String>::new();
        assert_eq!(None, tree.first_key_value());
        assert_eq!(false, tree.contains_key(&42));
        assert!(tree.is_empty());
    }

    #[test]
    fn contains_many() {
        let mut tree = Tree::<usize, String>::new();
        assert!(tree.insert_unique(42, "forty two".to_string()));
        assert_eq!(1, tree.len());
        assert!(tree.insert_unique(0, "zero".to_string()));
        assert!(tree.insert_unique(100, "hundo".to_string()));
        assert_eq!(3, tree.len());

        assert_eq!(true, tree.contains_key(&42));
        assert_eq!(true, tree.contains_key(&0));
        assert_eq!(true, tree.contains_key(&100));
        assert_eq!(false, tree.contains_key(&1));
        assert_eq!(false, tree.contains_key(&1000));
    }

    #[test]
    fn first_and_last() {
        let mut tree = Tree::<usize, String>::new();
        assert_eq!(None, tree.first_key_value());
        assert_eq!(None, tree.last_key_value());

        let forty_two = "forty two".to_string();
        tree.insert_unique(42, forty_two.clone());
        assert_eq!(Some((&42, &forty_two)), tree.first_key_value());
        assert_eq!(Some((&42, &forty_two)), tree.last_key_value());

        let zero = "zero".to_string();
        let hundo = "hundo".to_string();
        tree.insert_unique(0, zero.clone());
        tree.insert_unique(100, hundo.clone());
        assert_eq!(Some((&0, &zero)), tree.first_key_value());
        assert_eq!(Some((&100, &hundo)), tree.last_key_value());
    }

    #[test]
    fn insert_same_key_is_ignored() {
        let mut tree = Tree::<usize, String>::new();
        assert!(tree.insert_unique(42, "forty two".to_string()));
        assert!(!tree.insert_unique(42, "42".to_string()));
        assert_eq!(1, tree.len());
        assert_eq!(Some(&"forty two".to_string()), tree.get(&42));
    }

    #[test]
    fn insert_multi_keeps_duplicates() {
        let mut tree = Tree::new();
        for k in [4, 2, 4, 4, 1, 2] {
            tree.insert_multi(k, ());
        }
        assert_eq!(6, tree.len());
        assert_eq!(vec![1, 2, 2, 4, 4, 4], keys(&tree));
        assert_eq!(3, tree.count(&4));
        assert_eq!(2, tree.count(&2));
        assert_eq!(0, tree.count(&3));
    }

    #[test]
    fn get_mut_updates() {
        let mut tree = Tree::new();
        tree.insert_unique("a".to_string(), 1);
        *tree.get_mut("a").unwrap() += 41;
        assert_eq!(Some(&42), tree.get("a"));
        assert_eq!(None, tree.get_mut("b"));
    }

    #[test]
    fn pop_first_and_last() {
        let mut tree = Tree::new();
        assert_eq!(None, tree.pop_first());
        for k in [42, 0, 100] {
            tree.insert_unique(k, k * 2);
        }
        assert_eq!(Some((0, 0)), tree.pop_first());
        assert_eq!(Some((100, 200)), tree.pop_last());
        assert_eq!(Some((42, 84)), tree.pop_first());
        assert_eq!(None, tree.pop_last());
        assert_eq!(0, tree.len());
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut tree = Tree::new();
        tree.insert_unique(1, ());
        assert_eq!(None, tree.remove(&2));
        assert_eq!(1, tree.len());
        assert_eq!(Some((1, ())), tree.remove_entry(&1));
        assert_eq!(None, tree.remove(&1));
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_one_of_many_duplicates() {
        let mut tree = Tree::new();
        for v in 0..5 {
            tree.insert_multi(7, v);
        }
        tree.insert_multi(3, 99);
        assert!(tree.remove(&7).is_some());
        assert_eq!(4, tree.count(&7));
        assert_eq!(5, tree.len());
        tree.check_invariants();
    }

    #[test]
    fn clear_and_reuse() {
        let mut tree = Tree::new();
        for k in 0..32 {
            tree.insert_unique(k, ());
        }
        tree.clear();
        assert_eq!(0, tree.len());
        assert_eq!(None, tree.first_key_value());
        tree.insert_unique(5, ());
        assert_eq!(vec![5], keys(&tree));
    }

    #[test]
    fn swap_twice_restores() {
        let mut a: Tree<i32, ()> = Tree::new();
        let mut b: Tree<i32, ()> = Tree::new();
        for k in [1, 2, 3] {
            a.insert_unique(k, ());
        }
        b.insert_unique(9, ());
        a.swap(&mut b);
        assert_eq!(vec![9], keys(&a));
        assert_eq!(vec![1, 2, 3], keys(&b));
        a.swap(&mut b);
        assert_eq!(vec![1, 2, 3], keys(&a));
        assert_eq!(vec![9], keys(&b));
    }

    #[test]
    fn merge_folds_smaller_into_larger() {
        let mut small: Tree<i32, ()> = Tree::new();
        let mut large: Tree<i32, ()> = Tree::new();
        for k in [20, 25, 30] {
            small.insert_unique(k, ());
        }
        for k in [3, 7, 10, 12, 15, 17] {
            large.insert_unique(k, ());
        }
        small.merge_unique(&mut large);
        assert_eq!(9, small.len());
        assert_eq!(vec![3, 7, 10, 12, 15, 17, 20, 25, 30], keys(&small));
        assert!(large.is_empty());
        assert_eq!(None, large.first_key_value());
        small.check_invariants();
        large.check_invariants();
    }

    #[test]
    fn merge_unique_keeps_receiver_values() {
        let mut a = Tree::new();
        let mut b = Tree::new();
        a.insert_unique(1, "a1");
        for (k, v) in [(1, "b1"), (2, "b2"), (3, "b3")] {
            b.insert_unique(k, v);
        }
        // `a` is smaller, so the trees swap before folding.
        a.merge_unique(&mut b);
        assert_eq!(3, a.len());
        assert_eq!(Some(&"a1"), a.get(&1));
        assert!(b.is_empty());

        let mut c = Tree::new();
        c.insert_unique(2, "c2");
        a.merge_unique(&mut c);
        assert_eq!(Some(&"b2"), a.get(&2));
        assert_eq!(3, a.len());
    }

    #[test]
    fn merge_multi_sums() {
        let mut a = Tree::new();
        let mut b = Tree::new();
        for k in [1, 1, 2] {
            a.insert_multi(k, ());
        }
        for k in [1, 2, 2, 3] {
            b.insert_multi(k, ());
        }
        a.merge_multi(&mut b);
        assert_eq!(7, a.len());
        assert_eq!(vec![1, 1, 1, 2, 2, 2, 3], keys(&a));
        assert!(b.is_empty());
        a.check_invariants();
    }

    #[test]
    fn root_is_black_after_every_insert() {
        let mut tree = Tree::new();
        for k in [10, 5, 15, 3, 7, 12, 17, 1, 2, 4, 6] {
            tree.insert_unique(k, ());
            let root = tree.raw().root().unwrap();
            assert_eq!(Color::Black, tree.raw().node(root).color);
        }
    }

    #[test]
    fn debug_and_eq() {
        let mut a = Tree::new();
        let mut b = Tree::new();
        for k in [2, 1] {
            a.insert_unique(k, k * 10);
        }
        for k in [1, 2] {
            b.insert_unique(k, k * 10);
        }
        assert_eq!(a, b);
        assert_eq!("{1: 10, 2: 20}", format!("{a:?}"));
        b.insert_unique(3, 30);
        assert!(a != b);
    }
}
