use std::fmt::{self, Debug};

use crate::{Arena, Color, Handle, Side};

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) color: Color,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Node<K, V> {
    /// A fresh, unlinked red node.
    pub(crate) fn new(key: K, value: V) -> Self {
        Node {
            parent: None,
            left: None,
            right: None,
            color: Color::Red,
            key,
            value,
        }
    }

    #[inline(always)]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

impl<K, V> Debug for Node<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "{:?}::({:?},{:?})",
            self.color, self.key, self.value
        ))
    }
}

// Link accessors. They take `Option<Handle>` so that an absent child reads as
// a black leaf, and writes through an absent link are ignored.
impl<K, V> Arena<Node<K, V>> {
    #[inline(always)]
    pub(crate) fn is_black(&self, node: Option<Handle>) -> bool {
        node.is_none_or(|h| self.get(h).color == Color::Black)
    }

    #[inline(always)]
    pub(crate) fn is_red(&self, node: Option<Handle>) -> bool {
        !self.is_black(node)
    }

    #[inline(always)]
    pub(crate) fn parent(&self, node: Option<Handle>) -> Option<Handle> {
        node.and_then(|h| self.get(h).parent)
    }

    #[inline(always)]
    pub(crate) fn child(&self, node: Handle, side: Side) -> Option<Handle> {
        self.get(node).child(side)
    }

    #[inline(always)]
    pub(crate) fn set_color(&mut self, node: Option<Handle>, color: Color) {
        if let Some(h) = node {
            self.get_mut(h).color = color;
        }
    }

    #[inline(always)]
    pub(crate) fn set_parent(&mut self, node: Option<Handle>, parent: Option<Handle>) {
        if let Some(h) = node {
            self.get_mut(h).parent = parent;
        }
    }

    /// Sets the `side` child link of `node`. The child's parent link is left
    /// to the caller.
    #[inline(always)]
    pub(crate) fn set_child(&mut self, node: Handle, side: Side, child: Option<Handle>) {
        let node = self.get_mut(node);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    /// Which child of its parent `node` is, or `None` for a root.
    #[inline(always)]
    pub(crate) fn side_of(&self, node: Handle) -> Option<Side> {
        let parent = self.get(node).parent?;
        if self.get(parent).left == Some(node) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    pub(crate) fn leftmost(&self, mut node: Handle) -> Handle {
        while let Some(left) = self.get(node).left {
            node = left;
        }
        node
    }

    pub(crate) fn rightmost(&self, mut node: Handle) -> Handle {
        while let Some(right) = self.get(node).right {
            node = right;
        }
        node
    }

    /// The in-order successor of `node`, walking parent links only.
    pub(crate) fn next(&self, node: Handle) -> Option<Handle> {
        // If we have a right-hand child, go down and then left as far as we
        // can.
        if let Some(right) = self.get(node).right {
            return Some(self.leftmost(right));
        }
        // No right-hand children. Everything down and left is smaller than us,
        // so any 'next' node must be in the general direction of our parent:
        // climb while we are a right-hand child, the first parent we reach
        // from its left is the answer.
        let mut current = node;
        loop {
            let parent = self.get(current).parent?;
            if self.get(parent).right != Some(current) {
                return Some(parent);
            }
            current = parent;
        }
    }

    /// The in-order predecessor of `node`; mirror image of [`Self::next`].
    pub(crate) fn prev(&self, node: Handle) -> Option<Handle> {
        if let Some(left) = self.get(node).left {
            return Some(self.rightmost(left));
        }
        let mut current = node;
        loop {
            let parent = self.get(current).parent?;
            if self.get(parent).left != Some(current) {
                return Some(parent);
            }
            current = parent;
        }
    }

    /// Counts the nodes of the subtree rooted at `node` by full traversal.
    pub(crate) fn subtree_len(&self, node: Option<Handle>) -> usize {
        let mut pending: Vec<Handle> = node.into_iter().collect();
        let mut count = 0;
        while let Some(current) = pending.pop() {
            let current = self.get(current);
            count += 1;
            pending.extend(current.left);
            pending.extend(current.right);
        }
        count
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    type Nodes = Arena<Node<i32, &'static str>>;

    // Links `child` under `parent` on `side`, fixing both directions.
    fn link(arena: &mut Nodes, parent: Handle, child: Handle, side: Side) {
        arena.set_child(parent, side, Some(child));
        arena.set_parent(Some(child), Some(parent));
    }

    //        7
    //      /   \
    //     3     10
    //    / \      \
    //   1   5      12
    fn sample() -> (Nodes, [Handle; 6]) {
        let mut arena = Arena::new();
        let n7 = arena.alloc(Node::new(7, "root"));
        let n3 = arena.alloc(Node::new(3, "left_child_7"));
        let n10 = arena.alloc(Node::new(10, "right_child_7"));
        let n1 = arena.alloc(Node::new(1, "left_child_3"));
        let n5 = arena.alloc(Node::new(5, "right_child_3"));
        let n12 = arena.alloc(Node::new(12, "right_child_10"));
        link(&mut arena, n7, n3, Side::Left);
        link(&mut arena, n7, n10, Side::Right);
        link(&mut arena, n3, n1, Side::Left);
        link(&mut arena, n3, n5, Side::Right);
        link(&mut arena, n10, n12, Side::Right);
        (arena, [n1, n3, n5, n7, n10, n12])
    }

    fn walk(arena: &Nodes, from: Handle, step: fn(&Nodes, Handle) -> Option<Handle>) -> Vec<i32> {
        let mut keys = vec![];
        let mut current = Some(from);
        while let Some(h) = current {
            keys.push(arena.get(h).key);
            current = step(arena, h);
        }
        keys
    }

    #[test]
    fn single_node_has_no_neighbours() {
        let mut arena = Arena::new();
        let node = arena.alloc(Node::new(1, "value"));
        assert_eq!(None, arena.next(node));
        assert_eq!(None, arena.prev(node));
        assert_eq!(1, arena.subtree_len(Some(node)));
        assert_eq!(0, arena.subtree_len(None));
    }

    #[test]
    fn next_walks_in_order() {
        let (arena, [n1, n3, n5, n7, n10, n12]) = sample();
        assert_eq!(vec![1, 3, 5, 7, 10, 12], walk(&arena, n1, |a, h| a.next(h)));
        assert_eq!(vec![3, 5, 7, 10, 12], walk(&arena, n3, |a, h| a.next(h)));
        assert_eq!(vec![5, 7, 10, 12], walk(&arena, n5, |a, h| a.next(h)));
        assert_eq!(vec![7, 10, 12], walk(&arena, n7, |a, h| a.next(h)));
        assert_eq!(vec![10, 12], walk(&arena, n10, |a, h| a.next(h)));
        assert_eq!(vec![12], walk(&arena, n12, |a, h| a.next(h)));
    }

    #[test]
    fn prev_walks_in_reverse() {
        let (arena, [n1, n3, n5, n7, n10, n12]) = sample();
        assert_eq!(vec![12, 10, 7, 5, 3, 1], walk(&arena, n12, |a, h| a.prev(h)));
        assert_eq!(vec![10, 7, 5, 3, 1], walk(&arena, n10, |a, h| a.prev(h)));
        assert_eq!(vec![7, 5, 3, 1], walk(&arena, n7, |a, h| a.prev(h)));
        assert_eq!(vec![5, 3, 1], walk(&arena, n5, |a, h| a.prev(h)));
        assert_eq!(vec![3, 1], walk(&arena, n3, |a, h| a.prev(h)));
        assert_eq!(vec![1], walk(&arena, n1, |a, h| a.prev(h)));
    }

    #[test]
    fn sides_and_counts() {
        let (arena, [n1, n3, n5, n7, n10, n12]) = sample();
        assert_eq!(None, arena.side_of(n7));
        assert_eq!(Some(Side::Left), arena.side_of(n3));
        assert_eq!(Some(Side::Right), arena.side_of(n5));
        assert_eq!(Some(Side::Right), arena.side_of(n12));
        assert_eq!(n1, arena.leftmost(n7));
        assert_eq!(n12, arena.rightmost(n7));
        assert_eq!(6, arena.subtree_len(Some(n7)));
        assert_eq!(3, arena.subtree_len(Some(n3)));
        assert_eq!(2, arena.subtree_len(Some(n10)));
    }

    #[test]
    fn absent_links_read_black() {
        let (mut arena, [n1, ..]) = sample();
        assert!(arena.is_black(None));
        assert!(arena.is_red(Some(n1)));
        arena.set_color(Some(n1), Color::Black);
        assert!(arena.is_black(Some(n1)));
        arena.set_color(None, Color::Red);
        assert_eq!(None, arena.parent(None));
    }
}
