use std::fmt::{Display, Write};

use crate::{Arena, Color, Handle, Node, Tree};

impl<K, V> Tree<K, V> {
    /// The shape of the tree as `(depth, key, color)` triples, visiting the
    /// right subtree, then the node, then the left subtree. Printed top to
    /// bottom with `depth` as indentation this draws the tree on its side,
    /// root at the left edge.
    pub fn layout(&self) -> Layout<'_, K, V> {
        Layout {
            nodes: self.root.nodes(),
            stack: Vec::new(),
            pending: self.root.root().map(|h| (h, 0)),
        }
    }

    /// Renders [`Tree::layout`] with one `"{dots}{key}:{COLOR}"` line per
    /// node, one dot per level of depth.
    ///
    /// ```
    /// use remerge::Tree;
    ///
    /// let tree: Tree<i32, ()> = [(2, ()), (1, ()), (3, ())].into_iter().collect();
    /// assert_eq!(tree.pretty(), ".3:RED\n2:BLACK\n.1:RED\n");
    /// ```
    pub fn pretty(&self) -> String
    where
        K: Display,
    {
        let mut out = String::new();
        for (depth, key, color) in self.layout() {
            // Writing into a `String` cannot fail.
            let _ = writeln!(out, "{:.<depth$}{key}:{color}", "");
        }
        out
    }

    /// The number of black nodes on every root-to-leaf path, or `None` when
    /// the paths disagree. An empty tree has a black-height of zero.
    pub fn black_height(&self) -> Option<usize> {
        let nodes = self.root.nodes();
        let mut height = None;
        let mut pending: Vec<(Handle, usize)> = self.root.root().map(|h| (h, 0)).into_iter().collect();
        if pending.is_empty() {
            return Some(0);
        }
        while let Some((h, above)) = pending.pop() {
            let node = nodes.get(h);
            let blacks = above + usize::from(node.color == Color::Black);
            for child in [node.left, node.right] {
                match child {
                    Some(child) => pending.push((child, blacks)),
                    None => match height {
                        None => height = Some(blacks),
                        Some(seen) if seen != blacks => return None,
                        Some(_) => {}
                    },
                }
            }
        }
        height
    }

    /// Panics unless the tree is structurally sound: the root is black, no
    /// red node has a red child, parent and child links agree, keys are in
    /// non-decreasing order and `len()` matches the number of reachable
    /// nodes.
    #[doc(hidden)]
    pub fn check_invariants(&self)
    where
        K: Ord,
    {
        let nodes = self.root.nodes();
        let Some(root) = self.root.root() else {
            assert_eq!(0, self.len, "empty tree reports a non-zero length");
            return;
        };
        assert!(nodes.is_black(Some(root)), "root is red");
        assert_eq!(None, nodes.get(root).parent, "root has a parent");

        let mut reachable = 0;
        let mut pending = vec![root];
        while let Some(h) = pending.pop() {
            reachable += 1;
            let node = nodes.get(h);
            for child in [node.left, node.right].into_iter().flatten() {
                assert_eq!(Some(h), nodes.get(child).parent, "child does not point back to its parent");
                assert!(
                    !(node.color == Color::Red && nodes.is_red(Some(child))),
                    "red node has a red child"
                );
                pending.push(child);
            }
        }
        assert_eq!(self.len, reachable, "length disagrees with reachable nodes");
        assert_eq!(self.len, nodes.len(), "arena holds unreachable nodes");

        let mut keys = self.keys();
        if let Some(mut previous) = keys.next() {
            for key in keys {
                assert!(previous <= key, "keys out of order");
                previous = key;
            }
        }
    }
}

/// An iterator over the shape of a [`Tree`], returned by [`Tree::layout`].
pub struct Layout<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    stack: Vec<(Handle, usize)>,
    pending: Option<(Handle, usize)>,
}

impl<'a, K, V> Iterator for Layout<'a, K, V> {
    type Item = (usize, &'a K, Color);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((h, depth)) = self.pending.take() {
            self.stack.push((h, depth));
            self.pending = self.nodes.get(h).right.map(|r| (r, depth + 1));
        }
        let (h, depth) = self.stack.pop()?;
        let node = self.nodes.get(h);
        self.pending = node.left.map(|l| (l, depth + 1));
        Some((depth, &node.key, node.color))
    }
}
