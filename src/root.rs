use std::{borrow::Borrow, cmp::Ordering::*};

use crate::{Arena, Color, Handle, Node, Root, Side};

/// How an incoming key is placed when it compares equal to a node already in
/// the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Equal keys are rejected.
    Unique,
    /// Equal keys descend into the smaller of the two subtrees of the node
    /// they tie with (the right one when both are the same size).
    Multi,
}

/// Where a key would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// The tree is empty; the key becomes the root.
    Root,
    /// The `Side` child of the handle is free.
    Vacant(Handle, Side),
    /// [`Placement::Unique`] only: a node with an equal key.
    Occupied(Handle),
}

impl<K, V> Default for Root<K, V> {
    fn default() -> Self {
        Root::new()
    }
}

impl<K, V> Root<K, V> {
    pub(crate) const fn new() -> Self {
        Root {
            nodes: Arena::new(),
            root: None,
        }
    }

    #[inline]
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn nodes(&self) -> &Arena<Node<K, V>> {
        &self.nodes
    }

    #[cfg(test)]
    pub(crate) fn nodes_mut(&mut self) -> &mut Arena<Node<K, V>> {
        &mut self.nodes
    }

    #[inline]
    pub(crate) fn node(&self, node: Handle) -> &Node<K, V> {
        self.nodes.get(node)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, node: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(node)
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|r| self.nodes.leftmost(r))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|r| self.nodes.rightmost(r))
    }

    pub(crate) fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
    }

    /// Detaches every node at once, handing back the arena that owns them and
    /// the old root.
    pub(crate) fn take_all(&mut self) -> (Arena<Node<K, V>>, Option<Handle>) {
        let root = self.root.take();
        (std::mem::replace(&mut self.nodes, Arena::new()), root)
    }
}

// Lookup.
impl<K, V> Root<K, V> {
    /// The leftmost node whose key is not less than `key`.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            if node.key.borrow() < key {
                current = node.right;
            } else {
                candidate = Some(h);
                current = node.left;
            }
        }
        candidate
    }

    /// The leftmost node whose key is greater than `key`.
    pub(crate) fn upper_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            if node.key.borrow() <= key {
                current = node.right;
            } else {
                candidate = Some(h);
                current = node.left;
            }
        }
        candidate
    }

    /// The leftmost node holding `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lower_bound(key)
            .filter(|&h| self.nodes.get(h).key.borrow() == key)
    }
}

// Insertion and balancing.
impl<K: Ord, V> Root<K, V> {
    pub(crate) fn slot_for(&self, key: &K, placement: Placement) -> Slot {
        let Some(mut current) = self.root else {
            return Slot::Root;
        };
        loop {
            let node = self.nodes.get(current);
            let side = match key.cmp(&node.key) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => match placement {
                    Placement::Unique => return Slot::Occupied(current),
                    Placement::Multi => {
                        if self.nodes.subtree_len(node.left) >= self.nodes.subtree_len(node.right) {
                            Side::Right
                        } else {
                            Side::Left
                        }
                    }
                },
            };
            match node.child(side) {
                Some(child) => current = child,
                None => return Slot::Vacant(current, side),
            }
        }
    }

    /// Links the unlinked `node` into `slot` and restores the red-black
    /// coloring. `slot` must come from [`Self::slot_for`] on the current shape
    /// of the tree and must not be [`Slot::Occupied`].
    pub(crate) fn attach(&mut self, node: Handle, slot: Slot) {
        match slot {
            Slot::Root => {
                let n = self.nodes.get_mut(node);
                n.parent = None;
                n.color = Color::Black;
                self.root = Some(node);
            }
            Slot::Vacant(parent, side) => {
                {
                    let n = self.nodes.get_mut(node);
                    n.parent = Some(parent);
                    n.color = Color::Red;
                }
                self.nodes.set_child(parent, side, Some(node));
                if self.nodes.is_red(Some(parent)) {
                    self.balance(node);
                }
            }
            Slot::Occupied(_) => unreachable!("`Root::attach()` - slot is occupied"),
        }
    }

    /// Links the unlinked `node` directly after `anchor` in traversal order,
    /// or in front of every node when `anchor` is `None`. Keys are not
    /// compared, so `node` must already sort between `anchor` and its
    /// successor.
    pub(crate) fn attach_after(&mut self, node: Handle, anchor: Option<Handle>) {
        let slot = match anchor {
            None => match self.root {
                None => Slot::Root,
                Some(root) => Slot::Vacant(self.nodes.leftmost(root), Side::Left),
            },
            Some(anchor) => match self.nodes.get(anchor).right {
                None => Slot::Vacant(anchor, Side::Right),
                Some(right) => Slot::Vacant(self.nodes.leftmost(right), Side::Left),
            },
        };
        self.attach(node, slot);
    }
}

impl<K, V> Root<K, V> {
    pub(crate) fn grandparent(&self, node: Handle) -> Option<Handle> {
        let parent = self.nodes.parent(Some(node));
        self.nodes.parent(parent)
    }

    /// The grandparent's other child.
    pub(crate) fn uncle(&self, node: Handle) -> Option<Handle> {
        let parent = self.nodes.parent(Some(node))?;
        let grandparent = self.nodes.parent(Some(parent))?;
        let side = self.nodes.side_of(parent)?;
        self.nodes.child(grandparent, side.opposite())
    }

    /// Restores "no red node has a red parent" after `node`, which is red,
    /// got a red parent.
    pub(crate) fn balance(&mut self, mut node: Handle) {
        loop {
            /*
             * Loop invariant: node is red.
             */
            let Some(parent) = self.nodes.parent(Some(node)) else {
                self.nodes.set_color(Some(node), Color::Black);
                break;
            };
            if self.nodes.is_black(Some(parent)) {
                break;
            }
            let Some(grandparent) = self.grandparent(node) else {
                // A red parent is never the root; paint it rather than trust
                // a broken invariant.
                self.nodes.set_color(Some(parent), Color::Black);
                break;
            };

            let uncle = self.uncle(node);
            if self.nodes.is_red(uncle) {
                /*
                 * Red uncle: color flips, then carry on from g.
                 *
                 *       G            g
                 *      / \          / \
                 *     p   u  -->   P   U
                 *    /            /
                 *   n            n
                 */
                self.nodes.set_color(uncle, Color::Black);
                self.nodes.set_color(Some(parent), Color::Black);
                if self.root == Some(grandparent) {
                    break;
                }
                self.nodes.set_color(Some(grandparent), Color::Red);
                node = grandparent;
                continue;
            }

            if self.nodes.side_of(node) == self.nodes.side_of(parent) {
                /*
                 * Black uncle, n, p and g in a line: rotate p over g.
                 *
                 *        G           P
                 *       / \         / \
                 *      p   U  -->  n   g
                 *     /                 \
                 *    n                   U
                 */
                self.rotate(parent);
            } else {
                /*
                 * Black uncle, n is the inner grandchild: rotate n over p,
                 * which leaves a line, then rotate n over g.
                 *
                 *      G             G            N
                 *     / \           / \          / \
                 *    p   U  -->    n   U  -->   p   g
                 *     \           /                  \
                 *      n         p                    U
                 */
                self.rotate(node);
                self.rotate(node);
            }
            break;
        }
    }

    /// Promotes `node` above its parent and swaps their colors. The
    /// direction follows from which child `node` is.
    pub(crate) fn rotate(&mut self, node: Handle) {
        match self.nodes.side_of(node) {
            Some(Side::Left) => self.rotate_right(node),
            Some(Side::Right) => self.rotate_left(node),
            None => {}
        }
    }

    /// `node` is the right child of its parent `f`; `f` becomes its left
    /// child.
    pub(crate) fn rotate_left(&mut self, node: Handle) {
        self.promote(node, Side::Right);
    }

    /// `node` is the left child of its parent `f`; `f` becomes its right
    /// child.
    pub(crate) fn rotate_right(&mut self, node: Handle) {
        self.promote(node, Side::Left);
    }

    //        f                n
    //       / \              / \
    //      n   c    -->     a   f
    //     / \                  / \
    //    a   b                b   c
    //
    // (drawn for `side == Left`)
    fn promote(&mut self, node: Handle, side: Side) {
        let Some(father) = self.nodes.parent(Some(node)) else {
            return;
        };
        let inner = self.nodes.child(node, side.opposite());
        self.nodes.set_child(father, side, inner);
        self.nodes.set_parent(inner, Some(father));

        let grandparent = self.nodes.parent(Some(father));
        self.nodes.set_child(node, side.opposite(), Some(father));
        self.nodes.set_parent(Some(node), grandparent);
        self.nodes.set_parent(Some(father), Some(node));
        self.change_child(father, Some(node), grandparent);

        let node_color = self.nodes.get(node).color;
        let father_color = self.nodes.get(father).color;
        self.nodes.set_color(Some(node), father_color);
        self.nodes.set_color(Some(father), node_color);
    }

    /// Points whatever referenced `old` (its parent, or the root link) at
    /// `new`. `old`'s own links are left untouched.
    pub(crate) fn change_child(&mut self, old: Handle, new: Option<Handle>, parent: Option<Handle>) {
        if let Some(parent) = parent {
            let parent = self.nodes.get_mut(parent);
            if parent.left == Some(old) {
                parent.left = new;
            } else {
                parent.right = new;
            }
        } else {
            self.root = new;
        }
    }

    pub(crate) fn alloc(&mut self, key: K, value: V) -> Handle {
        self.nodes.alloc(Node::new(key, value))
    }

    pub(crate) fn free(&mut self, node: Handle) -> Node<K, V> {
        self.nodes.take(node)
    }
}
