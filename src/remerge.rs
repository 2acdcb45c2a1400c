use log::trace;

use crate::{Color, Handle, Node, Root};

impl<K: Ord, V> Root<K, V> {
    /// Unlinks `node` from the tree and hands it back. Its children are
    /// reinserted node by node into what remains.
    ///
    /// Removing the root instead promotes the larger of its two subtrees to
    /// be the new root and remerges the smaller one into it.
    ///
    /// Handles of every other node stay valid and keep their place in
    /// traversal order, equal keys included: remerged nodes are relinked in
    /// place rather than reallocated.
    pub(crate) fn erase(&mut self, node: Handle) -> Node<K, V> {
        let Some(side) = self.nodes.side_of(node) else {
            return self.erase_root(node);
        };
        // The node just before the whole subtree; it lies outside of it.
        let mut anchor = self.nodes.prev(self.nodes.leftmost(node));
        if let Some(parent) = self.nodes.parent(Some(node)) {
            self.nodes.set_child(parent, side, None);
        }

        let removed = self.free(node);
        let moved =
            self.remerge(removed.left, &mut anchor) + self.remerge(removed.right, &mut anchor);
        trace!("erase: remerged {moved} nodes");
        removed
    }

    fn erase_root(&mut self, node: Handle) -> Node<K, V> {
        let removed = self.free(node);
        self.nodes.set_parent(removed.left, None);
        self.nodes.set_parent(removed.right, None);

        // `anchor` is where the folded subtree resumes: after the kept one, or in
        // front of everything.
        let (keep, fold, mut anchor) = match (removed.left, removed.right) {
            (None, None) => {
                self.root = None;
                return removed;
            }
            (Some(only), None) | (None, Some(only)) => (only, None, None),
            (Some(left), Some(right)) => {
                let left_len = self.nodes.subtree_len(Some(left));
                let right_len = self.nodes.subtree_len(Some(right));
                if left_len >= right_len {
                    (left, Some(right), Some(self.nodes.rightmost(left)))
                } else {
                    (right, Some(left), None)
                }
            }
        };

        self.nodes.set_color(Some(keep), Color::Black);
        self.root = Some(keep);
        let moved = self.remerge(fold, &mut anchor);
        trace!("erase_root: new root promoted, remerged {moved} nodes");
        removed
    }

    /// Reinserts every node of the detached subtree rooted at `subtree`, one
    /// at a time and in order, each right after `anchor`, which then moves
    /// to the node just placed. A node's right child is captured before the
    /// node itself is relinked, since insertion rewrites its links.
    pub(crate) fn remerge(
        &mut self,
        subtree: Option<Handle>,
        anchor: &mut Option<Handle>,
    ) -> usize {
        let mut pending: Vec<Handle> = Vec::new();
        let mut current = subtree;
        let mut moved = 0;
        loop {
            while let Some(h) = current {
                pending.push(h);
                current = self.nodes.get(h).left;
            }
            let Some(h) = pending.pop() else {
                break;
            };
            let node = self.nodes.get_mut(h);
            current = node.right.take();
            node.left = None;
            node.parent = None;

            self.attach_after(h, *anchor);
            *anchor = Some(h);
            moved += 1;
        }
        moved
    }
}
