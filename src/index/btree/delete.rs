//! Deletion with sibling rotation, merging and root collapse.
//!
//! A key in an internal node is replaced by its in-order successor, which is
//! then removed from its leaf, so removal always happens at a leaf. An
//! underfull leaf is repaired by walking up the parent links:
//!
//! ```text
//!   right sibling has > t keys  ──▶ rotate from right   (done)
//!   left sibling has > t keys   ──▶ rotate from left    (done)
//!   otherwise                   ──▶ merge with a sibling
//!                                     ├─ root emptied   ──▶ root collapse (done)
//!                                     └─ parent underfull ─▶ repair parent
//! ```

use std::borrow::Borrow;
use std::mem;

use crate::common::{Error, NodeId, Result};
use crate::index::btree::tree::BTree;

impl<K: Ord> BTree<K> {
    /// Remove a key and return it.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if the key is absent; the tree is left
    ///   unchanged
    pub fn delete<Q>(&mut self, key: &Q) -> Result<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(hit) = self.search(key) else {
            tracing::trace!("delete skipped: key not found");
            return Err(Error::KeyNotFound);
        };

        let (leaf, removed) = if self.arena[hit.node].is_leaf() {
            let removed = self.arena[hit.node].keys.remove(hit.index);
            (hit.node, removed)
        } else {
            let right_subtree = self.arena[hit.node].children[hit.index + 1];
            let leaf = self.leftmost_leaf(right_subtree);
            let successor = self.arena[leaf].keys.remove(0);
            let removed = mem::replace(&mut self.arena[hit.node].keys[hit.index], successor);
            (leaf, removed)
        };
        self.len -= 1;

        self.repair(leaf);

        tracing::trace!(len = self.len, height = self.height, "deleted key");
        Ok(removed)
    }
}

impl<K> BTree<K> {
    /// Restore the minimum key count from `id` upward.
    fn repair(&mut self, mut id: NodeId) {
        let t = self.config.minimum_key_count;

        loop {
            let node = &self.arena[id];
            if node.is_root || node.keys.len() >= t {
                return;
            }
            let Some(link) = node.parent else {
                return;
            };

            let parent = &self.arena[link.parent];
            let right = parent.children.get(link.index + 1).copied();
            let left = link
                .index
                .checked_sub(1)
                .map(|index| parent.children[index]);

            if right.is_some_and(|sibling| self.arena[sibling].keys.len() > t) {
                self.rotate_from_right(link.parent, link.index);
                return;
            }
            if left.is_some_and(|sibling| self.arena[sibling].keys.len() > t) {
                self.rotate_from_left(link.parent, link.index);
                return;
            }

            // Every non-root node has at least one sibling
            let left_index = if right.is_some() {
                link.index
            } else {
                link.index - 1
            };
            self.merge_children(link.parent, left_index);

            let parent = &self.arena[link.parent];
            if parent.is_root && parent.keys.is_empty() {
                self.collapse_root();
                return;
            }
            id = link.parent;
        }
    }

    /// Borrow the first key of `children[index + 1]` through the parent.
    fn rotate_from_right(&mut self, parent: NodeId, index: usize) {
        let node = self.arena[parent].children[index];
        let sibling_id = self.arena[parent].children[index + 1];

        let sibling = &mut self.arena[sibling_id];
        let first_key = sibling.keys.remove(0);
        let first_child = (!sibling.is_leaf()).then(|| sibling.children.remove(0));

        let separator = mem::replace(&mut self.arena[parent].keys[index], first_key);
        self.arena[node].keys.push(separator);

        if let Some(child) = first_child {
            self.arena[node].children.push(child);
            let moved = self.arena[node].children.len() - 1;
            self.relink_children(node, moved);
            self.relink_children(sibling_id, 0);
        }
        self.stats.rotations_from_right += 1;

        tracing::debug!(node = %node, sibling = %sibling_id, "rotated key from right sibling");
    }

    /// Borrow the last key of `children[index - 1]` through the parent.
    fn rotate_from_left(&mut self, parent: NodeId, index: usize) {
        let node = self.arena[parent].children[index];
        let sibling_id = self.arena[parent].children[index - 1];

        let sibling = &mut self.arena[sibling_id];
        let last_key = sibling.keys.remove(sibling.keys.len() - 1);
        let last_child =
            (!sibling.is_leaf()).then(|| sibling.children.remove(sibling.children.len() - 1));

        let separator = mem::replace(&mut self.arena[parent].keys[index - 1], last_key);
        self.arena[node].keys.insert(0, separator);

        if let Some(child) = last_child {
            self.arena[node].children.insert(0, child);
            self.relink_children(node, 0);
        }
        self.stats.rotations_from_left += 1;

        tracing::debug!(node = %node, sibling = %sibling_id, "rotated key from left sibling");
    }

    /// Fold `children[index + 1]` and the separator between them into
    /// `children[index]`, releasing the right node.
    fn merge_children(&mut self, parent: NodeId, index: usize) {
        let parent_node = &mut self.arena[parent];
        let left = parent_node.children[index];
        let right = parent_node.children.remove(index + 1);
        let separator = parent_node.keys.remove(index);

        let right_node = self.arena.release(right);
        let left_node = &mut self.arena[left];
        let first_moved = left_node.children.len();
        left_node.keys.push(separator);
        left_node.keys.extend(right_node.keys);
        left_node.children.extend(right_node.children);

        self.relink_children(left, first_moved);
        self.relink_children(parent, index + 1);
        self.stats.merges += 1;

        tracing::debug!(
            node = %left,
            released = %right,
            len = self.arena[left].len(),
            "merged siblings"
        );
    }

    /// Replace an emptied root with its only child.
    fn collapse_root(&mut self) {
        let old_root = self.arena.release(self.root);
        let child = old_root.children[0];

        let new_root = &mut self.arena[child];
        new_root.is_root = true;
        new_root.parent = None;

        self.root = child;
        self.height -= 1;
        self.stats.root_collapses += 1;

        tracing::debug!(root = %child, height = self.height, "collapsed root");
    }
}
