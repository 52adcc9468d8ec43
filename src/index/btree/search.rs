//! Key lookup.
//!
//! Search walks top-down from the root. At each node it finds the first key
//! not less than the target; an equal key is a hit, otherwise the walk
//! descends into the child at that position or stops at a leaf.

use std::borrow::Borrow;

use crate::common::NodeId;
use crate::index::btree::tree::BTree;

/// Location of a key inside the tree.
///
/// Valid until the next mutation; splits, merges and rotations move keys
/// between nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    /// The node holding the key.
    pub node: NodeId,
    /// Position of the key in that node.
    pub index: usize,
}

impl<K: Ord> BTree<K> {
    /// Find the node and position holding `key`.
    ///
    /// Returns `None` when the key is absent. Costs O(log t) comparisons
    /// per level over O(log_t n) levels.
    pub fn search<Q>(&self, key: &Q) -> Option<SearchHit>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut id = self.root;
        loop {
            let node = &self.arena[id];
            match node.locate(key) {
                Ok(index) => return Some(SearchHit { node: id, index }),
                Err(_) if node.is_leaf() => return None,
                Err(child) => id = node.children[child],
            }
        }
    }

    /// Check if `key` is in the tree.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// The key a [`SearchHit`] points at.
    ///
    /// Returns `None` if the hit is stale (its node was released or shrank).
    pub fn key_at(&self, hit: SearchHit) -> Option<&K> {
        self.arena.get(hit.node)?.keys.get(hit.index)
    }

    /// Smallest key, or `None` if the tree is empty.
    pub fn first(&self) -> Option<&K> {
        self.arena[self.leftmost_leaf(self.root)].keys.first()
    }

    /// Largest key, or `None` if the tree is empty.
    pub fn last(&self) -> Option<&K> {
        let mut id = self.root;
        loop {
            let node = &self.arena[id];
            match node.children.last() {
                Some(&child) => id = child,
                None => return node.keys.last(),
            }
        }
    }
}

impl<K> BTree<K> {
    /// Follow first children from `id` down to a leaf.
    ///
    /// Starting at `children[i + 1]` of an internal node, this lands on the
    /// leaf holding the in-order successor of `keys[i]`.
    pub(super) fn leftmost_leaf(&self, mut id: NodeId) -> NodeId {
        while let Some(&child) = self.arena[id].children.first() {
            id = child;
        }
        id
    }
}
