//! Insertion with bottom-up split propagation.
//!
//! Insert descends to the target leaf, places the key, and splits any node
//! that ends up holding more than `2t` keys on the way back up. A split
//! that escapes the root grows the tree by one level.

use crate::common::{Error, NodeId, Result};
use crate::index::btree::node::{BTreeNode, ParentLink};
use crate::index::btree::tree::BTree;

/// What a split hands to the caller one level up.
#[derive(Debug)]
struct Split<K> {
    /// Median key moving up into the parent.
    promoted: K,
    /// The new right half. The left half stays in the split node's slot.
    right: NodeId,
}

impl<K: Ord> BTree<K> {
    /// Insert a key.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if the key is already present; the tree is
    ///   left unchanged
    pub fn insert(&mut self, key: K) -> Result<()> {
        if self.contains(&key) {
            tracing::trace!("insert rejected: duplicate key");
            return Err(Error::DuplicateKey);
        }

        if let Some(split) = self.insert_into(self.root, key) {
            self.grow_root(split);
        }
        self.len += 1;

        tracing::trace!(len = self.len, height = self.height, "inserted key");
        Ok(())
    }

    /// Insert into the subtree at `id`, returning a split if `id` overflowed.
    fn insert_into(&mut self, id: NodeId, key: K) -> Option<Split<K>> {
        let node = &mut self.arena[id];
        let position = match node.locate(&key) {
            Ok(_) => unreachable!("duplicate key reached insert_into"),
            Err(position) => position,
        };

        if node.is_leaf() {
            node.keys.insert(position, key);
        } else {
            let child = node.children[position];
            let split = self.insert_into(child, key)?;
            self.insert_separator(id, position, split);
        }

        if self.arena[id].keys.len() > self.config.maximum_key_count() {
            Some(self.split(id))
        } else {
            None
        }
    }

    /// Place a promoted key at `position` in `id`, with its right half as the
    /// child just after it.
    fn insert_separator(&mut self, id: NodeId, position: usize, split: Split<K>) {
        let node = &mut self.arena[id];
        node.keys.insert(position, split.promoted);
        node.children.insert(position + 1, split.right);
        self.relink_children(id, position + 1);
    }
}

impl<K> BTree<K> {
    /// Split an overfull node at its median.
    ///
    /// `keys[0..t)` stay in place, `keys[t]` is promoted, and a new right
    /// sibling takes `keys[t+1..]` together with `children[t+1..]`.
    fn split(&mut self, id: NodeId) -> Split<K> {
        let t = self.config.minimum_key_count;
        let node = &mut self.arena[id];

        let mut high_keys = node.keys.split_off(t);
        let promoted = high_keys.remove(0);
        let high_children = if node.is_leaf() {
            Vec::new()
        } else {
            node.children.split_off(t + 1)
        };

        let right = self
            .arena
            .alloc(BTreeNode::from_parts(high_keys, high_children));
        self.relink_children(right, 0);
        self.stats.splits += 1;

        tracing::debug!(
            node = %id,
            right = %right,
            left_len = self.arena[id].len(),
            right_len = self.arena[right].len(),
            "split node"
        );

        Split { promoted, right }
    }

    /// Replace the root with a new one holding a single promoted key.
    fn grow_root(&mut self, split: Split<K>) {
        let old_root = self.root;
        let new_root = self.arena.alloc(BTreeNode {
            keys: vec![split.promoted],
            children: vec![old_root, split.right],
            is_root: true,
            parent: None,
        });

        let old = &mut self.arena[old_root];
        old.is_root = false;
        old.parent = Some(ParentLink::new(new_root, 0));
        self.arena[split.right].parent = Some(ParentLink::new(new_root, 1));

        self.root = new_root;
        self.height += 1;
        self.stats.root_splits += 1;

        tracing::debug!(root = %new_root, height = self.height, "grew new root");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(tree: &BTree<i32>, id: NodeId) -> Vec<i32> {
        tree.node(id).unwrap().keys().to_vec()
    }

    #[test]
    fn test_insert_into_root_leaf_sorted() {
        let mut tree = BTree::new(2).unwrap();
        for key in [4, 1, 3, 2] {
            tree.insert(key).unwrap();
        }
        assert_eq!(tree.root_node().keys(), &[1, 2, 3, 4]);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.stats().splits, 0);
    }

    #[test]
    fn test_fifth_insert_splits_root_leaf() {
        let mut tree = BTree::new(2).unwrap();
        for key in [1, 5, 2, 4, 3] {
            tree.insert(key).unwrap();
        }

        // [1,2,3,4,5] splits at keys[2] = 3
        let root = tree.root_node();
        assert_eq!(root.keys(), &[3]);
        assert_eq!(tree.height(), 2);
        assert_eq!(keys_of(&tree, root.children()[0]), vec![1, 2]);
        assert_eq!(keys_of(&tree, root.children()[1]), vec![4, 5]);
        assert_eq!(tree.stats().root_splits, 1);
    }

    #[test]
    fn test_split_keeps_left_half_in_place() {
        let mut tree = BTree::new(2).unwrap();
        for key in [1, 2, 3, 4] {
            tree.insert(key).unwrap();
        }
        let original = tree.root();

        tree.insert(5).unwrap();

        // The old root slot now holds the low half
        assert_eq!(tree.root_node().children()[0], original);
        assert_eq!(keys_of(&tree, original), vec![1, 2]);
        assert!(!tree.node(original).unwrap().is_root());
    }

    #[test]
    fn test_parent_links_after_split() {
        let mut tree = BTree::new(1).unwrap();
        for key in 1..=7 {
            tree.insert(key).unwrap();
        }

        let root = tree.root();
        for (index, &child) in tree.root_node().children().iter().enumerate() {
            let link = tree.node(child).unwrap().parent_link().unwrap();
            assert_eq!(link, ParentLink::new(root, index));
        }
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_duplicate_rejected_everywhere() {
        let mut tree = BTree::new(1).unwrap();
        for key in 1..=20 {
            tree.insert(key).unwrap();
        }
        let before: Vec<i32> = tree.iter().copied().collect();
        let stats = tree.stats();

        for key in 1..=20 {
            assert_eq!(tree.insert(key), Err(Error::DuplicateKey));
        }

        assert_eq!(tree.len(), 20);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), before);
        assert_eq!(tree.stats(), stats);
    }

    #[test]
    fn test_height_grows_only_on_root_split() {
        let mut tree = BTree::new(2).unwrap();
        let mut last_height = tree.height();
        let mut last_root_splits = 0;

        for key in 0..200 {
            tree.insert(key).unwrap();
            let stats = tree.stats();
            if stats.root_splits > last_root_splits {
                assert_eq!(tree.height(), last_height + 1);
            } else {
                assert_eq!(tree.height(), last_height);
            }
            last_height = tree.height();
            last_root_splits = stats.root_splits;
        }
    }
}
