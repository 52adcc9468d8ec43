//! Structural invariant checks.
//!
//! A correct tree never fails these. They exist for tests and for callers
//! that want to validate a tree after a batch of mutations.

use crate::common::{Error, NodeId, Result};
use crate::index::btree::node::ParentLink;
use crate::index::btree::tree::BTree;

/// Open key interval a subtree must lie in.
struct KeyBounds<'a, K> {
    lower: Option<&'a K>,
    upper: Option<&'a K>,
}

/// Totals gathered while walking the tree.
#[derive(Default)]
struct Walk {
    nodes: usize,
    keys: usize,
    leaf_depth: Option<usize>,
}

impl<K: Ord> BTree<K> {
    /// Verify every structural property of the tree.
    ///
    /// Checks, for every node reachable from the root:
    /// - only the root is marked root, and it has no parent link
    /// - each parent link names the actual parent and position
    /// - non-root nodes hold between `t` and `2t` keys; the root at most `2t`
    /// - keys are strictly increasing and lie between the separators around
    ///   the node, so the in-order sequence is strictly increasing
    /// - internal nodes have one more child than keys
    /// - all leaves sit at depth `height`
    ///
    /// It also checks that `len` and the arena's live node count match what
    /// the walk found.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first failure found
    pub fn check_invariants(&self) -> Result<()> {
        let root = self
            .arena
            .get(self.root)
            .ok_or_else(|| violation(format!("root {} is not a live node", self.root)))?;
        if !root.is_root {
            return Err(violation(format!("root {} is not marked root", self.root)));
        }
        if root.parent.is_some() {
            return Err(violation(format!("root {} has a parent link", self.root)));
        }

        let mut walk = Walk::default();
        let unbounded = KeyBounds {
            lower: None,
            upper: None,
        };
        self.check_node(self.root, None, 1, unbounded, &mut walk)?;

        if walk.leaf_depth != Some(self.height) {
            return Err(violation(format!(
                "leaf depth {:?} does not match height {}",
                walk.leaf_depth, self.height
            )));
        }
        if walk.keys != self.len {
            return Err(violation(format!(
                "found {} keys but len is {}",
                walk.keys, self.len
            )));
        }
        if walk.nodes != self.arena.live_count() {
            return Err(violation(format!(
                "reached {} nodes but arena holds {}",
                walk.nodes,
                self.arena.live_count()
            )));
        }
        Ok(())
    }

    fn check_node<'a>(
        &'a self,
        id: NodeId,
        expected_parent: Option<ParentLink>,
        depth: usize,
        bounds: KeyBounds<'a, K>,
        walk: &mut Walk,
    ) -> Result<()> {
        let node = self
            .arena
            .get(id)
            .ok_or_else(|| violation(format!("{id} is referenced but not live")))?;
        walk.nodes += 1;
        walk.keys += node.keys.len();

        if expected_parent.is_some() {
            if node.is_root {
                return Err(violation(format!("non-root {id} is marked root")));
            }
            if node.parent != expected_parent {
                return Err(violation(format!(
                    "{id} has parent link {:?}, expected {:?}",
                    node.parent, expected_parent
                )));
            }
            if node.keys.len() < self.minimum_key_count() {
                return Err(violation(format!(
                    "{id} holds {} keys, minimum is {}",
                    node.keys.len(),
                    self.minimum_key_count()
                )));
            }
        }
        if node.keys.len() > self.maximum_key_count() {
            return Err(violation(format!(
                "{id} holds {} keys, maximum is {}",
                node.keys.len(),
                self.maximum_key_count()
            )));
        }

        if node.keys.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(violation(format!("{id} keys are not strictly increasing")));
        }
        if let (Some(lower), Some(first)) = (bounds.lower, node.keys.first()) {
            if first <= lower {
                return Err(violation(format!("{id} has a key at or below its lower separator")));
            }
        }
        if let (Some(upper), Some(last)) = (bounds.upper, node.keys.last()) {
            if last >= upper {
                return Err(violation(format!("{id} has a key at or above its upper separator")));
            }
        }

        if node.is_leaf() {
            return match walk.leaf_depth {
                None => {
                    walk.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(violation(format!(
                    "leaf {id} at depth {depth}, other leaves at depth {expected}"
                ))),
            };
        }

        if node.children.len() != node.keys.len() + 1 {
            return Err(violation(format!(
                "{id} has {} keys but {} children",
                node.keys.len(),
                node.children.len()
            )));
        }
        for (index, &child) in node.children.iter().enumerate() {
            let child_bounds = KeyBounds {
                lower: if index == 0 {
                    bounds.lower
                } else {
                    node.keys.get(index - 1)
                },
                upper: node.keys.get(index).or(bounds.upper),
            };
            self.check_node(
                child,
                Some(ParentLink::new(id, index)),
                depth + 1,
                child_bounds,
                walk,
            )?;
        }
        Ok(())
    }
}

fn violation(message: String) -> Error {
    Error::InvariantViolation(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_from(t: usize, keys: impl IntoIterator<Item = i32>) -> BTree<i32> {
        let mut tree = BTree::new(t).unwrap();
        for key in keys {
            tree.insert(key).unwrap();
        }
        tree
    }

    fn assert_violation(tree: &BTree<i32>, needle: &str) {
        match tree.check_invariants() {
            Err(Error::InvariantViolation(message)) => {
                assert!(message.contains(needle), "unexpected message: {message}")
            }
            other => panic!("expected violation containing {needle:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_trees_pass() {
        assert!(tree_from(1, 0..100).check_invariants().is_ok());
        assert!(tree_from(2, (0..100).rev()).check_invariants().is_ok());
        assert!(tree_from(5, []).check_invariants().is_ok());
    }

    #[test]
    fn test_detects_underfull_node() {
        let mut tree = tree_from(2, 1..=5);
        let left = tree.root_node().children()[0];
        tree.arena[left].keys.pop();
        tree.len -= 1;

        assert_violation(&tree, "minimum is 2");
    }

    #[test]
    fn test_detects_overfull_root() {
        let mut tree = tree_from(1, [1, 2]);
        tree.arena[tree.root].keys.push(3);
        tree.len += 1;

        assert_violation(&tree, "maximum is 2");
    }

    #[test]
    fn test_detects_out_of_order_keys() {
        let mut tree = tree_from(2, 1..=5);
        let right = tree.root_node().children()[1];
        tree.arena[right].keys[0] = 0;

        assert_violation(&tree, "lower separator");
    }

    #[test]
    fn test_detects_stale_parent_link() {
        let mut tree = tree_from(2, 1..=5);
        let right = tree.root_node().children()[1];
        let root = tree.root;
        tree.arena[right].parent = Some(ParentLink::new(root, 0));

        assert_violation(&tree, "parent link");
    }

    #[test]
    fn test_detects_len_mismatch() {
        let mut tree = tree_from(2, 1..=3);
        tree.len = 7;

        assert_violation(&tree, "len is 7");
    }

    #[test]
    fn test_detects_height_mismatch() {
        let mut tree = tree_from(2, 1..=5);
        tree.height = 3;

        assert_violation(&tree, "does not match height");
    }
}
