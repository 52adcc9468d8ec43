//! BTreeNode - one multiway node of the tree.
//!
//! A [`BTreeNode`] holds:
//! - An ordered run of keys
//! - The ids of its children (empty for a leaf)
//! - A non-owning [`ParentLink`] back to its parent slot

use crate::common::NodeId;

/// Non-owning back-reference from a node to its parent.
///
/// `index` is the node's position in `parent.children`. Every structural
/// change that shifts children (insert, split, merge, rotation) refreshes the
/// links of the children it moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink {
    /// The parent node.
    pub parent: NodeId,
    /// Position of this node among the parent's children.
    pub index: usize,
}

impl ParentLink {
    #[inline]
    pub(crate) fn new(parent: NodeId, index: usize) -> Self {
        Self { parent, index }
    }
}

/// A node in a [`BTree`](crate::BTree).
///
/// # Layout
/// ```text
///              keys:   [ k0 ][ k1 ][ k2 ]
///   children:  [ c0 ][ c1 ][ c2 ][ c3 ]
///
///   every key in c1 is > k0 and < k1
/// ```
///
/// A leaf has no children. An internal node always has exactly one more
/// child than it has keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BTreeNode<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) is_root: bool,
    pub(crate) parent: Option<ParentLink>,
}

impl<K> BTreeNode<K> {
    /// Create an empty leaf.
    pub(crate) fn new_leaf(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity + 1),
            children: Vec::new(),
            is_root: false,
            parent: None,
        }
    }

    /// Create the empty leaf a fresh tree starts with.
    pub(crate) fn new_root(capacity: usize) -> Self {
        Self {
            is_root: true,
            ..Self::new_leaf(capacity)
        }
    }

    /// Build a node from already-split halves.
    pub(crate) fn from_parts(keys: Vec<K>, children: Vec<NodeId>) -> Self {
        Self {
            keys,
            children,
            is_root: false,
            parent: None,
        }
    }

    /// The keys of this node, strictly increasing.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// The children of this node, empty for a leaf.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of keys held.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the node holds no keys.
    ///
    /// Only an empty tree's root, or a root awaiting collapse, is ever empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Check if this node is currently its tree's root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Link to the parent, or `None` for the root.
    #[inline]
    pub fn parent_link(&self) -> Option<ParentLink> {
        self.parent
    }
}

impl<K: Ord> BTreeNode<K> {
    /// First position whose key is not less than `key`.
    ///
    /// Returns `Ok(i)` when `keys[i]` equals `key`, otherwise `Err(i)` where
    /// `i` is both the insertion point and the child to descend into.
    pub(crate) fn locate<Q>(&self, key: &Q) -> std::result::Result<usize, usize>
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys.binary_search_by(|probe| probe.borrow().cmp(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with(keys: Vec<i32>) -> BTreeNode<i32> {
        BTreeNode::from_parts(keys, Vec::new())
    }

    #[test]
    fn test_new_root_is_empty_leaf() {
        let node: BTreeNode<i32> = BTreeNode::new_root(4);
        assert!(node.is_root());
        assert!(node.is_leaf());
        assert!(node.is_empty());
        assert_eq!(node.parent_link(), None);
    }

    #[test]
    fn test_locate_hit_and_miss() {
        let node = node_with(vec![10, 20, 30]);
        assert_eq!(node.locate(&20), Ok(1));
        assert_eq!(node.locate(&5), Err(0));
        assert_eq!(node.locate(&25), Err(2));
        assert_eq!(node.locate(&99), Err(3));
    }

    #[test]
    fn test_internal_node_is_not_leaf() {
        let node: BTreeNode<i32> =
            BTreeNode::from_parts(vec![5], vec![NodeId::new(1), NodeId::new(2)]);
        assert!(!node.is_leaf());
        assert_eq!(node.len(), 1);
        assert_eq!(node.children(), &[NodeId::new(1), NodeId::new(2)]);
    }
}
