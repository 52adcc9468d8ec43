//! Node arena - slot storage for a tree's nodes.
//!
//! Parents own children by id; the arena owns every node. Released slots go
//! on a free list and are handed out again by the next allocation.

use std::ops::{Index, IndexMut};

use crate::common::NodeId;
use crate::index::btree::node::BTreeNode;

/// Slot storage for the nodes of one tree.
///
/// # Layout
/// ```text
/// slots:     [Some(n0)] [None] [Some(n2)] [Some(n3)] [None]
/// free_list: [4, 1]   (LIFO, most recently released on top)
/// ```
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<K> {
    /// Live nodes, or `None` for a released slot.
    slots: Vec<Option<BTreeNode<K>>>,

    /// Stack of released slot ids.
    free_list: Vec<NodeId>,
}

impl<K> NodeArena<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Store a node, reusing a released slot when one is available.
    pub(crate) fn alloc(&mut self, node: BTreeNode<K>) -> NodeId {
        match self.free_list.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId::new(self.slots.len() - 1)
            }
        }
    }

    /// Take a node out of the arena and free its slot.
    ///
    /// # Panics
    /// Panics if `id` is not live.
    pub(crate) fn release(&mut self, id: NodeId) -> BTreeNode<K> {
        match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(node) => {
                self.free_list.push(id);
                node
            }
            None => panic!("release of dead node {id}"),
        }
    }

    /// Look up a live node.
    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&BTreeNode<K>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut BTreeNode<K>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Number of live nodes.
    pub(crate) fn live_count(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Drop every node and forget all slots.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }
}

impl<K> Index<NodeId> for NodeArena<K> {
    type Output = BTreeNode<K>;

    #[inline]
    fn index(&self, id: NodeId) -> &BTreeNode<K> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("dangling node id {id}"),
        }
    }
}

impl<K> IndexMut<NodeId> for NodeArena<K> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut BTreeNode<K> {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("dangling node id {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(keys: Vec<i32>) -> BTreeNode<i32> {
        BTreeNode::from_parts(keys, Vec::new())
    }

    #[test]
    fn test_alloc_sequential() {
        let mut arena = NodeArena::new();
        assert_eq!(arena.alloc(leaf(vec![1])), NodeId::new(0));
        assert_eq!(arena.alloc(leaf(vec![2])), NodeId::new(1));
        assert_eq!(arena.live_count(), 2);
        assert_eq!(arena[NodeId::new(1)].keys(), &[2]);
    }

    #[test]
    fn test_release_reuses_slot() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf(vec![1]));
        let _b = arena.alloc(leaf(vec![2]));

        let released = arena.release(a);
        assert_eq!(released.keys(), &[1]);
        assert_eq!(arena.live_count(), 1);
        assert!(arena.get(a).is_none());

        // LIFO: the released slot comes back first
        let c = arena.alloc(leaf(vec![3]));
        assert_eq!(c, a);
        assert_eq!(arena.live_count(), 2);
    }

    #[test]
    #[should_panic(expected = "dangling node id")]
    fn test_index_dead_slot_panics() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf(vec![1]));
        arena.release(a);
        let _ = &arena[a];
    }

    #[test]
    fn test_clear() {
        let mut arena = NodeArena::new();
        arena.alloc(leaf(vec![1]));
        arena.alloc(leaf(vec![2]));
        arena.clear();
        assert_eq!(arena.live_count(), 0);
        assert_eq!(arena.alloc(leaf(vec![3])), NodeId::new(0));
    }
}
