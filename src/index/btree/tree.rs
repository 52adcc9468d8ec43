//! BTree - the tree facade holding the root reference.
//!
//! The [`BTree`] provides:
//! - Construction from a minimum key count or a [`TreeConfig`]
//! - Search, insert, delete (in `search.rs`, `insert.rs`, `delete.rs`)
//! - Read accessors over nodes, size, height and statistics

use crate::common::{NodeId, Result, TreeConfig};
use crate::index::btree::arena::NodeArena;
use crate::index::btree::node::{BTreeNode, ParentLink};
use crate::index::btree::stats::TreeStats;

/// An order-parameterized B-tree over ordered keys.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │                        BTree<K>                          │
/// │  ┌──────────┐   ┌─────────────────────────────────────┐  │
/// │  │  root    │──▶│      arena: NodeArena<K>            │  │
/// │  │  NodeId  │   │  [Node0] [Node1] [ -- ] [Node3] ... │  │
/// │  └──────────┘   └─────────────────────────────────────┘  │
/// │  ┌──────────┐   ┌──────────┐   ┌──────────┐             │
/// │  │  config  │   │ len      │   │  stats   │             │
/// │  │  t, 2t   │   │ height   │   │TreeStats │             │
/// │  └──────────┘   └──────────┘   └──────────┘             │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// Every non-root node holds between `t` and `2t` keys after each completed
/// operation, and all leaves sit at the same depth.
///
/// # Usage
/// ```
/// use keytree::{BTree, Error};
///
/// let mut tree = BTree::new(2)?;
/// for key in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(key)?;
/// }
///
/// assert!(tree.search(&17).is_some());
/// assert!(tree.search(&99).is_none());
///
/// assert_eq!(tree.delete(&6), Ok(6));
/// assert_eq!(tree.delete(&6), Err(Error::KeyNotFound));
/// # Ok::<(), keytree::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BTree<K> {
    /// Owns every node of the tree.
    pub(super) arena: NodeArena<K>,

    /// The current root. Replaced on root split and root collapse.
    pub(super) root: NodeId,

    /// Shape parameters, fixed at construction.
    pub(super) config: TreeConfig,

    /// Number of keys stored.
    pub(super) len: usize,

    /// Number of levels; a lone root leaf is height 1.
    pub(super) height: usize,

    /// Rebalancing counters.
    pub(super) stats: TreeStats,
}

impl<K> BTree<K> {
    /// Create an empty tree with minimum key count `t`.
    ///
    /// # Errors
    /// - `Error::InvalidMinimumKeyCount` if `t` is 0
    pub fn new(minimum_key_count: usize) -> Result<Self> {
        Self::with_config(TreeConfig::new(minimum_key_count))
    }

    /// Create an empty tree from a config.
    ///
    /// # Errors
    /// - `Error::InvalidMinimumKeyCount` if the config is rejected
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    /// Build an empty tree from a config that already passed validation.
    fn empty(config: TreeConfig) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(BTreeNode::new_root(config.maximum_key_count()));

        Self {
            arena,
            root,
            config,
            len: 0,
            height: 1,
            stats: TreeStats::new(),
        }
    }

    // ========================================================================
    // Public API: Shape and size
    // ========================================================================

    /// Number of keys in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels, counting the root. An empty tree has height 1.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.arena.live_count()
    }

    /// The tree's config.
    #[inline]
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Fewest keys a non-root node may hold (`t`).
    #[inline]
    pub fn minimum_key_count(&self) -> usize {
        self.config.minimum_key_count
    }

    /// Most keys any node may hold (`2t`).
    #[inline]
    pub fn maximum_key_count(&self) -> usize {
        self.config.maximum_key_count()
    }

    /// Rebalancing counters since creation or the last reset.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // ========================================================================
    // Public API: Node access
    // ========================================================================

    /// Id of the current root.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &BTreeNode<K> {
        &self.arena[self.root]
    }

    /// Look up a node by id.
    ///
    /// Returns `None` if the id was never issued or its node has been
    /// released by a merge or root collapse.
    pub fn node(&self, id: NodeId) -> Option<&BTreeNode<K>> {
        self.arena.get(id)
    }

    /// Remove every key, leaving a single empty root leaf.
    ///
    /// The config is kept; the stats are not reset.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = self
            .arena
            .alloc(BTreeNode::new_root(self.config.maximum_key_count()));
        self.len = 0;
        self.height = 1;
    }

    // ========================================================================
    // Internal: Parent link maintenance
    // ========================================================================

    /// Point the children of `id` from position `from` onward back at `id`.
    ///
    /// Called after any change that moved children into `id` or shifted
    /// their positions.
    pub(super) fn relink_children(&mut self, id: NodeId, from: usize) {
        for index in from..self.arena[id].children.len() {
            let child = self.arena[id].children[index];
            self.arena[child].parent = Some(ParentLink::new(id, index));
        }
    }
}

impl<K> Default for BTree<K> {
    /// An empty tree with [`DEFAULT_MINIMUM_KEY_COUNT`](crate::common::config::DEFAULT_MINIMUM_KEY_COUNT).
    fn default() -> Self {
        Self::empty(TreeConfig::default())
    }
}
