//! keytree - An arena-backed, order-parameterized B-tree.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            keytree                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           SharedBTree (index/btree/shared.rs)            │   │
//! │  │        one RwLock around the tree for threaded use       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                BTree facade (tree.rs)                    │   │
//! │  │     search → insert (split) → delete (rotate / merge)    │   │
//! │  │        iter / range · check_invariants · TreeStats       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Node storage (arena.rs, node.rs)            │   │
//! │  │   NodeArena: slots + free list · BTreeNode · ParentLink  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - The B-tree
//!
//! # Logging
//! Structural events (splits, rotations, merges, root changes) are emitted
//! as `tracing` events at `debug`; per-operation events at `trace`. Install
//! any `tracing` subscriber to see them.
//!
//! # Quick Start
//! ```
//! use keytree::BTree;
//!
//! let mut tree = BTree::new(2).unwrap();
//! for key in [1, 5, 2, 4, 3, 9, 15, -5, 12, 18, 80, -25, 22, 31, -15] {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert_eq!(tree.first(), Some(&-25));
//! assert!(tree.contains(&12));
//!
//! tree.delete(&12).unwrap();
//! assert!(!tree.contains(&12));
//! assert!(tree.check_invariants().is_ok());
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_MINIMUM_KEY_COUNT, MIN_MINIMUM_KEY_COUNT};
pub use common::{Error, NodeId, Result, TreeConfig};

pub use index::btree::{
    BTree, BTreeNode, Iter, ParentLink, Range, SearchHit, SharedBTree, TreeStats,
};
