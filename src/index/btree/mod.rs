//! B-tree index implementation.
//!
//! An order-parameterized multiway search tree. With minimum key count `t`,
//! every non-root node holds between `t` and `2t` keys and all leaves sit at
//! the same depth.
//!
//! # Components
//! - [`BTree`] - The tree facade owning the root and the node arena
//! - [`BTreeNode`] / [`ParentLink`] - Nodes and their non-owning parent links
//! - [`SearchHit`] - Where a key lives
//! - [`Iter`] / [`Range`] - In-order iteration and range scans
//! - [`TreeStats`] - Split / rotation / merge counters
//! - [`SharedBTree`] - Lock-serialized handle for multi-threaded callers
//!
//! # Operation files
//! - `search.rs` - top-down lookup
//! - `insert.rs` - leaf insert with split propagation and root growth
//! - `delete.rs` - successor swap, rotation, merge, root collapse
//! - `invariants.rs` - structural self-check

mod arena;
mod delete;
mod insert;
mod invariants;
mod iter;
mod node;
mod search;
mod shared;
mod stats;
mod tree;

pub use iter::{Iter, Range};
pub use node::{BTreeNode, ParentLink};
pub use search::SearchHit;
pub use shared::SharedBTree;
pub use stats::TreeStats;
pub use tree::BTree;
