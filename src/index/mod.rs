//! Index structures.
//!
//! - [`btree`] - In-memory B-tree with split, rotation and merge rebalancing

pub mod btree;
