//! Error types for keytree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All caller-visible outcomes that are not a success.
///
/// Rebalancing (split, rotation, merge, root collapse) never fails and has
/// no variant here. Only semantic outcomes reach the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The key to delete is not in the tree. The tree is unchanged.
    #[error("key not found")]
    KeyNotFound,

    /// The key to insert is already in the tree. The tree is unchanged.
    #[error("key already present")]
    DuplicateKey,

    /// The requested minimum key count cannot describe a B-tree.
    #[error("invalid minimum key count: {0} (must be at least 1)")]
    InvalidMinimumKeyCount(usize),

    /// A structural check failed.
    ///
    /// Only produced by `BTree::check_invariants`. Seeing this indicates a
    /// bug in the rebalancing code, not bad input.
    #[error("structural invariant violated: {0}")]
    InvariantViolation(String),
}
