//! Rebalancing statistics.

use std::fmt;

/// Counters for the structural work a tree has done.
///
/// The tree mutates only through `&mut self`, so plain counters suffice.
/// Read them with [`BTree::stats`](crate::BTree::stats).
///
/// # Example
/// ```
/// use keytree::BTree;
///
/// let mut tree = BTree::new(1).unwrap();
/// for key in [1, 2, 3] {
///     tree.insert(key).unwrap();
/// }
/// let stats = tree.stats();
/// assert_eq!(stats.splits, 1);
/// assert_eq!(stats.root_splits, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Nodes split on overflow (root splits included).
    pub splits: u64,

    /// Splits that grew the tree by one level.
    pub root_splits: u64,

    /// Keys borrowed from a right sibling.
    pub rotations_from_right: u64,

    /// Keys borrowed from a left sibling.
    pub rotations_from_left: u64,

    /// Sibling pairs merged on underflow.
    pub merges: u64,

    /// Emptied roots replaced by their only child.
    pub root_collapses: u64,
}

impl TreeStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rotations in either direction.
    pub fn rotations(&self) -> u64 {
        self.rotations_from_right + self.rotations_from_left
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {} (root: {}), rotations: {}, merges: {}, collapses: {} }}",
            self.splits,
            self.root_splits,
            self.rotations(),
            self.merges,
            self.root_collapses
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TreeStats::new();
        assert_eq!(stats.splits, 0);
        assert_eq!(stats.rotations(), 0);
    }

    #[test]
    fn test_rotations_sum() {
        let stats = TreeStats {
            rotations_from_right: 3,
            rotations_from_left: 4,
            ..TreeStats::default()
        };
        assert_eq!(stats.rotations(), 7);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = TreeStats {
            splits: 9,
            merges: 2,
            ..TreeStats::default()
        };
        stats.reset();
        assert_eq!(stats, TreeStats::new());
    }

    #[test]
    fn test_stats_display() {
        let stats = TreeStats {
            splits: 5,
            root_splits: 2,
            rotations_from_right: 1,
            rotations_from_left: 1,
            merges: 3,
            root_collapses: 1,
        };
        let display = format!("{}", stats);

        assert!(display.contains("splits: 5 (root: 2)"));
        assert!(display.contains("rotations: 2"));
        assert!(display.contains("merges: 3"));
        assert!(display.contains("collapses: 1"));
    }
}
