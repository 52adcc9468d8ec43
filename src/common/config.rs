//! Configuration for B-tree construction.

use crate::common::{Error, Result};

/// Minimum key count used when none is given.
///
/// Non-root nodes hold between 3 and 6 keys with this value.
pub const DEFAULT_MINIMUM_KEY_COUNT: usize = 3;

/// Smallest accepted minimum key count.
///
/// With `t = 1` every non-root node holds one or two keys, the smallest
/// configuration in which a split still leaves both halves non-empty.
pub const MIN_MINIMUM_KEY_COUNT: usize = 1;

/// Shape parameters for a [`BTree`](crate::BTree).
///
/// The tree copies its config at construction; the thresholds below are
/// fixed for the tree's lifetime.
///
/// # Example
/// ```
/// use keytree::TreeConfig;
///
/// let config = TreeConfig::new(2);
/// assert_eq!(config.minimum_key_count, 2);
/// assert_eq!(config.maximum_key_count(), 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Fewest keys any non-root node may hold after an operation (`t`).
    pub minimum_key_count: usize,
}

impl TreeConfig {
    /// Create a config with the given minimum key count.
    #[inline]
    pub fn new(minimum_key_count: usize) -> Self {
        Self { minimum_key_count }
    }

    /// Most keys any node may hold after an operation (`2t`).
    #[inline]
    pub fn maximum_key_count(&self) -> usize {
        2 * self.minimum_key_count
    }

    /// Check that the config describes a usable tree.
    ///
    /// # Errors
    /// - `Error::InvalidMinimumKeyCount` if `minimum_key_count` is 0
    pub fn validate(&self) -> Result<()> {
        if self.minimum_key_count < MIN_MINIMUM_KEY_COUNT {
            return Err(Error::InvalidMinimumKeyCount(self.minimum_key_count));
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_KEY_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TreeConfig::default();
        assert_eq!(config.minimum_key_count, DEFAULT_MINIMUM_KEY_COUNT);
        assert_eq!(config.maximum_key_count(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_rejected() {
        let err = TreeConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidMinimumKeyCount(0)));
    }

    #[test]
    fn test_smallest_accepted() {
        let config = TreeConfig::new(MIN_MINIMUM_KEY_COUNT);
        assert!(config.validate().is_ok());
        assert_eq!(config.maximum_key_count(), 2);
    }
}
