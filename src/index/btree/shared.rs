//! SharedBTree - a lock-serialized handle for multi-threaded callers.
//!
//! The tree itself is single-threaded. This wrapper puts the whole tree
//! behind one `RwLock`:
//! - `insert` / `delete`: write lock (exclusive)
//! - lookups and size queries: read lock (shared between mutations)

use std::borrow::Borrow;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::common::{Result, TreeConfig};
use crate::index::btree::tree::BTree;

/// A [`BTree`] shareable across threads.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use keytree::SharedBTree;
///
/// let tree = Arc::new(SharedBTree::new(2).unwrap());
/// let handles: Vec<_> = (0..4)
///     .map(|worker| {
///         let tree = Arc::clone(&tree);
///         thread::spawn(move || {
///             for key in 0..25 {
///                 tree.insert(worker * 100 + key).unwrap();
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(tree.len(), 100);
/// ```
#[derive(Debug, Default)]
pub struct SharedBTree<K> {
    inner: RwLock<BTree<K>>,
}

impl<K> SharedBTree<K> {
    /// Create an empty shared tree with minimum key count `t`.
    ///
    /// # Errors
    /// - `Error::InvalidMinimumKeyCount` if `t` is 0
    pub fn new(minimum_key_count: usize) -> Result<Self> {
        BTree::new(minimum_key_count).map(Self::from)
    }

    /// Create an empty shared tree from a config.
    ///
    /// # Errors
    /// - `Error::InvalidMinimumKeyCount` if the config is rejected
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        BTree::with_config(config).map(Self::from)
    }

    /// Acquire the read lock for several lookups under one snapshot.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, BTree<K>> {
        self.inner.read()
    }

    /// Acquire the write lock for a batch of mutations.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, BTree<K>> {
        self.inner.write()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn height(&self) -> usize {
        self.inner.read().height()
    }

    /// Unwrap the tree once no other handle remains.
    pub fn into_inner(self) -> BTree<K> {
        self.inner.into_inner()
    }
}

impl<K: Ord> SharedBTree<K> {
    /// Insert a key under the write lock.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if the key is already present
    pub fn insert(&self, key: K) -> Result<()> {
        self.inner.write().insert(key)
    }

    /// Remove a key under the write lock.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if the key is absent
    pub fn delete<Q>(&self, key: &Q) -> Result<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.write().delete(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().contains(key)
    }
}

impl<K: Clone> SharedBTree<K> {
    /// Copy out every key in ascending order.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().iter().cloned().collect()
    }
}

impl<K> From<BTree<K>> for SharedBTree<K> {
    fn from(tree: BTree<K>) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }
}
