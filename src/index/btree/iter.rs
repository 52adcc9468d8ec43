//! In-order iteration and range scans.

use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

use crate::common::NodeId;
use crate::index::btree::tree::BTree;

/// In-order iterator over a tree's keys.
///
/// Created by [`BTree::iter`].
///
/// The stack holds `(node, next key index)` pairs from the root down. The
/// top entry yields its next key, then descends to the leftmost leaf of the
/// subtree right after that key.
#[derive(Debug, Clone)]
pub struct Iter<'a, K> {
    tree: &'a BTree<K>,
    stack: Vec<(NodeId, usize)>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn new(tree: &'a BTree<K>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::with_capacity(tree.height()),
            remaining: tree.len(),
        };
        iter.push_left_spine(tree.root());
        iter
    }

    /// Push `id` and every first child below it.
    fn push_left_spine(&mut self, mut id: NodeId) {
        loop {
            self.stack.push((id, 0));
            match self.tree.arena[id].children.first() {
                Some(&child) => id = child,
                None => return,
            }
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let tree = self.tree;
        loop {
            let top = self.stack.last_mut()?;
            let (id, index) = *top;
            let node = &tree.arena[id];

            if index < node.keys.len() {
                top.1 += 1;
                if let Some(&child) = node.children.get(index + 1) {
                    self.push_left_spine(child);
                }
                self.remaining = self.remaining.saturating_sub(1);
                return Some(&node.keys[index]);
            }
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<'a, K> IntoIterator for &'a BTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

/// In-order iterator over the keys inside a range.
///
/// Created by [`BTree::range`].
#[derive(Debug, Clone)]
pub struct Range<'a, K, R> {
    inner: Iter<'a, K>,
    bounds: R,
    done: bool,
}

impl<'a, K: Ord, R: RangeBounds<K>> Iterator for Range<'a, K, R> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.done {
            return None;
        }
        let key = self.inner.next()?;
        let below_end = match self.bounds.end_bound() {
            Bound::Included(end) => key <= end,
            Bound::Excluded(end) => key < end,
            Bound::Unbounded => true,
        };
        if below_end {
            Some(key)
        } else {
            self.done = true;
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.inner.remaining))
        }
    }
}

impl<K: Ord, R: RangeBounds<K>> FusedIterator for Range<'_, K, R> {}

impl<K> BTree<K> {
    /// Iterate over all keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }
}

impl<K: Ord> BTree<K> {
    /// Iterate in ascending order over the keys inside `bounds`.
    ///
    /// The scan starts by descending to the lower bound, so keys below the
    /// range are never visited.
    ///
    /// # Example
    /// ```
    /// use keytree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// for key in 0..100 {
    ///     tree.insert(key).unwrap();
    /// }
    /// let picked: Vec<i32> = tree.range(10..15).copied().collect();
    /// assert_eq!(picked, vec![10, 11, 12, 13, 14]);
    /// ```
    pub fn range<R: RangeBounds<K>>(&self, bounds: R) -> Range<'_, K, R> {
        let mut inner = Iter {
            tree: self,
            stack: Vec::with_capacity(self.height()),
            remaining: self.len(),
        };

        let mut id = self.root;
        loop {
            let node = &self.arena[id];
            let start = match bounds.start_bound() {
                Bound::Included(start) => node.keys.partition_point(|k| k < start),
                Bound::Excluded(start) => node.keys.partition_point(|k| k <= start),
                Bound::Unbounded => 0,
            };
            inner.stack.push((id, start));
            match node.children.get(start) {
                Some(&child) => id = child,
                None => break,
            }
        }

        Range {
            inner,
            bounds,
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_from(t: usize, keys: impl IntoIterator<Item = i32>) -> BTree<i32> {
        let mut tree = BTree::new(t).unwrap();
        for key in keys {
            tree.insert(key).unwrap();
        }
        tree
    }

    #[test]
    fn test_iter_empty() {
        let tree: BTree<i32> = BTree::new(3).unwrap();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().len(), 0);
    }

    #[test]
    fn test_iter_sorted() {
        let input = [1, 5, 2, 4, 3, 9, 15, -5, 12, 18, 80, -25, 22, 31, -15];
        let tree = tree_from(2, input);

        let mut expected = input.to_vec();
        expected.sort_unstable();

        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected);
        assert_eq!(tree.iter().len(), input.len());
    }

    #[test]
    fn test_into_iter_for_reference() {
        let tree = tree_from(1, [3, 1, 2]);
        let mut seen = Vec::new();
        for key in &tree {
            seen.push(*key);
        }
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_range_bounds() {
        let tree = tree_from(2, (0..50).map(|k| k * 2));

        let inclusive: Vec<i32> = tree.range(10..=16).copied().collect();
        assert_eq!(inclusive, vec![10, 12, 14, 16]);

        let exclusive: Vec<i32> = tree.range(10..16).copied().collect();
        assert_eq!(exclusive, vec![10, 12, 14]);

        // Bounds falling between keys
        let between: Vec<i32> = tree.range(11..17).copied().collect();
        assert_eq!(between, vec![12, 14, 16]);

        let excluded_start: Vec<i32> = tree
            .range((Bound::Excluded(10), Bound::Included(14)))
            .copied()
            .collect();
        assert_eq!(excluded_start, vec![12, 14]);
    }

    #[test]
    fn test_range_open_ends() {
        let tree = tree_from(1, 0..30);

        assert_eq!(tree.range(..3).copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(tree.range(27..).copied().collect::<Vec<_>>(), vec![27, 28, 29]);
        assert_eq!(tree.range(..).count(), 30);
        assert_eq!(tree.range(100..).next(), None);
        assert_eq!(tree.range(5..5).next(), None);
    }

    #[test]
    fn test_range_matches_filter() {
        let tree = tree_from(3, (0..500).map(|k| (k * 37) % 1000));
        for (lo, hi) in [(0, 10), (123, 456), (990, 2000), (-5, 3)] {
            let scanned: Vec<i32> = tree.range(lo..hi).copied().collect();
            let filtered: Vec<i32> = tree
                .iter()
                .copied()
                .filter(|k| (lo..hi).contains(k))
                .collect();
            assert_eq!(scanned, filtered, "range {lo}..{hi}");
        }
    }
}
