use core::iter::FusedIterator;

use super::RbTree;
use super::node::{END, Handle, NIL};

impl<K, V> RbTree<K, V> {
    /// In-order successor of `idx`, `END` after the maximum.
    pub(super) fn successor(&self, idx: usize) -> usize {
        debug_assert!(idx != END && idx != NIL);

        let right = self.node_at(idx).right;
        if right != NIL {
            return self.find_minimum(right);
        }

        // Climb while we are a right child. The root hangs off the sentinel's
        // left, so the climb ends at `END` after the maximum.
        let mut current = idx;
        let mut parent = self.node_at(current).parent;
        while self.node_at(parent).right == current {
            current = parent;
            parent = self.node_at(current).parent;
        }
        parent
    }

    /// In-order predecessor of `idx`; the maximum for `END`, `END` before the minimum.
    pub(super) fn predecessor(&self, idx: usize) -> usize {
        debug_assert!(idx != NIL);

        let left = self.node_at(idx).left;
        if left != NIL {
            return self.find_maximum(left);
        }
        if idx == END {
            return END;
        }

        let mut current = idx;
        let mut parent = self.node_at(current).parent;
        while parent != END && self.node_at(parent).left == current {
            current = parent;
            parent = self.node_at(current).parent;
        }
        parent
    }

    /// Steps `handle` to the next entry in key order
    ///
    /// Stepping past the maximum yields `end()`; stepping from `end()` stays
    /// at `end()`.
    ///
    /// # Arguments
    ///
    /// * `handle` - A position in this tree
    ///
    /// # Returns
    ///
    /// * `Handle` - The following position
    pub fn next(&self, handle: Handle) -> Handle {
        if handle.is_end() {
            return handle;
        }
        debug_assert!(
            !self.node_at(handle.0).is_vacant(),
            "stepping a dangling handle"
        );
        Handle(self.successor(handle.0))
    }

    /// Steps `handle` to the previous entry in key order
    ///
    /// Stepping back from `end()` yields the maximum; stepping back from the
    /// minimum yields `end()`.
    ///
    /// # Arguments
    ///
    /// * `handle` - A position in this tree
    ///
    /// # Returns
    ///
    /// * `Handle` - The preceding position
    pub fn prev(&self, handle: Handle) -> Handle {
        debug_assert!(
            handle.is_end() || !self.node_at(handle.0).is_vacant(),
            "stepping a dangling handle"
        );
        Handle(self.predecessor(handle.0))
    }

    /// Returns the key at `handle`, `None` for `end()`
    ///
    /// # Arguments
    ///
    /// * `handle` - A position in this tree
    ///
    /// # Returns
    ///
    /// * `Option<&K>` - The key stored at the position
    pub fn key(&self, handle: Handle) -> Option<&K> {
        self.key_at(handle.0)
    }

    /// Returns the value at `handle`, `None` for `end()`
    ///
    /// # Arguments
    ///
    /// * `handle` - A position in this tree
    ///
    /// # Returns
    ///
    /// * `Option<&V>` - The value stored at the position
    pub fn value(&self, handle: Handle) -> Option<&V> {
        self.nodes.get(handle.0)?.entry.as_ref().map(|(_, v)| v)
    }

    /// Returns the value at `handle` for in-place modification
    ///
    /// # Arguments
    ///
    /// * `handle` - A position in this tree
    ///
    /// # Returns
    ///
    /// * `Option<&mut V>` - The value stored at the position
    pub fn value_mut(&mut self, handle: Handle) -> Option<&mut V> {
        self.nodes.get_mut(handle.0)?.entry.as_mut().map(|(_, v)| v)
    }

    /// Returns the key/value pair at `handle`, `None` for `end()`
    ///
    /// # Arguments
    ///
    /// * `handle` - A position in this tree
    ///
    /// # Returns
    ///
    /// * `Option<(&K, &V)>` - The entry stored at the position
    pub fn entry(&self, handle: Handle) -> Option<(&K, &V)> {
        self.nodes.get(handle.0)?.entry.as_ref().map(|(k, v)| (k, v))
    }

    /// Returns the minimum entry in O(1)
    ///
    /// # Returns
    ///
    /// * `Option<(&K, &V)>` - The entry with the smallest key
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entry(self.begin())
    }

    /// Returns the maximum entry
    ///
    /// # Returns
    ///
    /// * `Option<(&K, &V)>` - The entry with the largest key
    pub fn last(&self) -> Option<(&K, &V)> {
        self.entry(self.prev(self.end()))
    }

    /// Returns an iterator over the entries in key order
    ///
    /// # Returns
    ///
    /// * `Iter<'_, K, V>` - A double-ended iterator of `(&K, &V)`
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: self,
            front: self.leftmost,
            back: END,
            remaining: self.len,
        }
    }

    /// Returns an iterator over the keys in ascending order
    ///
    /// # Returns
    ///
    /// * `Keys<'_, K, V>` - A double-ended iterator of `&K`
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in key order
    ///
    /// # Returns
    ///
    /// * `Values<'_, K, V>` - A double-ended iterator of `&V`
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

/// Iterator over the entries of an [`RbTree`] in key order.
///
/// Walks parent/child links only; `front` is the next slot to yield, `back` is
/// one past the last slot to yield.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    tree: &'a RbTree<K, V>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.tree.entry(Handle(self.front))?;
        self.front = self.tree.successor(self.front);
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back = self.tree.predecessor(self.back);
        self.remaining -= 1;
        self.tree.entry(Handle(self.back))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the keys of an [`RbTree`] in ascending order.
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over the values of an [`RbTree`] in key order.
#[derive(Debug, Clone)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}
