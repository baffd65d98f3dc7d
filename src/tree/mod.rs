use alloc::vec::Vec;
use core::fmt;

use log::debug;

mod erase;
mod insert;
mod iter;
mod node;
mod search;
mod store;
mod validate;

pub use iter::{Iter, Keys, Values};
pub use node::Handle;
pub use validate::InvariantViolation;

use node::{END, Node};

/// An ordered key-value map implemented as a Red-Black tree.
///
/// Nodes live in an index arena: slot `0` is the sentinel/end node whose left
/// child is the root, every other slot holds one entry or sits on the free list
/// waiting to be reused. Links are plain indices, so rotations are a handful of
/// index reassignments and no node is ever owned twice.
///
/// Key features:
/// - O(log n) insertion, erasure and lookup
/// - Duplicate keys are rejected, the stored value is never overwritten
/// - Bidirectional stepping through [`Handle`]s that survive unrelated mutations
/// - O(1) access to the minimum through a cached leftmost index
#[derive(Clone)]
pub struct RbTree<K, V> {
    /// Node arena, index `END` is the sentinel
    nodes: Vec<Node<K, V>>,

    /// Stack of vacated arena slots available for reuse
    free_list: Vec<usize>,

    /// Number of live entries
    len: usize,

    /// Index of the minimum-key node, `END` when the tree is empty
    leftmost: usize,
}

impl<K, V> RbTree<K, V> {
    /// Creates an empty tree
    ///
    /// # Returns
    ///
    /// * `Self` - The empty tree
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tree with arena room for `capacity` entries.
    ///
    /// # Arguments
    ///
    /// * `capacity` - The number of entries that fit without reallocating
    ///
    /// # Returns
    ///
    /// * `Self` - The empty tree
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity < usize::MAX / 2,
            "Capacity too large - risk of index overflow"
        );

        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::sentinel());

        Self {
            nodes,
            free_list: Vec::new(),
            len: 0,
            leftmost: END,
        }
    }

    /// Returns the number of entries in the tree
    ///
    /// # Returns
    ///
    /// * `usize` - The number of entries
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no entries
    ///
    /// # Returns
    ///
    /// * `bool` - True if the tree is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of entries the tree can hold without reallocating
    ///
    /// # Returns
    ///
    /// * `usize` - The arena capacity, excluding the sentinel
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity() - 1
    }

    /// Reserves arena room for at least `additional` more entries
    ///
    /// # Arguments
    ///
    /// * `additional` - The number of extra entries to make room for
    pub fn reserve(&mut self, additional: usize) {
        let reusable = self.free_list.len();
        if additional > reusable {
            self.nodes.reserve(additional - reusable);
        }
    }

    /// Removes every entry, keeping the arena allocation
    pub fn clear(&mut self) {
        if self.len > 0 {
            debug!("clearing tree of {} entries", self.len);
        }
        self.nodes.truncate(1);
        self.nodes[END] = Node::sentinel();
        self.free_list.clear();
        self.len = 0;
        self.leftmost = END;
    }

    /// Returns the handle of the minimum entry, or `end()` when empty
    ///
    /// # Returns
    ///
    /// * `Handle` - The first position in key order
    #[inline]
    pub const fn begin(&self) -> Handle {
        Handle(self.leftmost)
    }

    /// Returns the past-the-end handle
    ///
    /// The end handle never refers to an entry. Stepping backwards from it
    /// reaches the maximum entry.
    ///
    /// # Returns
    ///
    /// * `Handle` - The sentinel position
    #[inline]
    pub const fn end(&self) -> Handle {
        Handle(END)
    }

    #[inline]
    pub(crate) fn root(&self) -> usize {
        self.nodes[END].left
    }
}

impl<K, V> Default for RbTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RbTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for RbTree<K, V> {
    /// Inserts every pair; a key already present keeps its existing value.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a RbTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
