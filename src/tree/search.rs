use core::{borrow::Borrow, cmp::Ordering};

use super::node::{END, Handle, NIL};
use super::RbTree;

/// Which child slot of a parent a new node goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    Left,
    Right,
}

/// Outcome of walking down from the root towards a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Descent {
    /// The key is stored at this index
    Occupied(usize),
    /// The key is absent and belongs in `side` of `parent`
    /// (the sentinel's left slot when the tree is empty)
    Vacant { parent: usize, side: Side },
}

impl<K, V> RbTree<K, V> {
    pub(super) fn descend<Q>(&self, key: &Q) -> Descent
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut parent = END;
        let mut side = Side::Left;
        let mut current = self.root();

        while current != NIL {
            let node = self.node_at(current);
            let Some((node_key, _)) = node.entry.as_ref() else {
                unreachable!("vacant slot linked into the tree");
            };
            parent = current;
            match node_key.borrow().cmp(key) {
                Ordering::Equal => return Descent::Occupied(current),
                Ordering::Greater => {
                    side = Side::Left;
                    current = node.left;
                }
                Ordering::Less => {
                    side = Side::Right;
                    current = node.right;
                }
            }
        }

        Descent::Vacant { parent, side }
    }

    pub(super) fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.descend(key) {
            Descent::Occupied(idx) => Some(idx),
            Descent::Vacant { .. } => None,
        }
    }

    /// Returns the handle of `key`, or `end()` if it is not present
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up
    ///
    /// # Returns
    ///
    /// * `Handle` - The position of the key, `end()` when missing
    pub fn find<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Handle(self.find_index(key).unwrap_or(END))
    }

    /// Returns a reference to the value stored under `key`
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up
    ///
    /// # Returns
    ///
    /// * `Option<&V>` - The value, if the key is present
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let idx = self.find_index(key)?;
        self.node_at(idx).entry.as_ref().map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored under `key`
    ///
    /// Values can be changed in place; the key and tree shape stay untouched.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up
    ///
    /// # Returns
    ///
    /// * `Option<&mut V>` - The value, if the key is present
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let idx = self.find_index(key)?;
        self.node_at_mut(idx).entry.as_mut().map(|(_, v)| v)
    }

    /// Returns true if `key` is present
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up
    ///
    /// # Returns
    ///
    /// * `bool` - True if the key is stored in the tree
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(key).is_some()
    }
}
