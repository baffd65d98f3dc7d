use super::RbTree;
use super::node::{Color, END, Handle};
use super::search::{Descent, Side};

impl<K: Ord, V> RbTree<K, V> {
    /// Inserts `value` under `key` unless the key is already present
    ///
    /// Duplicate keys are rejected: the tree is left untouched, the existing
    /// value is kept and `value` is dropped.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert
    /// * `value` - The value to store under the key
    ///
    /// # Returns
    ///
    /// * `(Handle, bool)` - The position of the new or already present entry,
    ///   and whether an insertion took place
    pub fn insert(&mut self, key: K, value: V) -> (Handle, bool) {
        self.emplace_with(key, || value)
    }

    /// Constructs an entry in place; same contract as [`RbTree::insert`]
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert
    /// * `value` - The value to store under the key
    ///
    /// # Returns
    ///
    /// * `(Handle, bool)` - The position of the new or already present entry,
    ///   and whether an insertion took place
    #[inline]
    pub fn emplace(&mut self, key: K, value: V) -> (Handle, bool) {
        self.insert(key, value)
    }

    /// Inserts a value built by `make` only if `key` is absent
    ///
    /// `make` is not called when the key is already present, so an expensive
    /// value is only ever constructed for an actual insertion.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert
    /// * `make` - Builds the value to store under the key
    ///
    /// # Returns
    ///
    /// * `(Handle, bool)` - The position of the new or already present entry,
    ///   and whether an insertion took place
    pub fn emplace_with<F>(&mut self, key: K, make: F) -> (Handle, bool)
    where
        F: FnOnce() -> V,
    {
        let (parent, side) = match self.descend(&key) {
            Descent::Occupied(existing) => return (Handle(existing), false),
            Descent::Vacant { parent, side } => (parent, side),
        };

        let new_idx = self.allocate_node(key, make(), parent);
        match side {
            Side::Left => self.node_at_mut(parent).left = new_idx,
            Side::Right => self.node_at_mut(parent).right = new_idx,
        }

        // A new minimum can only hang off the left of the old one.
        if self.leftmost == END || (parent == self.leftmost && side == Side::Left) {
            self.leftmost = new_idx;
        }

        self.len += 1;
        self.fix_insertion_violations(new_idx);

        #[cfg(debug_assertions)]
        debug_assert!(
            self.validate().is_ok(),
            "RB tree invariants violated after insertion"
        );

        (Handle(new_idx), true)
    }

    fn fix_insertion_violations(&mut self, mut node: usize) {
        // The sentinel is black, so the loop stops at the root's parent.
        while self.is_red(self.get_parent(node)) {
            let parent = self.get_parent(node);
            let grandparent = self.get_parent(parent);

            if parent == self.get_left(grandparent) {
                let aunt = self.get_right(grandparent);

                if self.is_red(aunt) {
                    self.set_color(parent, Color::Black);
                    self.set_color(aunt, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.get_right(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let updated_parent = self.get_parent(node);
                    let updated_grandparent = self.get_parent(updated_parent);
                    self.set_color(updated_parent, Color::Black);
                    self.set_color(updated_grandparent, Color::Red);
                    self.rotate_right(updated_grandparent);
                }
            } else {
                let aunt = self.get_left(grandparent);

                if self.is_red(aunt) {
                    self.set_color(parent, Color::Black);
                    self.set_color(aunt, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.get_left(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let updated_parent = self.get_parent(node);
                    let updated_grandparent = self.get_parent(updated_parent);
                    self.set_color(updated_parent, Color::Black);
                    self.set_color(updated_grandparent, Color::Red);
                    self.rotate_left(updated_grandparent);
                }
            }
        }
        self.set_color(self.root(), Color::Black);
    }
}
