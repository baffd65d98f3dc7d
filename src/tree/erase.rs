use core::borrow::Borrow;

use log::trace;

use super::RbTree;
use super::node::{Color, END, Handle, NIL};

impl<K: Ord, V> RbTree<K, V> {
    /// Erases the entry at `handle`
    ///
    /// Handles to other entries stay valid. `handle` itself dangles afterwards;
    /// step it backwards first if it must be kept.
    ///
    /// # Arguments
    ///
    /// * `handle` - The position of a live entry
    ///
    /// # Returns
    ///
    /// * `Handle` - The position of the next entry in key order, or `end()`
    ///
    /// # Panics
    ///
    /// Panics if `handle` is `end()`. Passing a handle whose entry was already
    /// erased is a caller error caught by a debug assertion only.
    pub fn erase(&mut self, handle: Handle) -> Handle {
        assert!(!handle.is_end(), "cannot erase the end handle");
        let (next, _) = self.unlink(handle.0);
        Handle(next)
    }

    /// Removes `key` and returns its value
    ///
    /// # Arguments
    ///
    /// * `key` - The key to remove
    ///
    /// # Returns
    ///
    /// * `Option<V>` - The removed value, `None` if the key was absent
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key` and returns the stored key/value pair
    ///
    /// # Arguments
    ///
    /// * `key` - The key to remove
    ///
    /// # Returns
    ///
    /// * `Option<(K, V)>` - The removed entry, `None` if the key was absent
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let idx = self.find_index(key)?;
        self.unlink(idx).1
    }

    /// Removes and returns the minimum entry
    ///
    /// # Returns
    ///
    /// * `Option<(K, V)>` - The removed entry, `None` if the tree is empty
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        if self.leftmost == END {
            return None;
        }
        self.unlink(self.leftmost).1
    }

    /// Removes and returns the maximum entry
    ///
    /// # Returns
    ///
    /// * `Option<(K, V)>` - The removed entry, `None` if the tree is empty
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let max = self.find_maximum(self.root());
        if max == NIL {
            return None;
        }
        self.unlink(max).1
    }

    /// Detaches `node`, rebalances and frees its slot.
    ///
    /// Returns the in-order successor index together with the removed entry.
    fn unlink(&mut self, node: usize) -> (usize, Option<(K, V)>) {
        debug_assert!(
            !self.node_at(node).is_vacant(),
            "erase through a dangling handle"
        );

        let next = self.successor(node);
        if node == self.leftmost {
            trace!("minimum moves from slot {node} to slot {next}");
            self.leftmost = next;
        }

        let (removed_color, fixup_node, fixup_parent) = self.perform_deletion(node);
        if removed_color == Color::Black {
            self.fix_deletion_violations(fixup_node, fixup_parent);
        }

        self.len -= 1;
        let entry = self.deallocate_node(node);

        #[cfg(debug_assertions)]
        debug_assert!(
            self.validate().is_ok(),
            "RB tree invariants violated after removal"
        );

        (next, entry)
    }

    /// Splices `node` out of the tree.
    ///
    /// Returns the color that left the tree together with the node now in the
    /// vacated position (possibly `NIL`) and that position's parent.
    fn perform_deletion(&mut self, node: usize) -> (Color, usize, usize) {
        let original_color = self.get_color(node);
        let left = self.node_at(node).left;
        let right = self.node_at(node).right;

        if left == NIL {
            let fixup_parent = self.node_at(node).parent;
            self.transplant(node, right);
            return (original_color, right, fixup_parent);
        }

        if right == NIL {
            let fixup_parent = self.node_at(node).parent;
            self.transplant(node, left);
            return (original_color, left, fixup_parent);
        }

        let successor = self.find_minimum(right);
        let successor_color = self.get_color(successor);
        let fixup_node = self.node_at(successor).right;

        let fixup_parent = if self.node_at(successor).parent == node {
            successor
        } else {
            let successor_parent = self.node_at(successor).parent;
            self.transplant(successor, fixup_node);
            self.node_at_mut(successor).right = right;
            self.node_at_mut(right).parent = successor;
            successor_parent
        };

        self.transplant(node, successor);
        self.node_at_mut(successor).left = left;
        self.node_at_mut(left).parent = successor;
        self.node_at_mut(successor).color = original_color;

        (successor_color, fixup_node, fixup_parent)
    }

    fn fix_deletion_violations(&mut self, mut fixup_node: usize, mut fixup_parent: usize) {
        while fixup_node != self.root() && self.is_black(fixup_node) {
            if fixup_node != NIL {
                fixup_parent = self.node_at(fixup_node).parent;
            }

            if fixup_node == self.get_left(fixup_parent) {
                let mut sibling = self.get_right(fixup_parent);

                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(fixup_parent, Color::Red);
                    self.rotate_left(fixup_parent);
                    sibling = self.get_right(fixup_parent);
                }

                if self.is_black(self.get_left(sibling)) && self.is_black(self.get_right(sibling)) {
                    self.set_color(sibling, Color::Red);
                    fixup_node = fixup_parent;
                } else {
                    if self.is_black(self.get_right(sibling)) {
                        self.set_color(self.get_left(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.get_right(fixup_parent);
                    }

                    self.set_color(sibling, self.get_color(fixup_parent));
                    self.set_color(fixup_parent, Color::Black);
                    self.set_color(self.get_right(sibling), Color::Black);
                    self.rotate_left(fixup_parent);
                    fixup_node = self.root();
                }
            } else {
                let mut sibling = self.get_left(fixup_parent);

                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(fixup_parent, Color::Red);
                    self.rotate_right(fixup_parent);
                    sibling = self.get_left(fixup_parent);
                }

                if self.is_black(self.get_right(sibling)) && self.is_black(self.get_left(sibling)) {
                    self.set_color(sibling, Color::Red);
                    fixup_node = fixup_parent;
                } else {
                    if self.is_black(self.get_left(sibling)) {
                        self.set_color(self.get_right(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.get_left(fixup_parent);
                    }

                    self.set_color(sibling, self.get_color(fixup_parent));
                    self.set_color(fixup_parent, Color::Black);
                    self.set_color(self.get_left(sibling), Color::Black);
                    self.rotate_right(fixup_parent);
                    fixup_node = self.root();
                }
            }
        }

        self.set_color(fixup_node, Color::Black);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn keys(tree: &RbTree<i32, i32>) -> Vec<i32> {
        tree.keys().copied().collect()
    }

    fn build(keys: &[i32]) -> (RbTree<i32, i32>, Vec<Handle>) {
        let mut tree = RbTree::new();
        let handles = keys
            .iter()
            .map(|&k| {
                let (handle, inserted) = tree.insert(k, 1);
                assert!(inserted);
                handle
            })
            .collect();
        (tree, handles)
    }

    #[test]
    fn test_erase_returns_successor() {
        let (mut tree, handles) = build(&[4, 1, 7, 2, 3, 5, 6]);

        let next = tree.erase(handles[0]);
        assert_eq!(tree.key(next), Some(&5));

        let next = tree.erase(handles[5]);
        assert_eq!(tree.key(next), Some(&6));

        assert_eq!(keys(&tree), [1, 2, 3, 6, 7]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_iteration_after_erase() {
        let input = [4, 1, 7, 2, 3, 5, 6];
        let (mut tree, handles) = build(&input);

        for (i, &handle) in handles.iter().enumerate().take(3) {
            tree.erase(handle);
            assert!(tree.keys().all(|&k| k != input[i]));
            assert!(tree.validate().is_ok());
        }
        assert_eq!(keys(&tree), [2, 3, 5, 6]);
    }

    #[test]
    fn test_erase_maximum_returns_end() {
        let (mut tree, _) = build(&[1, 2, 3]);
        let last = tree.prev(tree.end());
        assert_eq!(tree.erase(last), tree.end());
        assert_eq!(keys(&tree), [1, 2]);
    }

    #[test]
    #[should_panic(expected = "cannot erase the end handle")]
    fn test_erase_end_panics() {
        let (mut tree, _) = build(&[1]);
        let end = tree.end();
        tree.erase(end);
    }

    #[test]
    fn test_erase_minimum_updates_begin() {
        let (mut tree, _) = build(&[8, 3, 10, 1, 6, 14, 4, 7, 13]);

        let mut expected = keys(&tree);
        while !tree.is_empty() {
            let begin = tree.begin();
            assert_eq!(tree.key(begin), expected.first());
            let next = tree.erase(begin);
            expected.remove(0);
            assert_eq!(next, tree.begin());
            assert!(tree.validate().is_ok());
        }
        assert_eq!(tree.begin(), tree.end());
    }

    #[test]
    fn test_erase_only_element() {
        let (mut tree, handles) = build(&[5]);
        assert_eq!(tree.erase(handles[0]), tree.end());
        assert!(tree.is_empty());
        assert_eq!(tree.begin(), tree.end());
        assert_eq!(tree.root(), NIL);
        assert_eq!(tree.validate(), Ok(0));
    }

    #[test]
    fn test_erase_node_with_deep_successor() {
        let (mut tree, _) = build(&[50, 25, 75, 12, 37, 62, 87, 6, 18, 31, 43, 55, 70]);
        let h = tree.find(&50);
        let next = tree.erase(h);
        assert_eq!(tree.key(next), Some(&55));
        assert!(tree.validate().is_ok());
        assert_eq!(keys(&tree), [6, 12, 18, 25, 31, 37, 43, 55, 62, 70, 75, 87]);
    }

    #[test]
    fn test_remove_by_key() {
        let (mut tree, _) = build(&[5, 2, 8, 1, 3, 7, 9]);

        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(tree.remove(&5), Some(1));
        assert_eq!(tree.remove(&8), Some(1));
        assert_eq!(tree.remove(&100), None);

        assert_eq!(tree.len(), 4);
        assert_eq!(keys(&tree), [2, 3, 7, 9]);
        assert_eq!(tree.remove_entry(&9), Some((9, 1)));
    }

    #[test]
    fn test_pop_first_and_last() {
        let (mut tree, _) = build(&[3, 1, 2]);
        assert_eq!(tree.pop_first(), Some((1, 1)));
        assert_eq!(tree.pop_last(), Some((3, 1)));
        assert_eq!(tree.pop_last(), Some((2, 1)));
        assert_eq!(tree.pop_first(), None);
        assert_eq!(tree.pop_last(), None);
    }

    #[test]
    fn test_deletion_stress() {
        let mut tree = RbTree::new();
        for i in 0..500 {
            tree.insert(i, i);
        }
        for i in (0..500).step_by(2) {
            assert_eq!(tree.remove(&i), Some(i));
        }

        assert_eq!(tree.len(), 250);
        for i in (1..500).step_by(2) {
            assert!(tree.contains_key(&i));
        }
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_rb_tree_invariants_mixed_operations() {
        let mut tree = RbTree::new();
        let operations = [
            (true, 50),
            (true, 25),
            (true, 75),
            (true, 12),
            (true, 37),
            (false, 25),
            (true, 100),
            (false, 50),
            (true, 1),
            (false, 12),
            (true, 200),
            (true, 150),
            (false, 75),
            (true, 300),
            (false, 1),
        ];

        for (is_insert, key) in operations {
            if is_insert {
                tree.insert(key, key);
            } else {
                tree.remove(&key);
            }
            assert!(tree.validate().is_ok(), "invalid after {is_insert} {key}");
        }
        assert_eq!(keys(&tree), [37, 100, 150, 200, 300]);
    }

    #[test]
    fn test_insert_all_then_erase_all() {
        let input: Vec<i32> = (0..200).map(|i| (i * 37) % 200).collect();
        let (mut tree, _) = build(&input);

        for (n, key) in input.iter().rev().enumerate() {
            assert_eq!(tree.remove(key), Some(1));
            assert_eq!(tree.len(), input.len() - n - 1);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.begin(), tree.end());
        assert_eq!(tree.validate(), Ok(0));
    }
}
