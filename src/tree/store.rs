use log::trace;

use super::RbTree;
use super::node::{Color, END, NIL, Node};

impl<K, V> RbTree<K, V> {
    /// Places a fresh red node in a vacated slot, or at the end of the arena.
    pub(super) fn allocate_node(&mut self, key: K, value: V, parent: usize) -> usize {
        let node = Node::new(key, value, parent);
        match self.free_list.pop() {
            Some(idx) => {
                trace!("reusing arena slot {idx}");
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Vacates a slot that is no longer linked into the tree and hands back its entry.
    pub(super) fn deallocate_node(&mut self, idx: usize) -> Option<(K, V)> {
        debug_assert!(idx != END && idx != NIL);
        let node = self.node_at_mut(idx);
        let entry = node.entry.take();
        node.parent = NIL;
        node.left = NIL;
        node.right = NIL;
        node.color = Color::Black;
        self.free_list.push(idx);
        entry
    }

    #[inline]
    pub(super) fn node_at(&self, idx: usize) -> &Node<K, V> {
        debug_assert!(idx != NIL);
        &self.nodes[idx]
    }

    #[inline]
    pub(super) fn node_at_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        debug_assert!(idx != NIL);
        &mut self.nodes[idx]
    }

    /// Key stored at `idx`; the sentinel and vacant slots have none.
    #[inline]
    pub(super) fn key_at(&self, idx: usize) -> Option<&K> {
        self.nodes.get(idx)?.entry.as_ref().map(|(k, _)| k)
    }

    #[inline]
    pub(super) fn get_color(&self, idx: usize) -> Color {
        if idx == NIL {
            Color::Black
        } else {
            self.node_at(idx).color
        }
    }

    #[inline]
    pub(super) fn set_color(&mut self, idx: usize, color: Color) {
        if idx != NIL {
            self.node_at_mut(idx).color = color;
        }
    }

    #[inline]
    pub(super) fn is_red(&self, idx: usize) -> bool {
        self.get_color(idx) == Color::Red
    }

    #[inline]
    pub(super) fn is_black(&self, idx: usize) -> bool {
        self.get_color(idx) == Color::Black
    }

    #[inline]
    pub(super) fn get_parent(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self.node_at(idx).parent }
    }

    #[inline]
    pub(super) fn get_left(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self.node_at(idx).left }
    }

    #[inline]
    pub(super) fn get_right(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self.node_at(idx).right }
    }

    pub(super) fn find_minimum(&self, mut idx: usize) -> usize {
        while idx != NIL {
            let left = self.node_at(idx).left;
            if left == NIL {
                break;
            }
            idx = left;
        }
        idx
    }

    pub(super) fn find_maximum(&self, mut idx: usize) -> usize {
        while idx != NIL {
            let right = self.node_at(idx).right;
            if right == NIL {
                break;
            }
            idx = right;
        }
        idx
    }

    /// Points the parent slot that holds `old` at `new` instead.
    ///
    /// The sentinel is an ordinary parent here: replacing the root rewrites
    /// its left link.
    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        let parent_node = self.node_at_mut(parent);
        if parent_node.left == old {
            parent_node.left = new;
        } else {
            debug_assert_eq!(parent_node.right, old);
            parent_node.right = new;
        }
    }

    pub(super) fn rotate_left(&mut self, x: usize) {
        let y = self.get_right(x);
        debug_assert!(y != NIL, "left rotation needs a right child");

        let y_left = self.node_at(y).left;
        self.node_at_mut(x).right = y_left;
        if y_left != NIL {
            self.node_at_mut(y_left).parent = x;
        }

        let x_parent = self.node_at(x).parent;
        self.node_at_mut(y).parent = x_parent;
        self.replace_child(x_parent, x, y);

        self.node_at_mut(y).left = x;
        self.node_at_mut(x).parent = y;
    }

    pub(super) fn rotate_right(&mut self, y: usize) {
        let x = self.get_left(y);
        debug_assert!(x != NIL, "right rotation needs a left child");

        let x_right = self.node_at(x).right;
        self.node_at_mut(y).left = x_right;
        if x_right != NIL {
            self.node_at_mut(x_right).parent = y;
        }

        let y_parent = self.node_at(y).parent;
        self.node_at_mut(x).parent = y_parent;
        self.replace_child(y_parent, y, x);

        self.node_at_mut(x).right = y;
        self.node_at_mut(y).parent = x;
    }

    /// Moves the subtree rooted at `new` into the slot occupied by `old`.
    pub(super) fn transplant(&mut self, old: usize, new: usize) {
        let parent = self.node_at(old).parent;
        self.replace_child(parent, old, new);

        if new != NIL {
            self.node_at_mut(new).parent = parent;
        }
    }
}
