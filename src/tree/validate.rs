use core::fmt;

use super::RbTree;
use super::node::{Color, END, NIL};

/// A broken structural invariant detected by [`RbTree::validate`].
///
/// Seeing one of these always means a bug in the tree itself, never a misuse
/// that callers can recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The sentinel has a right child or the root does not point back to it
    BrokenSentinel,
    /// The root is red
    RedRoot,
    /// A red node has a red child
    RedRed {
        /// Arena index of the red parent
        node: usize,
    },
    /// Two paths below a node carry different numbers of black nodes
    BlackHeightMismatch {
        /// Arena index of the node whose subtrees disagree
        node: usize,
    },
    /// A key is out of order relative to one of its ancestors
    KeyOrder {
        /// Arena index of the misplaced node
        node: usize,
    },
    /// A child does not point back to its parent
    ParentLink {
        /// Arena index of the child with the wrong back-reference
        node: usize,
    },
    /// A vacant slot is linked into the tree
    VacantLinked {
        /// Arena index of the vacant slot
        node: usize,
    },
    /// The cached length disagrees with the reachable node count
    LengthMismatch {
        /// Cached length
        cached: usize,
        /// Nodes reachable from the root
        reachable: usize,
    },
    /// The cached minimum is not the leftmost node
    StaleMinimum,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrokenSentinel => write!(f, "sentinel links are corrupted"),
            Self::RedRoot => write!(f, "root is red"),
            Self::RedRed { node } => write!(f, "red node {node} has a red child"),
            Self::BlackHeightMismatch { node } => {
                write!(f, "black height differs below node {node}")
            }
            Self::KeyOrder { node } => write!(f, "key at node {node} is out of order"),
            Self::ParentLink { node } => {
                write!(f, "node {node} does not point back to its parent")
            }
            Self::VacantLinked { node } => write!(f, "vacant slot {node} is linked into the tree"),
            Self::LengthMismatch { cached, reachable } => {
                write!(f, "cached length {cached} but {reachable} nodes reachable")
            }
            Self::StaleMinimum => write!(f, "cached minimum is not the leftmost node"),
        }
    }
}

impl core::error::Error for InvariantViolation {}

impl<K: Ord, V> RbTree<K, V> {
    /// Checks every Red-Black and bookkeeping invariant of the tree
    ///
    /// Runs in O(n). Debug builds call this after each mutation.
    ///
    /// # Returns
    ///
    /// * `Result<usize, InvariantViolation>` - The black height of the tree
    ///   (black nodes on any root-to-leaf path, `0` when empty), or the first
    ///   violation found
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let sentinel = self.node_at(END);
        if sentinel.right != NIL || sentinel.color != Color::Black || !sentinel.is_vacant() {
            return Err(InvariantViolation::BrokenSentinel);
        }

        let root = sentinel.left;
        if root != NIL && self.node_at(root).parent != END {
            return Err(InvariantViolation::BrokenSentinel);
        }
        if self.is_red(root) {
            return Err(InvariantViolation::RedRoot);
        }

        let mut reachable = 0;
        let black_height = self.verify_subtree(root, None, None, &mut reachable)?;

        if reachable != self.len {
            return Err(InvariantViolation::LengthMismatch {
                cached: self.len,
                reachable,
            });
        }

        let expected_min = if root == NIL { END } else { self.find_minimum(root) };
        if self.leftmost != expected_min {
            return Err(InvariantViolation::StaleMinimum);
        }

        Ok(black_height)
    }

    /// Returns the black height of the subtree at `idx`, with keys bounded by
    /// the exclusive `lower`/`upper` ancestors.
    fn verify_subtree(
        &self,
        idx: usize,
        lower: Option<&K>,
        upper: Option<&K>,
        reachable: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        if idx == NIL {
            return Ok(0);
        }

        let node = self.node_at(idx);
        let Some((key, _)) = node.entry.as_ref() else {
            return Err(InvariantViolation::VacantLinked { node: idx });
        };
        *reachable += 1;

        if lower.is_some_and(|lo| key <= lo) || upper.is_some_and(|hi| key >= hi) {
            return Err(InvariantViolation::KeyOrder { node: idx });
        }

        for child in [node.left, node.right] {
            if child != NIL && self.node_at(child).parent != idx {
                return Err(InvariantViolation::ParentLink { node: child });
            }
        }

        if self.is_red(idx) && (self.is_red(node.left) || self.is_red(node.right)) {
            return Err(InvariantViolation::RedRed { node: idx });
        }

        let left_height = self.verify_subtree(node.left, lower, Some(key), reachable)?;
        let right_height = self.verify_subtree(node.right, Some(key), upper, reachable)?;

        if left_height != right_height {
            return Err(InvariantViolation::BlackHeightMismatch { node: idx });
        }

        if self.is_black(idx) {
            Ok(left_height + 1)
        } else {
            Ok(left_height)
        }
    }
}
