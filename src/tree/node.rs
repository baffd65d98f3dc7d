/// Index of the sentinel/end node in the arena.
///
/// Its left child is the root of the tree; its right child is always [`NIL`].
pub(crate) const END: usize = 0;

/// Marker for an absent child link.
pub(crate) const NIL: usize = usize::MAX;

/// Red-Black tree node colors used to maintain tree balance properties.
///
/// Red-Black trees maintain balance by ensuring:
/// - Red nodes have black children
/// - All paths from root to leaves have equal black node counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    /// Red node - must have black children, cannot be adjacent to other red nodes
    Red,
    /// Black node - can have children of any color, contributes to black height
    Black,
}

/// A slot of the node arena.
///
/// The sentinel and vacated slots carry no entry. Links are arena indices,
/// `NIL` when absent.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    /// The stored key/value pair, `None` for the sentinel and free slots
    pub(crate) entry: Option<(K, V)>,

    /// Index of the parent node (the sentinel for the root)
    pub(crate) parent: usize,

    /// Index of the left child node
    pub(crate) left: usize,

    /// Index of the right child node
    pub(crate) right: usize,

    /// Color of this node used for Red-Black tree balancing
    pub(crate) color: Color,
}

impl<K, V> Node<K, V> {
    pub(crate) const fn sentinel() -> Self {
        Self {
            entry: None,
            parent: NIL,
            left: NIL,
            right: NIL,
            color: Color::Black,
        }
    }

    pub(crate) const fn new(key: K, value: V, parent: usize) -> Self {
        Self {
            entry: Some((key, value)),
            parent,
            left: NIL,
            right: NIL,
            color: Color::Red,
        }
    }

    #[inline]
    pub(crate) const fn is_vacant(&self) -> bool {
        self.entry.is_none()
    }
}

/// A position inside an [`RbTree`](crate::RbTree), comparable by identity.
///
/// Handles are plain indices: they do not borrow the tree, so they can be kept
/// across insertions and across erasure of *other* entries. A handle to an
/// erased entry is dangling; passing it back to the tree is a caller error and
/// may observe whichever entry later reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub(crate) usize);

impl Handle {
    /// Returns `true` if this handle is the past-the-end position
    ///
    /// # Returns
    ///
    /// * `bool` - True if the handle equals `end()`
    #[inline]
    pub const fn is_end(self) -> bool {
        self.0 == END
    }
}
