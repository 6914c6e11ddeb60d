use std::sync::atomic::{AtomicU64, Ordering};

use crate::index::{DefaultIx, IndexType, NodeIndex};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one tree value, used to reject handles minted by another tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TreeId(u64);

impl TreeId {
    pub(crate) fn next() -> Self {
        TreeId(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A reference to one stored element, returned by insertion and lookup.
///
/// A handle stays valid until its element is removed from the tree, including
/// across rebalancing caused by other insertions and removals. Passing a handle
/// to a tree other than the one that produced it, or after its element has been
/// removed, is rejected with [`RbTreeError::InvalidHandle`](crate::RbTreeError::InvalidHandle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle<Ix = DefaultIx> {
    pub(crate) tree: TreeId,
    pub(crate) node: NodeIndex<Ix>,
    pub(crate) generation: u64,
}

impl<Ix: IndexType> Handle<Ix> {
    pub(crate) fn new(tree: TreeId, node: NodeIndex<Ix>, generation: u64) -> Self {
        Handle {
            tree,
            node,
            generation,
        }
    }

    /// Arena slot the handle points at.
    #[inline]
    pub fn index(&self) -> NodeIndex<Ix> {
        self.node
    }
}
