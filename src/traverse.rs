use std::ops::ControlFlow;

use crate::callback::Destroy;
use crate::error::Result;
use crate::handle::Handle;
use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::tree::RbTree;

/// Position of a node's own visit relative to its subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Node, then left subtree, then right subtree
    PreOrder,
    /// Left subtree, then node, then right subtree
    InOrder,
    /// Left subtree, then right subtree, then node
    PostOrder,
}

impl<T, C, D, Ix> RbTree<T, C, D, Ix>
where
    D: Destroy<T>,
    Ix: IndexType,
{
    /// Visit every element in `order`.
    ///
    /// The first [`ControlFlow::Break`] returned by `visit` ends the walk and is
    /// passed back to the caller.
    ///
    /// # Example
    /// ```rust
    /// use std::ops::ControlFlow;
    /// use rb_sentinel_tree::{Order, RbTree};
    ///
    /// let mut tree = RbTree::new();
    /// for k in [5, 3, 8, 1, 4] {
    ///     tree.insert(k).unwrap();
    /// }
    /// let mut seen = Vec::new();
    /// let flow = tree.apply(Order::InOrder, |&k| {
    ///     if k > 4 {
    ///         return ControlFlow::Break(k);
    ///     }
    ///     seen.push(k);
    ///     ControlFlow::Continue(())
    /// });
    /// assert_eq!(flow, ControlFlow::Break(5));
    /// assert_eq!(seen, vec![1, 3, 4]);
    /// ```
    pub fn apply<B, F>(&self, order: Order, mut visit: F) -> ControlFlow<B>
    where
        F: FnMut(&T) -> ControlFlow<B>,
    {
        self.apply_inner(self.root(), order, &mut visit)
    }

    /// Visit the elements of the subtree rooted at `handle`'s node in `order`.
    ///
    /// # Errors
    ///
    /// [`RbTreeError::InvalidHandle`](crate::RbTreeError::InvalidHandle) for a
    /// foreign or stale handle.
    pub fn apply_from<B, F>(
        &self,
        handle: Handle<Ix>,
        order: Order,
        mut visit: F,
    ) -> Result<ControlFlow<B>>
    where
        F: FnMut(&T) -> ControlFlow<B>,
    {
        let x = self.resolve(handle)?;
        Ok(self.apply_inner(x, order, &mut visit))
    }

    fn apply_inner<B, F>(&self, x: NodeIndex<Ix>, order: Order, visit: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&T) -> ControlFlow<B>,
    {
        if self.is_sentinel(x) {
            return ControlFlow::Continue(());
        }
        let element = self.node_ref(x, Node::element);
        if order == Order::PreOrder {
            visit(element)?;
        }
        self.apply_inner(self.node_ref(x, Node::left), order, visit)?;
        if order == Order::InOrder {
            visit(element)?;
        }
        self.apply_inner(self.node_ref(x, Node::right), order, visit)?;
        if order == Order::PostOrder {
            visit(element)?;
        }
        ControlFlow::Continue(())
    }
}
