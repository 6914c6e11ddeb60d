use crate::index::{IndexType, NodeIndex};
use crate::node::Node;

/// Pushes a link of nodes on the left to stack.
fn left_link<T, Ix>(nodes: &[Node<T, Ix>], mut x: NodeIndex<Ix>, stack: &mut Vec<NodeIndex<Ix>>)
where
    Ix: IndexType,
{
    while x != NodeIndex::sentinel() {
        stack.push(x);
        x = nodes[x.index()].left();
    }
}

/// An iterator over the elements of an `RbTree`, in ascending order.
#[derive(Debug)]
pub struct Iter<'a, T, Ix> {
    /// Arena of the tree being walked
    nodes: &'a [Node<T, Ix>],
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<'a, T, Ix> Iter<'a, T, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(nodes: &'a [Node<T, Ix>], root: NodeIndex<Ix>) -> Self {
        let mut stack = Vec::new();
        left_link(nodes, root, &mut stack);
        Iter { nodes, stack }
    }
}

impl<T, Ix: Clone> Clone for Iter<'_, T, Ix> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            stack: self.stack.clone(),
        }
    }
}

impl<'a, T, Ix> Iterator for Iter<'a, T, Ix>
where
    Ix: IndexType,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        let node = &self.nodes[x.index()];
        left_link(self.nodes, node.right(), &mut self.stack);
        Some(node.element())
    }
}
