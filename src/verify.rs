//! Structural self-checks.
//!
//! None of these run as part of insertion or removal; they exist so tests and
//! debugging sessions can confirm the tree is well formed.

use std::cmp::Ordering;

use crate::callback::{Compare, Destroy};
use crate::config::DuplicatePolicy;
use crate::error::Violation;
use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::tree::RbTree;

impl<T, C, D, Ix> RbTree<T, C, D, Ix>
where
    C: Compare<T>,
    D: Destroy<T>,
    Ix: IndexType,
{
    /// Check that every element lies between `lower` and `upper` and that each
    /// left subtree sorts before, and each right subtree after, its parent.
    ///
    /// Bounds are inclusive under [`DuplicatePolicy::Allow`] and exclusive under
    /// [`DuplicatePolicy::Replace`]. `None` leaves that side unbounded.
    pub fn check_order(&self, lower: Option<&T>, upper: Option<&T>) -> bool {
        self.check_order_inner(self.root(), lower, upper)
    }

    fn check_order_inner<'b>(
        &'b self,
        x: NodeIndex<Ix>,
        lower: Option<&'b T>,
        upper: Option<&'b T>,
    ) -> bool {
        if self.is_sentinel(x) {
            return true;
        }
        let element = self.node_ref(x, Node::element);
        let strict = self.options.duplicates == DuplicatePolicy::Replace;
        let below = lower.is_some_and(|lo| match self.compare.compare(element, lo) {
            Ordering::Less => true,
            Ordering::Equal => strict,
            Ordering::Greater => false,
        });
        let above = upper.is_some_and(|hi| match self.compare.compare(element, hi) {
            Ordering::Greater => true,
            Ordering::Equal => strict,
            Ordering::Less => false,
        });
        if below || above {
            log::debug!("order violated at {x:?}");
            return false;
        }
        self.check_order_inner(self.node_ref(x, Node::left), lower, Some(element))
            && self.check_order_inner(self.node_ref(x, Node::right), Some(element), upper)
    }

    /// Run every structural check and report the first broken property.
    ///
    /// Beyond order and coloring this confirms parent links, the cached
    /// minimum and the element count.
    ///
    /// # Errors
    ///
    /// The [`Violation`] found.
    pub fn validate(&self) -> Result<(), Violation> {
        if !self.check_order(None, None) {
            return Err(Violation::Order);
        }
        let _height = self.black_height_checked()?;
        let count = self.check_links()?;
        if count != self.len {
            log::debug!("{count} reachable nodes but length is {}", self.len);
            return Err(Violation::Length);
        }
        let root = self.root();
        let leftmost = (!self.is_sentinel(root)).then(|| self.tree_minimum(root));
        if self.min != leftmost {
            log::debug!("cached minimum {:?}, leftmost {leftmost:?}", self.min);
            return Err(Violation::MinCache);
        }
        Ok(())
    }
}

impl<T, C, D, Ix> RbTree<T, C, D, Ix>
where
    D: Destroy<T>,
    Ix: IndexType,
{
    /// Check the coloring rules and return the black-height of the root.
    ///
    /// The black-height counts the black nodes on any path from the root down
    /// to the sentinel, excluding the root and including the sentinel. It is
    /// `0` for an empty tree. `None` means a red node touches another red node,
    /// one of the fixed nodes or the root is red, or two paths disagree.
    ///
    /// # Example
    /// ```rust
    /// use rb_sentinel_tree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for k in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(k).unwrap();
    /// }
    /// assert_eq!(tree.check_black_height(), Some(2));
    /// ```
    pub fn check_black_height(&self) -> Option<usize> {
        self.black_height_checked().ok()
    }

    fn black_height_checked(&self) -> Result<usize, Violation> {
        let root = self.root();
        if self.node_ref(NodeIndex::root_stub(), Node::is_red)
            || self.node_ref(root, Node::is_red)
            || self.node_ref(NodeIndex::sentinel(), Node::is_red)
        {
            log::debug!("a fixed node or the root is red");
            return Err(Violation::Color);
        }
        let height = self.black_height_inner(root)?;
        Ok(if self.is_sentinel(root) { 0 } else { height - 1 })
    }

    /// Black nodes from `x` down to the sentinel, both ends included.
    fn black_height_inner(&self, x: NodeIndex<Ix>) -> Result<usize, Violation> {
        if self.is_sentinel(x) {
            return Ok(1);
        }
        if self.node_ref(x, Node::is_red)
            && (self.left_ref(x, Node::is_red)
                || self.right_ref(x, Node::is_red)
                || self.parent_ref(x, Node::is_red))
        {
            log::debug!("red node {x:?} has a red neighbour");
            return Err(Violation::Color);
        }
        let left = self.black_height_inner(self.node_ref(x, Node::left))?;
        let right = self.black_height_inner(self.node_ref(x, Node::right))?;
        if left != right {
            log::debug!("black-height {left} on the left of {x:?}, {right} on the right");
            return Err(Violation::BlackHeight);
        }
        Ok(left + usize::from(self.node_ref(x, Node::is_black)))
    }

    /// Confirm the fixed nodes are intact and every child points back at its
    /// parent. Returns the number of nodes reachable from the root.
    fn check_links(&self) -> Result<usize, Violation> {
        let sentinel = NodeIndex::sentinel();
        let stub = NodeIndex::root_stub();
        let fixed_intact = self.node_ref(sentinel, |n| {
            n.left() == sentinel && n.right() == sentinel && n.parent() == sentinel
        }) && self.node_ref(stub, |n| n.right() == sentinel && n.parent() == sentinel)
            && (self.is_sentinel(self.root()) || self.node_ref(self.root(), Node::parent) == stub);
        if !fixed_intact {
            log::debug!("sentinel or root stub links were overwritten");
            return Err(Violation::Link);
        }
        self.count_linked(self.root())
    }

    fn count_linked(&self, x: NodeIndex<Ix>) -> Result<usize, Violation> {
        if self.is_sentinel(x) {
            return Ok(0);
        }
        let mut count = 1;
        for child in [self.node_ref(x, Node::left), self.node_ref(x, Node::right)] {
            if self.is_sentinel(child) {
                continue;
            }
            if self.node_ref(child, Node::parent) != x {
                log::debug!("{child:?} does not point back at its parent {x:?}");
                return Err(Violation::Link);
            }
            count += self.count_linked(child)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod test {
    use crate::node::Color;
    use crate::{DropElement, DuplicatePolicy, OrdCompare, Options, RbTree};

    use super::*;

    fn sample() -> RbTree<i32> {
        let mut tree = RbTree::new();
        for k in [5, 3, 8, 1, 4, 7, 9] {
            tree.insert(k).unwrap();
        }
        tree
    }

    #[test]
    fn sample_tree_is_valid() {
        let tree = sample();
        assert!(tree.check_order(None, None));
        assert!(tree.check_order(Some(&1), Some(&9)));
        assert_eq!(tree.check_black_height(), Some(2));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn bounds_outside_the_elements_fail_order() {
        let tree = sample();
        assert!(!tree.check_order(Some(&2), None));
        assert!(!tree.check_order(None, Some(&8)));
    }

    #[test]
    fn strict_bounds_under_replace() {
        let options = Options::default().duplicates(DuplicatePolicy::Replace);
        let mut tree: RbTree<i32> = RbTree::with_options(options, OrdCompare, DropElement);
        for k in [2, 1, 3] {
            tree.insert(k).unwrap();
        }
        assert!(tree.check_order(Some(&0), Some(&4)));
        assert!(!tree.check_order(Some(&1), Some(&4)));
    }

    #[test]
    fn empty_tree_has_zero_black_height() {
        let tree = RbTree::<i32>::new();
        assert_eq!(tree.check_black_height(), Some(0));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn red_adjacent_nodes_are_detected() {
        let mut tree = sample();
        let three = tree.find(&3).unwrap().index();
        tree.nodes[three.index()].color = Color::Red;
        assert_eq!(tree.check_black_height(), None);
        assert_eq!(tree.validate(), Err(Violation::Color));
    }

    #[test]
    fn unequal_black_heights_are_detected() {
        let mut tree = sample();
        let one = tree.find(&1).unwrap().index();
        tree.nodes[one.index()].color = Color::Black;
        assert_eq!(tree.check_black_height(), None);
        assert_eq!(tree.validate(), Err(Violation::BlackHeight));
    }

    #[test]
    fn red_sentinel_is_detected() {
        let mut tree = sample();
        tree.nodes[0].color = Color::Red;
        assert_eq!(tree.check_black_height(), None);
        tree.nodes[0].color = Color::Black;
        tree.nodes[1].color = Color::Red;
        assert_eq!(tree.check_black_height(), None);
    }

    #[test]
    fn swapped_elements_break_order() {
        let mut tree = sample();
        let one = tree.find(&1).unwrap().index();
        let nine = tree.find(&9).unwrap().index();
        let low = tree.nodes[one.index()].element.take();
        let high = tree.nodes[nine.index()].element.take();
        tree.nodes[one.index()].element = high;
        tree.nodes[nine.index()].element = low;
        assert!(!tree.check_order(None, None));
        assert_eq!(tree.validate(), Err(Violation::Order));
    }

    #[test]
    fn stale_min_cache_is_detected() {
        let mut tree = sample();
        tree.min = tree.find(&3).map(|h| h.index());
        assert_eq!(tree.validate(), Err(Violation::MinCache));
    }
}
