use std::fmt;

use crate::callback::Destroy;
use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::tree::RbTree;

/// Signature of the function a [`TreeDisplay`] uses to render one element.
pub type ElementFmt<T> = fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result;

/// Sideways rendering of a tree: the root sits at the left margin, right
/// subtrees above their parent and left subtrees below, each level indented
/// eight columns further. Every line reads `label: element (color)` where the
/// label is `T` for the root, `R` or `L` for a right or left child, and the
/// color is `r` or `b`.
pub struct TreeDisplay<'a, T, Ix, F> {
    nodes: &'a [Node<T, Ix>],
    root: NodeIndex<Ix>,
    print: F,
}

impl<T, Ix, F> TreeDisplay<'_, T, Ix, F>
where
    Ix: IndexType,
    F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    fn write_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        x: NodeIndex<Ix>,
        depth: usize,
        label: &str,
    ) -> fmt::Result {
        if x == NodeIndex::sentinel() {
            return Ok(());
        }
        let node = &self.nodes[x.index()];
        self.write_node(f, node.right(), depth + 1, "R")?;
        write!(f, "{:width$}{label}: ", "", width = 8 * depth)?;
        (self.print)(node.element(), f)?;
        writeln!(f, " ({})", node.color().tag())?;
        self.write_node(f, node.left(), depth + 1, "L")
    }
}

impl<T, Ix, F> fmt::Display for TreeDisplay<'_, T, Ix, F>
where
    Ix: IndexType,
    F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root, 0, "T")
    }
}

impl<T, C, D, Ix> RbTree<T, C, D, Ix>
where
    D: Destroy<T>,
    Ix: IndexType,
{
    /// Render the tree, formatting each element with `print`.
    ///
    /// # Example
    /// ```rust
    /// use rb_sentinel_tree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for c in ['b', 'a', 'c'] {
    ///     tree.insert(c).unwrap();
    /// }
    /// let shown = tree.display_with(|c, f| write!(f, "{}", c.to_ascii_uppercase()));
    /// assert_eq!(shown.to_string(), "        R: C (r)\nT: B (b)\n        L: A (r)\n");
    /// ```
    pub fn display_with<F>(&self, print: F) -> TreeDisplay<'_, T, Ix, F>
    where
        F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        TreeDisplay {
            nodes: &self.nodes,
            root: self.root(),
            print,
        }
    }

    /// Render the tree using the elements' [`Display`](fmt::Display) impl.
    pub fn display(&self) -> TreeDisplay<'_, T, Ix, ElementFmt<T>>
    where
        T: fmt::Display,
    {
        self.display_with(<T as fmt::Display>::fmt as ElementFmt<T>)
    }
}

#[cfg(test)]
mod test {
    use crate::RbTree;

    #[test]
    fn empty_tree_renders_nothing() {
        let tree = RbTree::<u8>::new();
        assert_eq!(tree.display().to_string(), "");
    }

    #[test]
    fn nested_levels_are_indented() {
        let mut tree = RbTree::new();
        for k in [5, 3, 8, 1] {
            tree.insert(k).unwrap();
        }
        // 1 forced a recolor: 3 and 8 black, 5 black again as root
        let expected = concat!(
            "        R: 8 (b)\n",
            "T: 5 (b)\n",
            "        L: 3 (b)\n",
            "                L: 1 (r)\n",
        );
        assert_eq!(tree.display().to_string(), expected);
    }
}
