use std::cmp::Ordering;
use std::fmt;

use crate::callback::{Compare, Destroy, DropElement, OrdCompare};
use crate::config::{DuplicatePolicy, Options};
use crate::error::{InsertError, RbTreeError, Result};
use crate::handle::{Handle, TreeId};
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::Iter;
use crate::node::{Color, Node};
use crate::stats::RotationStats;

/// An ordered container of elements, balanced as a red-black tree.
///
/// Nodes live in an arena. Slot `0` is the sentinel that stands in for every
/// missing child, slot `1` is the root stub whose left child is the real root.
/// Both are black and never hold an element.
pub struct RbTree<T, C = OrdCompare, D = DropElement, Ix = DefaultIx>
where
    D: Destroy<T>,
    Ix: IndexType,
{
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<T, Ix>>,
    /// Slots freed by removals, reused before the vector grows
    pub(crate) free: Vec<NodeIndex<Ix>>,
    /// Leftmost node, `None` iff the tree is empty
    pub(crate) min: Option<NodeIndex<Ix>>,
    /// Number of elements in the tree
    pub(crate) len: usize,
    /// Identity stamped into every handle this tree gives out
    pub(crate) id: TreeId,
    pub(crate) options: Options,
    pub(crate) compare: C,
    pub(crate) destroy: D,
    pub(crate) stats: RotationStats,
}

impl<T> RbTree<T>
where
    T: Ord,
{
    /// Create an empty tree ordered by `Ord` whose elements are dropped on removal.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_callbacks(OrdCompare, DropElement)
    }

    /// Creates a new `RbTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_options(
            Options::default().capacity(capacity),
            OrdCompare,
            DropElement,
        )
    }
}

impl<T> Default for RbTree<T>
where
    T: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C, D, Ix> RbTree<T, C, D, Ix>
where
    C: Compare<T>,
    D: Destroy<T>,
    Ix: IndexType,
{
    /// Create an empty tree from a comparator and a destroy callback.
    ///
    /// # Example
    /// ```rust
    /// use std::cell::RefCell;
    /// use rb_sentinel_tree::RbTree;
    ///
    /// let released = RefCell::new(Vec::new());
    /// let mut tree: RbTree<i32, _, _> = RbTree::with_callbacks(
    ///     |a: &i32, b: &i32| b.cmp(a),
    ///     |e: i32| released.borrow_mut().push(e),
    /// );
    /// tree.insert(1).unwrap();
    /// tree.insert(2).unwrap();
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
    /// drop(tree);
    /// // teardown releases children before their parent
    /// assert_eq!(released.into_inner(), vec![2, 1]);
    /// ```
    #[inline]
    #[must_use]
    pub fn with_callbacks(compare: C, destroy: D) -> Self {
        Self::with_options(Options::default(), compare, destroy)
    }

    /// Create an empty tree with explicit [`Options`].
    ///
    /// [`Options::capacity`] is a hint. If that many slots cannot be reserved
    /// the arena starts small and grows on demand.
    #[must_use]
    pub fn with_options(options: Options, compare: C, destroy: D) -> Self {
        let mut nodes = Vec::new();
        if nodes.try_reserve(options.capacity.saturating_add(2)).is_err() {
            log::debug!("could not reserve {} slots up front", options.capacity);
        }
        nodes.push(Node::placeholder());
        nodes.push(Node::placeholder());
        RbTree {
            nodes,
            free: Vec::new(),
            min: None,
            len: 0,
            id: TreeId::next(),
            options,
            compare,
            destroy,
            stats: RotationStats::default(),
        }
    }

    /// Insert an element, returning a handle to the node that holds it.
    ///
    /// Under [`DuplicatePolicy::Allow`] an element equal to stored ones is placed
    /// after all of them. Under [`DuplicatePolicy::Replace`] the stored element is
    /// handed to the destroy callback and the existing handle is returned.
    ///
    /// # Errors
    ///
    /// Fails when no node can be allocated. The tree is left untouched and the
    /// element is returned inside the error.
    ///
    /// # Example
    /// ```rust
    /// use rb_sentinel_tree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// let five = tree.insert(5).unwrap();
    /// tree.insert(3).unwrap();
    /// assert_eq!(tree.get(five), Ok(&5));
    /// assert_eq!(tree.first(), Some(&3));
    /// ```
    pub fn insert(&mut self, element: T) -> Result<Handle<Ix>, InsertError<T>> {
        let mut parent = NodeIndex::root_stub();
        let mut x = self.root();
        let mut go_left = true;

        while !self.is_sentinel(x) {
            let ord = self
                .compare
                .compare(&element, self.node_ref(x, Node::element));
            if ord == Ordering::Equal && self.options.duplicates == DuplicatePolicy::Replace {
                if let Some(old) = self.node_mut(x, Node::set_element(element)) {
                    self.destroy.destroy(old);
                }
                log::trace!("replaced element in {x:?}");
                return Ok(self.handle(x));
            }
            parent = x;
            go_left = ord == Ordering::Less;
            x = if go_left {
                self.node_ref(x, Node::left)
            } else {
                self.node_ref(x, Node::right)
            };
        }

        let z = self.alloc_node(element, parent)?;
        if go_left {
            self.node_mut(parent, Node::set_left(z));
        } else {
            self.node_mut(parent, Node::set_right(z));
        }
        self.len = self.len.wrapping_add(1);

        let new_min = match self.min {
            None => true,
            Some(m) => {
                self.compare
                    .compare(self.node_ref(z, Node::element), self.node_ref(m, Node::element))
                    == Ordering::Less
            }
        };
        if new_min {
            self.min = Some(z);
        }

        if self.parent_ref(z, Node::is_red) {
            self.insert_fixup(z);
        }
        self.paint(self.root(), Color::Black);
        log::trace!("inserted {z:?} under {parent:?}");

        Ok(self.handle(z))
    }

    /// Find a node whose element compares equal to `element`.
    ///
    /// With duplicates present this is whichever equal node the search meets
    /// first, not necessarily the one inserted first.
    pub fn find(&self, element: &T) -> Option<Handle<Ix>> {
        let mut x = self.root();
        while !self.is_sentinel(x) {
            match self
                .compare
                .compare(element, self.node_ref(x, Node::element))
            {
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
                Ordering::Equal => return Some(self.handle(x)),
            }
        }
        None
    }

    /// Return `true` if an element equal to `element` is stored.
    #[inline]
    pub fn contains(&self, element: &T) -> bool {
        self.find(element).is_some()
    }
}

impl<T, C, D, Ix> RbTree<T, C, D, Ix>
where
    D: Destroy<T>,
    Ix: IndexType,
{
    /// Remove the element behind `handle` and give it back to the caller.
    ///
    /// Every other handle stays valid.
    ///
    /// # Errors
    ///
    /// [`RbTreeError::InvalidHandle`] when the handle came from another tree or its
    /// element was already removed.
    ///
    /// # Example
    /// ```rust
    /// use rb_sentinel_tree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// let h = tree.insert(1).unwrap();
    /// tree.insert(2).unwrap();
    /// assert_eq!(tree.remove(h), Ok(1));
    /// assert!(tree.remove(h).is_err());
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn remove(&mut self, handle: Handle<Ix>) -> Result<T> {
        let z = self.resolve(handle)?;
        self.remove_inner(z).ok_or(RbTreeError::InvalidHandle)
    }

    /// Remove the element behind `handle` and pass it to the destroy callback.
    ///
    /// # Errors
    ///
    /// Same as [`remove`](Self::remove).
    pub fn delete(&mut self, handle: Handle<Ix>) -> Result<()> {
        let element = self.remove(handle)?;
        self.destroy.destroy(element);
        Ok(())
    }

    /// Borrow the element behind `handle`.
    ///
    /// # Errors
    ///
    /// [`RbTreeError::InvalidHandle`] for a foreign or stale handle.
    pub fn get(&self, handle: Handle<Ix>) -> Result<&T> {
        let x = self.resolve(handle)?;
        Ok(self.node_ref(x, Node::element))
    }

    /// Color of the node behind `handle`.
    ///
    /// # Errors
    ///
    /// [`RbTreeError::InvalidHandle`] for a foreign or stale handle.
    pub fn color(&self, handle: Handle<Ix>) -> Result<Color> {
        let x = self.resolve(handle)?;
        Ok(self.node_ref(x, Node::color))
    }

    /// The node holding the next element in ascending order, `None` after the maximum.
    ///
    /// # Errors
    ///
    /// [`RbTreeError::InvalidHandle`] for a foreign or stale handle.
    pub fn successor(&self, handle: Handle<Ix>) -> Result<Option<Handle<Ix>>> {
        let x = self.resolve(handle)?;
        Ok(self.successor_of(x).map(|s| self.handle(s)))
    }

    /// The node holding the previous element in ascending order, `None` before the minimum.
    ///
    /// # Errors
    ///
    /// [`RbTreeError::InvalidHandle`] for a foreign or stale handle.
    pub fn predecessor(&self, handle: Handle<Ix>) -> Result<Option<Handle<Ix>>> {
        let x = self.resolve(handle)?;
        Ok(self.predecessor_of(x).map(|p| self.handle(p)))
    }

    /// Handle to the smallest element, read from the cache.
    #[inline]
    pub fn minimum(&self) -> Option<Handle<Ix>> {
        self.min.map(|m| self.handle(m))
    }

    /// Handle to the largest element.
    pub fn maximum(&self) -> Option<Handle<Ix>> {
        let root = self.root();
        (!self.is_sentinel(root)).then(|| self.handle(self.tree_maximum(root)))
    }

    /// Handle to the root node.
    pub fn root_handle(&self) -> Option<Handle<Ix>> {
        let root = self.root();
        (!self.is_sentinel(root)).then(|| self.handle(root))
    }

    /// The smallest element.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.min.map(|m| self.node_ref(m, Node::element))
    }

    /// The largest element.
    pub fn last(&self) -> Option<&T> {
        let root = self.root();
        (!self.is_sentinel(root)).then(|| self.node_ref(self.tree_maximum(root), Node::element))
    }

    /// Get an iterator over the elements of the tree, in ascending order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, Ix> {
        Iter::new(&self.nodes, self.root())
    }

    /// Pass every element to the destroy callback, children before parents, and
    /// leave the tree empty. Handles given out before are invalidated.
    pub fn clear(&mut self) {
        log::debug!("clearing tree of {} elements", self.len);
        self.destroy_subtree(self.root());
        self.nodes.truncate(2);
        self.nodes[NodeIndex::<Ix>::SENTINEL_INDEX] = Node::placeholder();
        self.nodes[NodeIndex::<Ix>::ROOT_STUB_INDEX] = Node::placeholder();
        self.free.clear();
        self.min = None;
        self.len = 0;
        self.id = TreeId::next();
    }

    /// Return the number of elements in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Options the tree was built with.
    #[inline]
    pub fn options(&self) -> Options {
        self.options
    }

    /// Rotations performed by rebalancing so far.
    #[inline]
    pub fn stats(&self) -> RotationStats {
        self.stats
    }

    /// Zero the rotation counters.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats = RotationStats::default();
    }
}

impl<T, C, D, Ix> RbTree<T, C, D, Ix>
where
    D: Destroy<T>,
    Ix: IndexType,
{
    /// Take a slot from the free list or grow the arena.
    fn alloc_node(
        &mut self,
        element: T,
        parent: NodeIndex<Ix>,
    ) -> Result<NodeIndex<Ix>, InsertError<T>> {
        if let Some(x) = self.free.pop() {
            let generation = self.node_ref(x, Node::generation);
            self.nodes[x.index()] = Node::new_red(element, parent, generation);
            return Ok(x);
        }
        // check for max capacity, except if we use usize
        if self.nodes.len() >= <Ix as IndexType>::max().index() {
            return Err(InsertError::new(RbTreeError::CapacityExceeded, element));
        }
        if let Err(err) = self.nodes.try_reserve(1) {
            return Err(InsertError::new(err.into(), element));
        }
        let x = NodeIndex::new(self.nodes.len());
        self.nodes.push(Node::new_red(element, parent, 0));
        Ok(x)
    }

    /// Return a slot to the free list, handing back its element.
    fn free_node(&mut self, x: NodeIndex<Ix>) -> Option<T> {
        let node = &mut self.nodes[x.index()];
        let element = node.take_element();
        node.generation = node.generation.wrapping_add(1);
        node.left = NodeIndex::sentinel();
        node.right = NodeIndex::sentinel();
        node.parent = NodeIndex::sentinel();
        node.color = Color::Black;
        self.free.push(x);
        log::trace!("freed {x:?}");
        element
    }

    /// Map a handle to its slot, rejecting foreign and stale handles.
    pub(crate) fn resolve(&self, handle: Handle<Ix>) -> Result<NodeIndex<Ix>> {
        let x = handle.node;
        let live = handle.tree == self.id
            && !x.is_reserved()
            && self
                .nodes
                .get(x.index())
                .is_some_and(|n| n.is_occupied() && n.generation() == handle.generation);
        if live {
            Ok(x)
        } else {
            log::debug!("rejected handle {handle:?}");
            Err(RbTreeError::InvalidHandle)
        }
    }

    pub(crate) fn handle(&self, x: NodeIndex<Ix>) -> Handle<Ix> {
        Handle::new(self.id, x, self.node_ref(x, Node::generation))
    }

    /// Unlink `z` from the tree and free its slot.
    fn remove_inner(&mut self, z: NodeIndex<Ix>) -> Option<T> {
        let has_left = !self.is_sentinel(self.node_ref(z, Node::left));
        let has_right = !self.is_sentinel(self.node_ref(z, Node::right));
        if has_left && has_right {
            let s = self.tree_minimum(self.node_ref(z, Node::right));
            self.swap_with_successor(z, s);
        }

        if self.min == Some(z) {
            self.min = self.successor_of(z);
        }

        let child = if self.is_sentinel(self.node_ref(z, Node::left)) {
            self.node_ref(z, Node::right)
        } else {
            self.node_ref(z, Node::left)
        };

        if self.node_ref(z, Node::is_black) {
            if self.node_ref(child, Node::is_red) {
                self.paint(child, Color::Black);
            } else if z != self.root() {
                // `z` is a black leaf here; it stays linked while the fixup
                // runs and carries the missing black.
                self.remove_fixup(z);
            }
        }

        self.transplant(z, child);
        self.len = self.len.wrapping_sub(1);
        self.free_node(z)
    }

    /// Exchange the positions and colors of `z` and its in-order successor `s`.
    ///
    /// Afterwards `z` sits where `s` was and has no left child. Elements stay
    /// in their slots, so handles to both remain valid.
    fn swap_with_successor(&mut self, z: NodeIndex<Ix>, s: NodeIndex<Ix>) {
        let z_parent = self.node_ref(z, Node::parent);
        let z_left = self.node_ref(z, Node::left);
        let z_right = self.node_ref(z, Node::right);
        let z_color = self.node_ref(z, Node::color);
        let s_parent = self.node_ref(s, Node::parent);
        let s_right = self.node_ref(s, Node::right);
        let s_color = self.node_ref(s, Node::color);

        if self.is_left_child(z) {
            self.node_mut(z_parent, Node::set_left(s));
        } else {
            self.node_mut(z_parent, Node::set_right(s));
        }
        self.node_mut(s, Node::set_parent(z_parent));
        self.node_mut(s, Node::set_left(z_left));
        self.node_mut(z_left, Node::set_parent(s));

        if z_right == s {
            self.node_mut(s, Node::set_right(z));
            self.node_mut(z, Node::set_parent(s));
        } else {
            self.node_mut(s, Node::set_right(z_right));
            self.node_mut(z_right, Node::set_parent(s));
            self.node_mut(s_parent, Node::set_left(z));
            self.node_mut(z, Node::set_parent(s_parent));
        }

        self.node_mut(z, Node::set_left(NodeIndex::sentinel()));
        self.node_mut(z, Node::set_right(s_right));
        if !self.is_sentinel(s_right) {
            self.node_mut(s_right, Node::set_parent(z));
        }

        self.node_mut(s, Node::set_color(z_color));
        self.node_mut(z, Node::set_color(s_color));
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        log::trace!("insertion fixup from {z:?}");
        while self.parent_ref(z, Node::is_red) {
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.paint(self.node_ref(z, Node::parent), Color::Black);
                    self.paint(y, Color::Black);
                    z = self.parent_ref(z, Node::parent);
                    self.paint(z, Color::Red);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                        self.stats.insert_left += 1;
                    }
                    self.paint(self.node_ref(z, Node::parent), Color::Black);
                    self.paint(self.parent_ref(z, Node::parent), Color::Red);
                    self.right_rotate(self.parent_ref(z, Node::parent));
                    self.stats.insert_right += 1;
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.paint(self.node_ref(z, Node::parent), Color::Black);
                    self.paint(y, Color::Black);
                    z = self.parent_ref(z, Node::parent);
                    self.paint(z, Color::Red);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                        self.stats.insert_right += 1;
                    }
                    self.paint(self.node_ref(z, Node::parent), Color::Black);
                    self.paint(self.parent_ref(z, Node::parent), Color::Red);
                    self.left_rotate(self.parent_ref(z, Node::parent));
                    self.stats.insert_left += 1;
                }
            }
        }
    }

    /// Restore red-black tree properties after a remove.
    ///
    /// `x` is one black short on its side. Every branch either moves the
    /// deficit up or absorbs it and stops.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>) {
        log::trace!("removal fixup from {x:?}");
        while x != self.root() && self.node_ref(x, Node::is_black) {
            if self.is_left_child(x) {
                let mut w = self.parent_ref(x, Node::right);
                if self.node_ref(w, Node::is_red) {
                    self.paint(w, Color::Black);
                    self.paint(self.node_ref(x, Node::parent), Color::Red);
                    self.left_rotate(self.node_ref(x, Node::parent));
                    self.stats.delete_left += 1;
                    w = self.parent_ref(x, Node::right);
                }
                if self.left_ref(w, Node::is_black) && self.right_ref(w, Node::is_black) {
                    self.paint(w, Color::Red);
                    if self.parent_ref(x, Node::is_red) {
                        self.paint(self.node_ref(x, Node::parent), Color::Black);
                        break;
                    }
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.right_ref(w, Node::is_black) {
                        self.paint(self.node_ref(w, Node::left), Color::Black);
                        self.paint(w, Color::Red);
                        self.right_rotate(w);
                        self.stats.delete_right += 1;
                        w = self.parent_ref(x, Node::right);
                    }
                    self.paint(w, self.parent_ref(x, Node::color));
                    self.paint(self.node_ref(x, Node::parent), Color::Black);
                    self.paint(self.node_ref(w, Node::right), Color::Black);
                    self.left_rotate(self.node_ref(x, Node::parent));
                    self.stats.delete_left += 1;
                    break;
                }
            } else {
                let mut w = self.parent_ref(x, Node::left);
                if self.node_ref(w, Node::is_red) {
                    self.paint(w, Color::Black);
                    self.paint(self.node_ref(x, Node::parent), Color::Red);
                    self.right_rotate(self.node_ref(x, Node::parent));
                    self.stats.delete_right += 1;
                    w = self.parent_ref(x, Node::left);
                }
                if self.right_ref(w, Node::is_black) && self.left_ref(w, Node::is_black) {
                    self.paint(w, Color::Red);
                    if self.parent_ref(x, Node::is_red) {
                        self.paint(self.node_ref(x, Node::parent), Color::Black);
                        break;
                    }
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.left_ref(w, Node::is_black) {
                        self.paint(self.node_ref(w, Node::right), Color::Black);
                        self.paint(w, Color::Red);
                        self.left_rotate(w);
                        self.stats.delete_left += 1;
                        w = self.parent_ref(x, Node::left);
                    }
                    self.paint(w, self.parent_ref(x, Node::color));
                    self.paint(self.node_ref(x, Node::parent), Color::Black);
                    self.paint(self.node_ref(w, Node::left), Color::Black);
                    self.right_rotate(self.node_ref(x, Node::parent));
                    self.stats.delete_right += 1;
                    break;
                }
            }
        }
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        let y = self.node_ref(x, Node::right);
        debug_assert!(!self.is_sentinel(y), "left rotation without a right child");
        let y_left = self.node_ref(y, Node::left);
        self.node_mut(x, Node::set_right(y_left));
        if !self.is_sentinel(y_left) {
            self.node_mut(y_left, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        let y = self.node_ref(x, Node::left);
        debug_assert!(!self.is_sentinel(y), "right rotation without a left child");
        let y_right = self.node_ref(y, Node::right);
        self.node_mut(x, Node::set_left(y_right));
        if !self.is_sentinel(y_right) {
            self.node_mut(y_right, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));
    }

    /// Replace parent during a rotation. At the root the stub takes the new child.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        let p = self.node_ref(x, Node::parent);
        self.node_mut(y, Node::set_parent(p));
        if self.is_left_child(x) {
            self.node_mut(p, Node::set_left(y));
        } else {
            self.node_mut(p, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        let p = self.node_ref(u, Node::parent);
        if self.is_left_child(u) {
            self.node_mut(p, Node::set_left(v));
        } else {
            self.node_mut(p, Node::set_right(v));
        }
        if !self.is_sentinel(v) {
            self.node_mut(v, Node::set_parent(p));
        }
    }

    /// Recolor a node. The sentinel and the root stub only ever take black.
    fn paint(&mut self, x: NodeIndex<Ix>, color: Color) {
        debug_assert!(
            color == Color::Black || !x.is_reserved(),
            "attempted to paint a fixed node red"
        );
        self.node_mut(x, Node::set_color(color));
    }

    pub(crate) fn successor_of(&self, mut x: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        let right = self.node_ref(x, Node::right);
        if !self.is_sentinel(right) {
            return Some(self.tree_minimum(right));
        }
        let mut p = self.node_ref(x, Node::parent);
        while !p.is_reserved() && self.node_ref(p, Node::right) == x {
            x = p;
            p = self.node_ref(p, Node::parent);
        }
        (!p.is_reserved()).then_some(p)
    }

    pub(crate) fn predecessor_of(&self, mut x: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        let left = self.node_ref(x, Node::left);
        if !self.is_sentinel(left) {
            return Some(self.tree_maximum(left));
        }
        let mut p = self.node_ref(x, Node::parent);
        while !p.is_reserved() && self.node_ref(p, Node::left) == x {
            x = p;
            p = self.node_ref(p, Node::parent);
        }
        (!p.is_reserved()).then_some(p)
    }

    /// Find the leftmost node of the subtree rooted at `x`.
    pub(crate) fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.is_sentinel(self.node_ref(x, Node::left)) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the rightmost node of the subtree rooted at `x`.
    pub(crate) fn tree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.is_sentinel(self.node_ref(x, Node::right)) {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// Post-order walk handing every element to the destroy callback.
    fn destroy_subtree(&mut self, x: NodeIndex<Ix>) {
        if self.is_sentinel(x) {
            return;
        }
        self.destroy_subtree(self.node_ref(x, Node::left));
        self.destroy_subtree(self.node_ref(x, Node::right));
        if let Some(element) = self.nodes[x.index()].take_element() {
            self.destroy.destroy(element);
        }
    }

    /// Check if a node is a left child of its parent.
    pub(crate) fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }

    /// The real root, the sentinel when the tree is empty.
    #[inline]
    pub(crate) fn root(&self) -> NodeIndex<Ix> {
        self.node_ref(NodeIndex::root_stub(), Node::left)
    }

    #[inline]
    pub(crate) fn is_sentinel(&self, x: NodeIndex<Ix>) -> bool {
        x == NodeIndex::sentinel()
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, T, C, D, Ix> RbTree<T, C, D, Ix>
where
    D: Destroy<T>,
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }
}

impl<T, C, D, Ix> Drop for RbTree<T, C, D, Ix>
where
    D: Destroy<T>,
    Ix: IndexType,
{
    fn drop(&mut self) {
        self.destroy_subtree(self.root());
    }
}

impl<T, C, D, Ix> fmt::Debug for RbTree<T, C, D, Ix>
where
    T: fmt::Debug,
    D: Destroy<T>,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RbTree")
            .field("len", &self.len)
            .field("elements", &DebugElements(self.iter()))
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

struct DebugElements<'a, T, Ix>(Iter<'a, T, Ix>);

impl<T: fmt::Debug, Ix: IndexType> fmt::Debug for DebugElements<'_, T, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

impl<'a, T, C, D, Ix> IntoIterator for &'a RbTree<T, C, D, Ix>
where
    D: Destroy<T>,
    Ix: IndexType,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
