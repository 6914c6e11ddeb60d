use crate::index::{IndexType, NodeIndex};

/// Node of the red-black tree
#[derive(Debug)]
pub struct Node<T, Ix> {
    /// Left child, the sentinel when absent
    pub left: NodeIndex<Ix>,
    /// Right child, the sentinel when absent
    pub right: NodeIndex<Ix>,
    /// Parent, the root stub for the root node
    pub parent: NodeIndex<Ix>,
    /// Color of the node
    pub color: Color,

    /// Element stored in the node, `None` for the sentinel, the root stub and free slots
    pub element: Option<T>,
    /// Bumped every time the slot is freed so that stale handles can be told apart
    pub generation: u64,
}

impl<T, Ix> Node<T, Ix>
where
    Ix: IndexType,
{
    /// A black, element-less node linked only to the sentinel.
    pub fn placeholder() -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent: NodeIndex::sentinel(),
            color: Color::Black,
            element: None,
            generation: 0,
        }
    }

    /// A fresh red node under `parent`.
    pub fn new_red(element: T, parent: NodeIndex<Ix>, generation: u64) -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent,
            color: Color::Red,
            element: Some(element),
            generation,
        }
    }
}

// Convenient getter/setter methods
impl<T, Ix> Node<T, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the slot holds an element, i.e. it is a live tree node.
    pub fn is_occupied(&self) -> bool {
        self.element.is_some()
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    /// # Panics
    ///
    /// Panics when called on the sentinel, the root stub or a free slot.
    pub fn element(&self) -> &T {
        self.element
            .as_ref()
            .unwrap_or_else(|| unreachable!("element-less node reached"))
    }

    pub fn take_element(&mut self) -> Option<T> {
        self.element.take()
    }

    pub fn set_element(element: T) -> impl FnOnce(&mut Node<T, Ix>) -> Option<T> {
        move |node: &mut Node<T, Ix>| node.element.replace(element)
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            node.color = color;
        }
    }

    pub fn set_left(left: NodeIndex<Ix>) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            node.left = left;
        }
    }

    pub fn set_right(right: NodeIndex<Ix>) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            node.right = right;
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            node.parent = parent;
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}

impl Color {
    /// Single-letter tag used when rendering the tree.
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Color::Red => "r",
            Color::Black => "b",
        }
    }
}
