/// How insertion treats an element that compares equal to one already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep both. The newcomer descends into the right subtree of every equal
    /// node, so equal elements are visited in insertion order. Lookup returns
    /// whichever equal element the search meets first.
    #[default]
    Allow,
    /// Destroy the stored element and put the newcomer in its slot. The tree
    /// shape does not change and the existing handle is returned.
    Replace,
}

/// Construction options for [`RbTree`](crate::RbTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Number of element slots to reserve up front.
    pub capacity: usize,
    /// Treatment of equal elements.
    pub duplicates: DuplicatePolicy,
}

impl Options {
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}
