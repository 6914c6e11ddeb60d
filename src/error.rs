use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

/// Errors reported by [`RbTree`](crate::RbTree) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RbTreeError {
    /// The arena could not grow to hold another node.
    AllocationFailed,
    /// Every index representable by the tree's index type is in use.
    CapacityExceeded,
    /// The handle belongs to another tree, or its node has already been removed.
    InvalidHandle,
}

impl fmt::Display for RbTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RbTreeError::AllocationFailed => write!(f, "failed to allocate a tree node"),
            RbTreeError::CapacityExceeded => {
                write!(f, "reached maximum number of nodes for the index type")
            }
            RbTreeError::InvalidHandle => {
                write!(f, "handle does not refer to a live node of this tree")
            }
        }
    }
}

impl Error for RbTreeError {}

impl From<TryReserveError> for RbTreeError {
    fn from(_: TryReserveError) -> Self {
        RbTreeError::AllocationFailed
    }
}

/// A failed insertion. The rejected element is handed back untouched.
pub struct InsertError<T> {
    kind: RbTreeError,
    element: T,
}

impl<T> InsertError<T> {
    pub(crate) fn new(kind: RbTreeError, element: T) -> Self {
        InsertError { kind, element }
    }

    /// What went wrong.
    pub fn kind(&self) -> &RbTreeError {
        &self.kind
    }

    /// Recover the element that was not inserted.
    pub fn into_element(self) -> T {
        self.element
    }
}

impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insertion failed: {}", self.kind)
    }
}

impl<T> Error for InsertError<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
    }
}

impl<T> From<InsertError<T>> for RbTreeError {
    fn from(err: InsertError<T>) -> Self {
        err.kind
    }
}

/// The structural property a [`validate`](crate::RbTree::validate) call found broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Violation {
    /// An element is out of order relative to an ancestor.
    Order,
    /// A red node touches another red node, or a fixed node is not black.
    Color,
    /// Two paths to the sentinel cross a different number of black nodes.
    BlackHeight,
    /// A child does not point back at its parent, or a fixed node was relinked.
    Link,
    /// The cached minimum is not the leftmost node.
    MinCache,
    /// The number of reachable nodes differs from the recorded length.
    Length,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Violation::Order => "order property",
            Violation::Color => "red property",
            Violation::BlackHeight => "black-height property",
            Violation::Link => "parent links",
            Violation::MinCache => "minimum cache",
            Violation::Length => "length bookkeeping",
        };
        write!(f, "red-black tree violates its {what}")
    }
}

impl Error for Violation {}

/// Result alias used throughout the crate.
pub type Result<T, E = RbTreeError> = std::result::Result<T, E>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn insert_error_gives_element_back() {
        let err = InsertError::new(RbTreeError::CapacityExceeded, String::from("seven"));
        assert_eq!(err.kind(), &RbTreeError::CapacityExceeded);
        assert_eq!(
            err.to_string(),
            "insertion failed: reached maximum number of nodes for the index type"
        );
        assert_eq!(err.into_element(), "seven");
    }

    #[test]
    fn insert_error_converts_for_question_mark() {
        fn bubble() -> Result<()> {
            Err(InsertError::new(RbTreeError::AllocationFailed, 3_u8))?;
            Ok(())
        }
        assert_eq!(bubble(), Err(RbTreeError::AllocationFailed));
    }
}
