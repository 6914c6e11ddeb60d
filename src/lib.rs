//! `rb_sentinel_tree` is an ordered container based on a red-black tree.
//!
//! It fully implements the insertion and deletion functionality of a red-black tree,
//! ensuring that each modification operation requires at most O(logN) time complexity.
//!
//! Nodes are kept in an array and refer to each other by index. Two fixed slots remove
//! every null check from the rebalancing code: a black sentinel that stands in for all
//! missing children, and a black root stub whose left child is the real root, so a
//! rotation at the root rewrites the stub like any other parent.
//!
//! Elements are opaque to the tree. A [`Compare`] orders them and a [`Destroy`]
//! releases them; both are fixed at construction and plain closures work for either.
//! Insertion hands out a [`Handle`] which stays valid, across any amount of
//! rebalancing, until its own element is removed.
//!
//! # Example
//!
//! ```rust
//! use rb_sentinel_tree::RbTree;
//!
//! let mut tree = RbTree::new();
//! for k in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(k).unwrap();
//! }
//! assert_eq!(tree.first(), Some(&1));
//!
//! let five = tree.find(&5).unwrap();
//! let seven = tree.successor(five).unwrap().unwrap();
//! assert_eq!(tree.get(seven), Ok(&7));
//!
//! tree.delete(five).unwrap();
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 7, 8, 9]);
//! assert!(tree.validate().is_ok());
//! ```
//!

mod callback;
mod config;
mod error;
mod handle;
mod index;
mod iter;
mod node;
mod print;
mod stats;
mod traverse;
mod tree;
mod verify;


pub use callback::{Compare, Destroy, DropElement, OrdCompare};
pub use config::{DuplicatePolicy, Options};
pub use error::{InsertError, RbTreeError, Result, Violation};
pub use handle::Handle;
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use iter::Iter;
pub use node::Color;
pub use print::{ElementFmt, TreeDisplay};
pub use stats::RotationStats;
pub use traverse::Order;
pub use tree::RbTree;
