use alloc::collections::TryReserveError;

/// Errors surfaced by the checked and fallible operations of the collections.
///
/// Absent keys are *not* errors for lookups such as [`get`] or [`find`]; those
/// return `None` or an end cursor. A `TreeError` means the caller asked for
/// something that must exist, or the tree could not grow.
///
/// [`get`]: crate::RBTreeMap::get
/// [`find`]: crate::RBTreeMap::find
///
/// # Examples
///
/// ```
/// use rbtree_collections::{RBTreeMap, TreeError};
///
/// let map = RBTreeMap::from([(1, "a")]);
/// assert_eq!(map.at(&1), Ok(&"a"));
/// assert_eq!(map.at(&2), Err(TreeError::KeyNotFound));
/// assert_eq!(map.cursor_end().get(), Err(TreeError::EndOfTree));
/// ```
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// A bounds-checked accessor was given a key that is not in the map.
    #[error("key not found")]
    KeyNotFound,
    /// A cursor positioned at the end was dereferenced.
    #[error("cursor is positioned at the end of the tree")]
    EndOfTree,
    /// The tree already addresses as many nodes as a handle can name.
    #[error("tree is at maximum capacity ({max} nodes)")]
    CapacityExceeded {
        /// The largest number of nodes a single tree can hold.
        max: usize,
    },
    /// The allocator could not provide storage for new nodes.
    #[error("node allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}
