use core::fmt;

use crate::TreeError;
use crate::rbtree_map;

/// A cursor over a `RBTreeSet` or `RBTreeMultiSet`.
///
/// A cursor sits on an element or at the end, one past the last element,
/// and can move both ways. Two cursors are equal when they point into the
/// same collection at the same element.
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeSet;
///
/// let set = RBTreeSet::from([1, 2, 3]);
/// let mut cursor = set.find(&2);
/// assert_eq!(cursor.get(), Ok(&2));
///
/// cursor.move_next();
/// cursor.move_next();
/// assert!(cursor.is_end());
///
/// cursor.move_prev();
/// assert_eq!(cursor.key(), Some(&3));
/// ```
pub struct Cursor<'a, T> {
    inner: rbtree_map::Cursor<'a, T, ()>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) const fn new(inner: rbtree_map::Cursor<'a, T, ()>) -> Self {
        Cursor { inner }
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.inner.is_end()
    }

    /// Moves to the next element. Returns `false`, without moving, at the end.
    pub fn move_next(&mut self) -> bool {
        self.inner.move_next()
    }

    /// Moves to the previous element. From the end this is the last element.
    /// Returns `false`, without moving, on the first element or in an empty
    /// collection.
    pub fn move_prev(&mut self) -> bool {
        self.inner.move_prev()
    }

    /// Returns the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn get(&self) -> Result<&'a T, TreeError> {
        self.inner.get().map(|(key, ())| key)
    }

    /// Returns the element under the cursor, or `None` at the end.
    #[must_use]
    pub fn key(&self) -> Option<&'a T> {
        self.inner.key()
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key()).finish()
    }
}

/// A cursor over a `RBTreeSet` or `RBTreeMultiSet` that can remove
/// elements.
///
/// Elements are never changed in place, since that could break the order.
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeSet;
///
/// let mut set: RBTreeSet<i32> = (1..=6).collect();
/// let mut cursor = set.cursor_front_mut();
/// while let Ok(&value) = cursor.get() {
///     if value % 2 == 0 {
///         cursor.remove_current();
///     } else {
///         cursor.move_next();
///     }
/// }
/// assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 3, 5]);
/// ```
pub struct CursorMut<'a, T> {
    inner: rbtree_map::CursorMut<'a, T, ()>,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) const fn new(inner: rbtree_map::CursorMut<'a, T, ()>) -> Self {
        CursorMut { inner }
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.inner.is_end()
    }

    /// Moves to the next element. See [`Cursor::move_next`].
    pub fn move_next(&mut self) -> bool {
        self.inner.move_next()
    }

    /// Moves to the previous element. See [`Cursor::move_prev`].
    pub fn move_prev(&mut self) -> bool {
        self.inner.move_prev()
    }

    /// Returns the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn get(&self) -> Result<&T, TreeError> {
        self.inner.get().map(|(key, ())| key)
    }

    /// Returns the element under the cursor, or `None` at the end.
    #[must_use]
    pub fn key(&self) -> Option<&T> {
        self.inner.key()
    }

    /// Returns a read-only cursor at the same position.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.inner.as_cursor())
    }

    /// Removes the element under the cursor and moves to its successor, or
    /// to the end if it was the last element.
    ///
    /// Returns `None`, and does nothing, when the cursor is at the end.
    pub fn remove_current(&mut self) -> Option<T> {
        self.inner.remove_current().map(|(key, ())| key)
    }
}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.key()).finish()
    }
}
