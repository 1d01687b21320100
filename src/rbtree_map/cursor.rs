use core::fmt;
use core::ptr;

use crate::TreeError;
use crate::raw::{Handle, RawRBTree};

/// A cursor over a `RBTreeMap`.
///
/// A cursor is a position in the map's key order: either on an entry, or at
/// the end, one past the last entry. Unlike an iterator it can move in both
/// directions and stay put, and stepping back from the end lands on the
/// largest key.
///
/// Cursors are created by [`RBTreeMap::cursor_front`], [`RBTreeMap::cursor_end`],
/// [`RBTreeMap::find`], [`RBTreeMap::lower_bound`] and [`RBTreeMap::upper_bound`].
///
/// Two cursors are equal when they point into the same map at the same entry.
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeMap;
///
/// let map = RBTreeMap::from([(1, "a"), (2, "b"), (3, "c")]);
/// let mut cursor = map.cursor_end();
/// assert!(cursor.is_end());
///
/// assert!(cursor.move_prev());
/// assert_eq!(cursor.get(), Ok((&3, &"c")));
///
/// assert!(cursor.move_next());
/// assert!(cursor.is_end());
/// ```
///
/// [`RBTreeMap::cursor_front`]: crate::RBTreeMap::cursor_front
/// [`RBTreeMap::cursor_end`]: crate::RBTreeMap::cursor_end
/// [`RBTreeMap::find`]: crate::RBTreeMap::find
/// [`RBTreeMap::lower_bound`]: crate::RBTreeMap::lower_bound
/// [`RBTreeMap::upper_bound`]: crate::RBTreeMap::upper_bound
pub struct Cursor<'a, K, V> {
    tree: &'a RawRBTree<K, V>,
    current: Option<Handle>,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) const fn new(tree: &'a RawRBTree<K, V>, current: Option<Handle>) -> Self {
        Cursor { tree, current }
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next entry in key order.
    ///
    /// Moving forward from the last entry reaches the end position. At the
    /// end there is nowhere to go: the cursor stays and `false` is returned.
    pub fn move_next(&mut self) -> bool {
        match self.current {
            Some(handle) => {
                self.current = self.tree.next(handle);
                true
            }
            None => false,
        }
    }

    /// Moves to the previous entry in key order.
    ///
    /// Moving back from the end reaches the last entry. On the first entry,
    /// or in an empty map, the cursor stays and `false` is returned.
    pub fn move_prev(&mut self) -> bool {
        match self.tree.prev_position(self.current) {
            Some(handle) => {
                self.current = Some(handle);
                true
            }
            None => false,
        }
    }

    /// Returns the entry under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn get(&self) -> Result<(&'a K, &'a V), TreeError> {
        self.current.map(|handle| self.tree.entry(handle)).ok_or(TreeError::EndOfTree)
    }

    /// Returns the key under the cursor, or `None` at the end.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.current.map(|handle| self.tree.key(handle))
    }

    /// Returns the value under the cursor, or `None` at the end.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.current.map(|handle| self.tree.value(handle))
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get().ok()).finish()
    }
}

/// A cursor over a `RBTreeMap` with editing operations.
///
/// Values under the cursor can be changed in place, and the entry under the
/// cursor can be removed with [`CursorMut::remove_current`], which leaves the
/// cursor on the entry that followed it.
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeMap;
///
/// let mut map = RBTreeMap::from([(1, 10), (2, 20), (3, 30)]);
/// let mut cursor = map.find_mut(&2);
/// *cursor.value_mut().unwrap() += 1;
/// assert_eq!(cursor.remove_current(), Some((2, 21)));
/// assert_eq!(cursor.key(), Some(&3));
///
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3]);
/// ```
pub struct CursorMut<'a, K, V> {
    tree: &'a mut RawRBTree<K, V>,
    current: Option<Handle>,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(crate) fn new(tree: &'a mut RawRBTree<K, V>, current: Option<Handle>) -> Self {
        CursorMut { tree, current }
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next entry in key order. See [`Cursor::move_next`].
    pub fn move_next(&mut self) -> bool {
        match self.current {
            Some(handle) => {
                self.current = self.tree.next(handle);
                true
            }
            None => false,
        }
    }

    /// Moves to the previous entry in key order. See [`Cursor::move_prev`].
    pub fn move_prev(&mut self) -> bool {
        match self.tree.prev_position(self.current) {
            Some(handle) => {
                self.current = Some(handle);
                true
            }
            None => false,
        }
    }

    /// Returns the entry under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn get(&self) -> Result<(&K, &V), TreeError> {
        self.current.map(|handle| self.tree.entry(handle)).ok_or(TreeError::EndOfTree)
    }

    /// Returns the entry under the cursor with its value borrowed mutably.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn get_mut(&mut self) -> Result<(&K, &mut V), TreeError> {
        let handle = self.current.ok_or(TreeError::EndOfTree)?;
        Ok(self.tree.entry_mut(handle))
    }

    /// Returns the key under the cursor, or `None` at the end.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.current.map(|handle| self.tree.key(handle))
    }

    /// Returns the value under the cursor, or `None` at the end.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.current.map(|handle| self.tree.value_mut(handle))
    }

    /// Converts the cursor into a mutable reference to the entry under it,
    /// borrowed for the cursor's whole lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn into_mut(self) -> Result<(&'a K, &'a mut V), TreeError> {
        let handle = self.current.ok_or(TreeError::EndOfTree)?;
        Ok(self.tree.entry_mut(handle))
    }

    /// Returns a read-only cursor at the same position.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.tree, self.current)
    }

    /// Removes the entry under the cursor and moves to its successor, or to
    /// the end if it was the last entry.
    ///
    /// Returns `None`, and does nothing, when the cursor is at the end.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let handle = self.current?;
        let (entry, next) = self.tree.remove_at(handle);
        self.current = next;
        Some(entry)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CursorMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get().ok()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn tree_of(keys: &[i32]) -> RawRBTree<i32, i32> {
        let mut tree = RawRBTree::new();
        for &key in keys {
            tree.insert_unique(key, key * 10);
        }
        tree
    }

    #[test]
    fn end_cursor_steps_back_to_maximum() {
        let tree = tree_of(&[5, 1, 9]);
        let mut cursor = Cursor::new(&tree, None);
        assert_eq!(cursor.get(), Err(TreeError::EndOfTree));
        assert!(!cursor.move_next());
        assert!(cursor.is_end());

        assert!(cursor.move_prev());
        assert_eq!(cursor.get(), Ok((&9, &90)));
    }

    #[test]
    fn prev_from_first_stays_put() {
        let tree = tree_of(&[5, 1, 9]);
        let mut cursor = Cursor::new(&tree, tree.first());
        assert!(!cursor.move_prev());
        assert_eq!(cursor.key(), Some(&1));
    }

    #[test]
    fn empty_tree_has_only_the_end() {
        let tree = tree_of(&[]);
        let mut cursor = Cursor::new(&tree, tree.first());
        assert!(cursor.is_end());
        assert!(!cursor.move_prev());
        assert!(!cursor.move_next());
        assert_eq!(cursor.value(), None);
    }

    #[test]
    fn cursors_compare_by_position() {
        let tree = tree_of(&[1, 2]);
        let other = tree_of(&[1, 2]);
        let mut a = Cursor::new(&tree, tree.first());
        let b = Cursor::new(&tree, tree.find(&2));
        assert_ne!(a, b);
        a.move_next();
        assert_eq!(a, b);
        assert_ne!(Cursor::new(&tree, None), Cursor::new(&other, None));
    }

    #[test]
    fn remove_current_walks_forward() {
        let mut tree = tree_of(&[1, 2, 3, 4]);
        let first = tree.first();
        let mut cursor = CursorMut::new(&mut tree, first);
        let mut removed = alloc::vec::Vec::new();
        while let Some((key, _)) = cursor.remove_current() {
            removed.push(key);
        }
        assert!(cursor.is_end());
        assert_eq!(removed, [1, 2, 3, 4]);
        assert!(tree.is_empty());
    }

    #[test]
    fn cursor_mut_edits_value_in_place() {
        let mut tree = tree_of(&[1, 2]);
        let found = tree.find(&2);
        let mut cursor = CursorMut::new(&mut tree, found);
        *cursor.get_mut().unwrap().1 = 7;
        assert_eq!(cursor.as_cursor().value(), Some(&7));
        assert!(cursor.move_next());
        assert_eq!(cursor.value_mut(), None);
        assert_eq!(cursor.into_mut(), Err(TreeError::EndOfTree));
    }
}
