//! An ordered collection that keeps every inserted element, duplicates
//! included.
//!
//! Equal elements form a contiguous run in iteration order. A new element is
//! placed after every element it compares equal to, so each run lists its
//! elements in the order they were inserted.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;

use crate::TreeError;
use crate::raw::{Handle, RawRBTree};
use crate::rbtree_map;

pub use crate::rbtree_set::{Cursor, CursorMut, IntoIter, Iter};

/// An ordered multiset based on a red-black tree.
///
/// Unlike [`RBTreeSet`], inserting an element never fails because an equal
/// one is present. [`count`], [`equal_range`] and [`remove_all`] work on the
/// whole run of equal elements.
///
/// [`RBTreeSet`]: crate::RBTreeSet
/// [`count`]: RBTreeMultiSet::count
/// [`equal_range`]: RBTreeMultiSet::equal_range
/// [`remove_all`]: RBTreeMultiSet::remove_all
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeMultiSet;
///
/// let mut bag = RBTreeMultiSet::from([10, 20, 20, 30]);
/// bag.insert(20);
///
/// assert_eq!(bag.len(), 5);
/// assert_eq!(bag.count(&20), 3);
/// assert_eq!(bag.lower_bound(&20).get(), Ok(&20));
/// assert_eq!(bag.upper_bound(&20).get(), Ok(&30));
/// assert_eq!(bag.equal_range(&20).count(), 3);
///
/// assert_eq!(bag.remove_all(&20), 3);
/// assert_eq!(bag.iter().copied().collect::<Vec<_>>(), [10, 30]);
/// ```
pub struct RBTreeMultiSet<T> {
    raw: RawRBTree<T, ()>,
}

impl<T> RBTreeMultiSet<T> {
    /// Makes a new, empty `RBTreeMultiSet`.
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> RBTreeMultiSet<T> {
        RBTreeMultiSet { raw: RawRBTree::new() }
    }

    /// Creates an empty multiset with room for at least `capacity` elements
    /// before node storage has to grow.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeMultiSet {
            raw: RawRBTree::with_capacity(capacity),
        }
    }

    /// Returns how many elements the multiset can hold without growing its
    /// node storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the largest number of elements a multiset of this type can
    /// ever hold.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn max_size(&self) -> usize {
        RawRBTree::<T, ()>::max_size()
    }

    /// Clears the multiset, removing all elements.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the multiset contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Swaps the contents of two multisets.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns the minimum element. With duplicates, this is the earliest
    /// inserted of the equal minimums.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|handle| self.raw.key(handle))
    }

    /// Returns the maximum element. With duplicates, this is the latest
    /// inserted of the equal maximums.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|handle| self.raw.key(handle))
    }

    /// Removes and returns the first element.
    pub fn pop_first(&mut self) -> Option<T> {
        self.raw.pop_first().map(|(key, ())| key)
    }

    /// Removes and returns the last element.
    pub fn pop_last(&mut self) -> Option<T> {
        self.raw.pop_last().map(|(key, ())| key)
    }

    /// Gets an iterator that visits every element in ascending order.
    /// Equal elements come out in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw, self.raw.walk())
    }

    /// Returns a cursor on the first element, or at the end if the multiset
    /// is empty.
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        self.cursor_at(self.raw.first())
    }

    /// Returns a cursor at the end position, one past the last element.
    #[must_use]
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        self.cursor_at(None)
    }

    /// Returns an editing cursor on the first element, or at the end if the
    /// multiset is empty.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let first = self.raw.first();
        self.cursor_mut_at(first)
    }

    /// Returns an editing cursor at the end position.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        self.cursor_mut_at(None)
    }

    /// Makes a deep copy of the multiset, reporting allocation failure
    /// instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Alloc`] if node storage for the copy cannot be
    /// allocated.
    pub fn try_clone(&self) -> Result<Self, TreeError>
    where
        T: Clone,
    {
        Ok(RBTreeMultiSet {
            raw: self.raw.try_clone()?,
        })
    }

    fn cursor_at(&self, position: Option<Handle>) -> Cursor<'_, T> {
        Cursor::new(rbtree_map::Cursor::new(&self.raw, position))
    }

    fn cursor_mut_at(&mut self, position: Option<Handle>) -> CursorMut<'_, T> {
        CursorMut::new(rbtree_map::CursorMut::new(&mut self.raw, position))
    }
}

impl<T: Ord> RBTreeMultiSet<T> {
    /// Adds a value, even if equal values are already present, and returns a
    /// cursor on it. The new value goes after every equal value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMultiSet;
    ///
    /// let mut bag = RBTreeMultiSet::new();
    /// bag.insert(1);
    /// let mut cursor = bag.insert(1);
    /// assert!(cursor.move_prev());
    /// assert_eq!(cursor.get(), Ok(&1));
    /// assert!(!cursor.move_prev());
    /// ```
    pub fn insert(&mut self, value: T) -> CursorMut<'_, T> {
        let handle = self.raw.insert_multi(value, ());
        self.cursor_mut_at(Some(handle))
    }

    /// Like [`RBTreeMultiSet::insert`], but reports allocation failure instead
    /// of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Alloc`] or [`TreeError::CapacityExceeded`] if a
    /// new node could not be stored. The multiset is unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<CursorMut<'_, T>, TreeError> {
        let handle = self.raw.try_insert_multi(value, ())?;
        Ok(self.cursor_mut_at(Some(handle)))
    }

    /// Inserts every value from `iter`.
    pub fn insert_many<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.raw.insert_multi(value, ());
        }
    }

    /// Returns how many elements equal `value`.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count(value)
    }

    /// Returns `true` if at least one element equals `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(value).is_some()
    }

    /// Returns a cursor on some element equal to `value`, or at the end if
    /// there is none.
    ///
    /// With duplicates the element found is not necessarily the first of its
    /// run; use [`RBTreeMultiSet::lower_bound`] for that.
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.cursor_at(self.raw.find(value))
    }

    /// Editing counterpart of [`RBTreeMultiSet::find`].
    pub fn find_mut<Q>(&mut self, value: &Q) -> CursorMut<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let found = self.raw.find(value);
        self.cursor_mut_at(found)
    }

    /// Returns a cursor on the first element not less than `value`.
    pub fn lower_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.cursor_at(self.raw.lower_bound(value))
    }

    /// Returns a cursor on the first element greater than `value`.
    pub fn upper_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.cursor_at(self.raw.upper_bound(value))
    }

    /// Editing counterpart of [`RBTreeMultiSet::lower_bound`].
    pub fn lower_bound_mut<Q>(&mut self, value: &Q) -> CursorMut<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let bound = self.raw.lower_bound(value);
        self.cursor_mut_at(bound)
    }

    /// Editing counterpart of [`RBTreeMultiSet::upper_bound`].
    pub fn upper_bound_mut<Q>(&mut self, value: &Q) -> CursorMut<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let bound = self.raw.upper_bound(value);
        self.cursor_mut_at(bound)
    }

    /// Returns a double-ended iterator over the run of elements equal to
    /// `value`, from [`lower_bound`] up to [`upper_bound`].
    ///
    /// [`lower_bound`]: RBTreeMultiSet::lower_bound
    /// [`upper_bound`]: RBTreeMultiSet::upper_bound
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMultiSet;
    ///
    /// let bag = RBTreeMultiSet::from([1, 2, 1]);
    /// let mut run = bag.equal_range(&1);
    /// assert_eq!(run.len(), 2);
    /// assert_eq!(run.next_back(), Some(&1));
    /// assert!(bag.equal_range(&3).next().is_none());
    /// ```
    pub fn equal_range<Q>(&self, value: &Q) -> Iter<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let walk = self.raw.walk_between(self.raw.lower_bound(value), self.raw.upper_bound(value));
        Iter::new(&self.raw, walk)
    }

    /// Removes the first element of the run equal to `value` and returns it.
    pub fn remove_one<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.lower_bound(value)?;
        let first: &Q = self.raw.key(handle).borrow();
        if first != value {
            return None;
        }
        Some(self.raw.remove_at(handle).0.0)
    }

    /// Removes every element equal to `value` and returns how many there were.
    pub fn remove_all<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_all(value)
    }

    /// Moves every element of `other` into `self`, leaving `other` empty.
    ///
    /// Elements from `other` go after the equal elements already in `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMultiSet;
    ///
    /// let mut a = RBTreeMultiSet::from([1, 2]);
    /// let mut b = RBTreeMultiSet::from([2, 3]);
    /// a.merge(&mut b);
    /// assert!(b.is_empty());
    /// assert_eq!(a.iter().copied().collect::<Vec<_>>(), [1, 2, 2, 3]);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.raw.merge_multi(&mut other.raw);
    }

    /// Builds a multiset from an iterator, reporting allocation failure
    /// instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Alloc`] or [`TreeError::CapacityExceeded`] if a
    /// node could not be stored.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut bag = RBTreeMultiSet::new();
        for value in iter {
            bag.raw.try_insert_multi(value, ())?;
        }
        Ok(bag)
    }
}

impl<T: Hash> Hash for RBTreeMultiSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elem in self {
            elem.hash(state);
        }
    }
}

impl<T: PartialEq> PartialEq for RBTreeMultiSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RBTreeMultiSet<T> {}

impl<T: PartialOrd> PartialOrd for RBTreeMultiSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for RBTreeMultiSet<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Clone> Clone for RBTreeMultiSet<T> {
    fn clone(&self) -> Self {
        log::trace!("cloning multiset of {} elements", self.len());
        RBTreeMultiSet { raw: self.raw.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for RBTreeMultiSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for RBTreeMultiSet<T> {
    fn default() -> Self {
        RBTreeMultiSet::new()
    }
}

impl<T: Ord> FromIterator<T> for RBTreeMultiSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut bag = RBTreeMultiSet::new();
        bag.insert_many(iter);
        bag
    }
}

impl<T: Ord> Extend<T> for RBTreeMultiSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_many(iter);
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for RBTreeMultiSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.insert_many(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RBTreeMultiSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for RBTreeMultiSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.raw)
    }
}

impl<'a, T> IntoIterator for &'a RBTreeMultiSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Debug)]
    struct Tagged(i32, usize);

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl Eq for Tagged {}

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> Ordering {
            self.0.cmp(&other.0)
        }
    }

    #[test]
    fn equal_run_keeps_insertion_order() {
        let mut bag = RBTreeMultiSet::new();
        for (tag, key) in [3, 1, 3, 2, 3, 1].into_iter().enumerate() {
            bag.insert(Tagged(key, tag));
        }
        bag.raw.validate_invariants(true);

        let run: Vec<usize> = bag.equal_range(&Tagged(3, 0)).map(|t| t.1).collect();
        assert_eq!(run, [0, 2, 4]);
        let back: Vec<usize> = bag.equal_range(&Tagged(1, 0)).rev().map(|t| t.1).collect();
        assert_eq!(back, [5, 1]);
    }

    #[test]
    fn remove_one_takes_the_oldest() {
        let mut bag = RBTreeMultiSet::new();
        for (tag, key) in [7, 7, 7].into_iter().enumerate() {
            bag.insert(Tagged(key, tag));
        }
        assert_eq!(bag.remove_one(&Tagged(7, 0)).map(|t| t.1), Some(0));
        assert_eq!(bag.count(&Tagged(7, 0)), 2);
        assert!(bag.remove_one(&Tagged(8, 0)).is_none());
        bag.raw.validate_invariants(true);
    }

    #[test]
    fn merge_appends_after_existing_duplicates() {
        let mut a = RBTreeMultiSet::from([Tagged(1, 0), Tagged(2, 0)]);
        let mut b = RBTreeMultiSet::from([Tagged(2, 1), Tagged(2, 2)]);
        a.merge(&mut b);
        assert!(b.is_empty());
        a.raw.validate_invariants(true);
        let tags: Vec<usize> = a.equal_range(&Tagged(2, 0)).map(|t| t.1).collect();
        assert_eq!(tags, [0, 1, 2]);
    }
}
