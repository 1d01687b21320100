use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};
use crate::TreeError;

/// The red-black tree engine backing every collection in this crate.
///
/// Nodes live in an [`Arena`] and link to each other by [`Handle`]. The tree
/// owns every node reachable from `root`; parent links are back-references
/// used for traversal and rebalancing only.
#[derive(Clone)]
pub(crate) struct RawRBTree<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K>>,
    /// Arena storing all values, one per node.
    values: Arena<V>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of live nodes.
    len: usize,
}

/// Where a key was found, or where it would be linked in.
pub(crate) enum SearchResult {
    /// A node with an equal key.
    Found(Handle),
    /// The key is absent; it belongs at this position.
    Vacant(InsertPosition),
}

/// An empty child slot: `side` of `parent`, or the root when `parent` is `None`.
///
/// Only valid until the tree is next mutated.
#[derive(Clone, Copy, Debug)]
pub(crate) struct InsertPosition {
    parent: Option<Handle>,
    side: Side,
}

/// A double-ended walk over a run of consecutive nodes in key order.
///
/// The walk holds no borrow; each step is given the tree it was created
/// from. `remaining` alone decides when the walk is exhausted, so the two
/// ends may pass each other without being compared.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Walk {
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl Walk {
    pub(crate) const fn len(&self) -> usize {
        self.remaining
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    pub(crate) fn next<K, V>(&mut self, tree: &RawRBTree<K, V>) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = tree.next(handle);
        Some(handle)
    }

    pub(crate) fn next_back<K, V>(&mut self, tree: &RawRBTree<K, V>) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = tree.prev(handle);
        Some(handle)
    }
}

impl<K, V> RawRBTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity().min(self.values.capacity())
    }

    /// Theoretical upper bound on the number of nodes: whichever runs out
    /// first, handles or address space.
    pub(crate) const fn max_size() -> usize {
        let slot = mem::size_of::<Option<Node<K>>>() + mem::size_of::<Option<V>>();
        let by_address_space = isize::MAX.unsigned_abs() / if slot == 0 { 1 } else { slot };
        if by_address_space < Handle::MAX {
            by_address_space
        } else {
            Handle::MAX
        }
    }

    /// Drops every node. The arena releases them in one pass, so there is no
    /// recursion however the tree is shaped.
    pub(crate) fn clear(&mut self) {
        if self.len > 0 {
            log::trace!("clearing red-black tree of {} nodes", self.len);
        }
        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.node(handle).key()
    }

    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &V {
        self.values.get(self.node(handle).value())
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        let value = self.node(handle).value();
        self.values.get_mut(value)
    }

    #[inline]
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle);
        (node.key(), self.values.get(node.value()))
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.nodes.get(handle);
        (node.key(), self.values.get_mut(node.value()))
    }

    /// Returns the key and a mutable reference to the value of a node from a
    /// raw pointer to the tree.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `RawRBTree<K, V>` that outlives `'a`.
    /// - No other mutable reference to the `values` arena may exist, and the
    ///   caller must have logical exclusive access to the value at `handle`.
    /// - The node arena must not be mutated while the returned references live.
    pub(crate) unsafe fn entry_mut_ptr<'a>(ptr: *mut Self, handle: Handle) -> (&'a K, &'a mut V) {
        // SAFETY: the node arena is only read. The value arena is reached through a raw place
        // projection and a single slot pointer, so values lent out earlier stay untouched.
        unsafe {
            let node = (*core::ptr::addr_of!((*ptr).nodes)).get(handle);
            let value = Arena::get_raw(core::ptr::addr_of_mut!((*ptr).values), node.value());
            (node.key(), &mut *value)
        }
    }

    // ─── Structural traversal ───────────────────────────────────────────────

    /// Returns the leftmost node of the subtree rooted at `handle`.
    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left() {
            handle = left;
        }
        handle
    }

    /// Returns the rightmost node of the subtree rooted at `handle`.
    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right() {
            handle = right;
        }
        handle
    }

    /// The node with the smallest key.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    /// The node with the largest key.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    /// In-order successor, or `None` when `handle` is the last node.
    pub(crate) fn next(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    /// In-order predecessor, or `None` when `handle` is the first node.
    pub(crate) fn prev(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    // Moves one position towards `side`: descend into that subtree if there
    // is one, otherwise climb while we are a `side` child.
    fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.node(handle).child(side) {
            return Some(match side {
                Side::Right => self.leftmost(child),
                Side::Left => self.rightmost(child),
            });
        }

        let mut current = handle;
        let mut parent = self.node(current).parent();
        while let Some(p) = parent {
            if self.node(p).child(side) != Some(current) {
                break;
            }
            current = p;
            parent = self.node(p).parent();
        }
        parent
    }

    /// Predecessor of a cursor position, where `None` is the end sentinel.
    ///
    /// Stepping back from the end lands on the last node; stepping back from
    /// the first node has nowhere to go and returns `None`.
    pub(crate) fn prev_position(&self, position: Option<Handle>) -> Option<Handle> {
        match position {
            None => self.last(),
            Some(handle) => self.prev(handle),
        }
    }

    /// Walk over every node.
    pub(crate) fn walk(&self) -> Walk {
        Walk {
            front: self.first(),
            back: self.last(),
            remaining: self.len,
        }
    }

    /// Walk from `from` up to, but excluding, `to`. Either may be the end
    /// position; `to` must not come before `from`.
    pub(crate) fn walk_between(&self, from: Option<Handle>, to: Option<Handle>) -> Walk {
        let mut remaining = 0;
        let mut current = from;
        while current != to {
            let Some(handle) = current else {
                break;
            };
            remaining += 1;
            current = self.next(handle);
        }
        Walk {
            front: from,
            back: self.prev_position(to),
            remaining,
        }
    }

    // ─── Rebalancing primitives ─────────────────────────────────────────────

    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.node(h).is_red())
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).set_color(color);
    }

    /// Which side of `parent` holds `child`. An absent child is on whichever
    /// side is empty.
    #[inline]
    fn side_of(&self, parent: Handle, child: Option<Handle>) -> Side {
        if self.node(parent).left() == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn expect_child(&self, parent: Handle, side: Side) -> Handle {
        self.node(parent)
            .child(side)
            .expect("`RawRBTree` - black-height violated: a doubly black node has no sibling!")
    }

    /// Points whichever link of `parent` held `old` at `new` instead; with no
    /// parent, `new` becomes the root.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.side_of(p, Some(old));
                self.node_mut(p).set_child(side, new);
            }
        }
    }

    /// Puts the subtree `new` where `old` was. `old` keeps its own links.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.node(old).parent();
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.node_mut(new).set_parent(parent);
        }
    }

    /// Rotates the subtree at `pivot` towards `dir`: the child on the other
    /// side takes `pivot`'s place and `pivot` becomes its `dir` child.
    ///
    /// `rotate(x, Side::Left)` is the classic left rotation.
    fn rotate(&mut self, pivot: Handle, dir: Side) {
        let lift = dir.opposite();
        let child = self.node(pivot).child(lift).expect("`RawRBTree::rotate()` - nothing to rotate into place!");
        let inner = self.node(child).child(dir);

        self.node_mut(pivot).set_child(lift, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(pivot));
        }

        let parent = self.node(pivot).parent();
        self.replace_child(parent, pivot, Some(child));
        self.node_mut(child).set_parent(parent);

        self.node_mut(child).set_child(dir, Some(pivot));
        self.node_mut(pivot).set_parent(Some(child));
    }

    // ─── Insertion ──────────────────────────────────────────────────────────

    /// Links a new red node into `position` and restores the red-black
    /// properties. Returns the new node's handle.
    pub(crate) fn link(&mut self, position: InsertPosition, key: K, value: V) -> Handle {
        let value = self.values.alloc(value);
        let handle = self.nodes.alloc(Node::new(key, value));
        self.node_mut(handle).set_parent(position.parent);
        match position.parent {
            None => self.root = Some(handle),
            Some(parent) => self.node_mut(parent).set_child(position.side, Some(handle)),
        }
        self.len += 1;
        self.insert_fixup(handle);
        handle
    }

    /// Like [`RawRBTree::link`], but reports allocation failure instead of
    /// aborting. The tree is untouched on error.
    pub(crate) fn try_link(&mut self, position: InsertPosition, key: K, value: V) -> Result<Handle, TreeError> {
        if let Err(err) = self.nodes.try_reserve(1).and_then(|()| self.values.try_reserve(1)) {
            log::warn!("could not grow red-black tree past {} nodes: {err}", self.len);
            return Err(err);
        }
        Ok(self.link(position, key, value))
    }

    // Walks up from a freshly linked red node until no red node has a red
    // parent.
    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.node(node).parent() {
            if !self.node(parent).is_red() {
                break;
            }
            // A red node is never the root, so the grandparent exists.
            let Some(grandparent) = self.node(parent).parent() else {
                break;
            };

            let parent_side = self.side_of(grandparent, Some(parent));
            let uncle = self.node(grandparent).child(parent_side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.node(u).is_red()) {
                // Push the red up a level and keep going from the grandparent.
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            // Inner grandchild (LR/RL): rotate it outward first.
            let top = if self.node(parent).child(parent_side.opposite()) == Some(node) {
                self.rotate(parent, parent_side);
                node
            } else {
                parent
            };

            // Outer grandchild (LL/RR).
            self.set_color(top, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, parent_side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    // ─── Removal ────────────────────────────────────────────────────────────

    /// Unlinks and frees the node at `handle`.
    ///
    /// Returns the node's entry and the handle of its in-order successor.
    /// The successor handle stays valid: when `handle` has two children the
    /// successor node itself is relinked into `handle`'s place rather than
    /// having its entry copied.
    pub(crate) fn remove_at(&mut self, handle: Handle) -> ((K, V), Option<Handle>) {
        let next = self.next(handle);
        let left = self.node(handle).left();
        let right = self.node(handle).right();

        // `hole` is the subtree that moved up into the vacated spot and
        // `hole_parent` is its parent; `hole` may be empty.
        let (hole, hole_parent, removed) = match (left, right) {
            (None, child) | (child, None) => {
                let parent = self.node(handle).parent();
                let color = self.node(handle).color();
                self.transplant(handle, child);
                (child, parent, color)
            }
            (Some(left), Some(right)) => {
                let successor = self.leftmost(right);
                let color = self.node(successor).color();
                let hole = self.node(successor).right();

                let hole_parent = if successor == right {
                    Some(successor)
                } else {
                    let parent = self.node(successor).parent();
                    self.transplant(successor, hole);
                    self.node_mut(successor).set_child(Side::Right, Some(right));
                    self.node_mut(right).set_parent(Some(successor));
                    parent
                };

                self.transplant(handle, Some(successor));
                self.node_mut(successor).set_child(Side::Left, Some(left));
                self.node_mut(left).set_parent(Some(successor));
                let inherited = self.node(handle).color();
                self.set_color(successor, inherited);

                (hole, hole_parent, color)
            }
        };

        if removed == Color::Black {
            self.erase_fixup(hole, hole_parent);
        }

        self.len -= 1;
        (self.take_entry(handle), next)
    }

    // `node` sits one black short of its sibling subtree. Walk it up,
    // recoloring and rotating, until the deficit is absorbed.
    fn erase_fixup(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while node != self.root && !self.is_red(node) {
            let Some(p) = parent else {
                break;
            };
            let side = self.side_of(p, node);
            let far = side.opposite();
            let mut sibling = self.expect_child(p, far);

            if self.node(sibling).is_red() {
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                sibling = self.expect_child(p, far);
            }

            let near_nephew = self.node(sibling).child(side);
            let far_nephew = self.node(sibling).child(far);

            if !self.is_red(near_nephew) && !self.is_red(far_nephew) {
                self.set_color(sibling, Color::Red);
                node = Some(p);
                parent = self.node(p).parent();
                continue;
            }

            if !self.is_red(far_nephew) {
                // Only the near nephew is red: turn it into the far one.
                if let Some(near) = near_nephew {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.expect_child(p, far);
            }

            let parent_color = self.node(p).color();
            self.set_color(sibling, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far) = self.node(sibling).child(far) {
                self.set_color(far, Color::Black);
            }
            self.rotate(p, side);
            node = self.root;
            parent = None;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }

    // Frees a node that is no longer linked into the tree.
    fn take_entry(&mut self, handle: Handle) -> (K, V) {
        let (key, value) = self.nodes.take(handle).into_parts();
        (key, self.values.take(value))
    }

    /// Removes the smallest entry.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.first()?;
        Some(self.remove_at(first).0)
    }

    /// Removes the largest entry.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.last()?;
        Some(self.remove_at(last).0)
    }

    /// Moves every entry out in key order and leaves the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            order.push(handle);
            current = self.next(handle);
        }

        let (keys, value_handles): (Vec<K>, Vec<Handle>) =
            self.nodes.take_in_order(&order).into_iter().map(Node::into_parts).unzip();
        let values = self.values.take_in_order(&value_handles);
        self.root = None;
        self.len = 0;
        keys.into_iter().zip(values).collect()
    }

    /// Deep-copies the tree, reporting allocation failure instead of
    /// aborting. Nothing of the partial copy survives an error.
    pub(crate) fn try_clone(&self) -> Result<Self, TreeError>
    where
        K: Clone,
        V: Clone,
    {
        log::trace!("cloning red-black tree of {} nodes", self.len);
        Ok(Self {
            nodes: self.nodes.try_clone()?,
            values: self.values.try_clone()?,
            root: self.root,
            len: self.len,
        })
    }
}

impl<K: Ord, V> RawRBTree<K, V> {
    /// Descends from the root comparing against `key`. Stops at the first
    /// equal key on the path, which for duplicate keys need not be the first
    /// one in order.
    pub(crate) fn search<Q>(&self, key: &Q) -> SearchResult
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(mut current) = self.root else {
            return SearchResult::Vacant(InsertPosition {
                parent: None,
                side: Side::Left,
            });
        };

        loop {
            let side = match key.cmp(self.node(current).key().borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return SearchResult::Found(current),
            };
            match self.node(current).child(side) {
                Some(child) => current = child,
                None => {
                    return SearchResult::Vacant(InsertPosition {
                        parent: Some(current),
                        side,
                    });
                }
            }
        }
    }

    /// Handle of a node whose key equals `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.search(key) {
            SearchResult::Found(handle) => Some(handle),
            SearchResult::Vacant(_) => None,
        }
    }

    /// Where a duplicate-permitting insert of `key` goes. Ties descend right,
    /// so a new key lands after every equal key already present.
    pub(crate) fn multi_position(&self, key: &K) -> InsertPosition {
        let mut position = InsertPosition {
            parent: None,
            side: Side::Left,
        };
        let mut current = self.root;
        while let Some(handle) = current {
            let side = if key < self.node(handle).key() {
                Side::Left
            } else {
                Side::Right
            };
            position = InsertPosition {
                parent: Some(handle),
                side,
            };
            current = self.node(handle).child(side);
        }
        position
    }

    /// Inserts `key` unless an equal key exists, in which case nothing
    /// changes and the existing node is returned with `false`.
    pub(crate) fn insert_unique(&mut self, key: K, value: V) -> (Handle, bool) {
        match self.search(&key) {
            SearchResult::Found(handle) => (handle, false),
            SearchResult::Vacant(position) => (self.link(position, key, value), true),
        }
    }

    pub(crate) fn try_insert_unique(&mut self, key: K, value: V) -> Result<(Handle, bool), TreeError> {
        match self.search(&key) {
            SearchResult::Found(handle) => Ok((handle, false)),
            SearchResult::Vacant(position) => Ok((self.try_link(position, key, value)?, true)),
        }
    }

    /// Inserts `key`, or overwrites the value of an equal key in place.
    /// Returns `true` only when a node was created.
    pub(crate) fn insert_or_assign(&mut self, key: K, value: V) -> (Handle, bool) {
        match self.search(&key) {
            SearchResult::Found(handle) => {
                *self.value_mut(handle) = value;
                (handle, false)
            }
            SearchResult::Vacant(position) => (self.link(position, key, value), true),
        }
    }

    pub(crate) fn try_insert_or_assign(&mut self, key: K, value: V) -> Result<(Handle, bool), TreeError> {
        match self.search(&key) {
            SearchResult::Found(handle) => {
                *self.value_mut(handle) = value;
                Ok((handle, false))
            }
            SearchResult::Vacant(position) => Ok((self.try_link(position, key, value)?, true)),
        }
    }

    /// Always inserts, placing `key` at the end of its run of equal keys.
    pub(crate) fn insert_multi(&mut self, key: K, value: V) -> Handle {
        let position = self.multi_position(&key);
        self.link(position, key, value)
    }

    pub(crate) fn try_insert_multi(&mut self, key: K, value: V) -> Result<Handle, TreeError> {
        let position = self.multi_position(&key);
        self.try_link(position, key, value)
    }

    /// Removes one node whose key equals `key`.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.find(key)?;
        Some(self.remove_at(handle).0)
    }

    /// Removes every node whose key equals `key` and returns how many went.
    pub(crate) fn remove_all<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut removed = 0;
        let mut current = self.lower_bound(key);
        while let Some(handle) = current {
            if self.key(handle).borrow() != key {
                break;
            }
            current = self.remove_at(handle).1;
            removed += 1;
        }
        removed
    }

    /// First node whose key is not less than `key`.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.bound(|node_key| node_key.borrow() >= key)
    }

    /// First node whose key is greater than `key`.
    pub(crate) fn upper_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.bound(|node_key| node_key.borrow() > key)
    }

    // Leftmost node satisfying `pred`, which must be monotone in key order.
    fn bound<F>(&self, pred: F) -> Option<Handle>
    where
        F: Fn(&K) -> bool,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(handle) = current {
            if pred(self.node(handle).key()) {
                candidate = Some(handle);
                current = self.node(handle).left();
            } else {
                current = self.node(handle).right();
            }
        }
        candidate
    }

    /// Number of nodes whose key equals `key`.
    pub(crate) fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.lower_bound(key);
        while let Some(handle) = current {
            if self.node(handle).key().borrow() != key {
                break;
            }
            count += 1;
            current = self.next(handle);
        }
        count
    }

    /// Moves every entry of `other` whose key is absent here, leaving the
    /// conflicting ones behind. Returns how many moved.
    pub(crate) fn merge_unique(&mut self, other: &mut Self) -> usize {
        let mut moved = 0;
        let mut current = other.first();
        while let Some(handle) = current {
            match self.search(other.node(handle).key()) {
                SearchResult::Found(_) => current = other.next(handle),
                SearchResult::Vacant(position) => {
                    let ((key, value), next) = other.remove_at(handle);
                    self.link(position, key, value);
                    moved += 1;
                    current = next;
                }
            }
        }
        log::debug!("merged {moved} entries, {} conflicting entries left behind", other.len);
        moved
    }

    /// Moves every entry of `other` in, duplicates included.
    pub(crate) fn merge_multi(&mut self, other: &mut Self) -> usize {
        let entries = other.drain_to_vec();
        let moved = entries.len();
        for (key, value) in entries {
            self.insert_multi(key, value);
        }
        log::debug!("merged {moved} entries");
        moved
    }
}
