use alloc::vec::Vec;

use super::handle::Handle;
use crate::TreeError;

/// Slot storage for tree nodes.
///
/// Freed slots are kept on a free list and handed out again by the next
/// allocation, so a handle stays valid exactly as long as its element lives.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    /// Makes room for `additional` more live elements without reallocating.
    ///
    /// Recycled slots count towards the room, so this only touches the
    /// allocator when the free list cannot cover the request. On success the
    /// free list also has room for every slot the arena will then hold, so
    /// releasing elements through [`Arena::take`] never allocates.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TreeError> {
        let fresh = additional.saturating_sub(self.free.len());
        if fresh > 0 {
            if self.slots.len().saturating_add(fresh) > Handle::MAX {
                return Err(TreeError::CapacityExceeded { max: Handle::MAX });
            }
            self.slots.try_reserve(fresh)?;
        }
        let slots_after = self.slots.len().saturating_add(fresh);
        self.free.try_reserve(slots_after.saturating_sub(self.free.len()))?;
        Ok(())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            // At most `Handle::MAX` slots ever exist.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns a raw pointer to a live element without borrowing the rest of
    /// the slots.
    ///
    /// # Safety
    /// - `ptr` must point to a valid, allocated `Arena<T>`.
    /// - No reference to the element at `handle` may be live while the
    ///   returned pointer is written through.
    #[inline]
    pub(crate) unsafe fn get_raw(ptr: *mut Self, handle: Handle) -> *mut T {
        // SAFETY: the caller guarantees `ptr` is valid. `as_mut_ptr` does not create an
        // intermediate reference to the slot buffer, so references into other slots survive.
        unsafe {
            let slots = core::ptr::addr_of_mut!((*ptr).slots);
            assert!(handle.to_index() < (*slots).len(), "`Arena::get_raw()` - `handle` is out of bounds!");
            let slot = (*slots).as_mut_ptr().add(handle.to_index());
            match &mut *slot {
                Some(element) => element,
                None => panic!("`Arena::get_raw()` - `handle` is invalid!"),
            }
        }
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    /// Moves out the elements at `handles`, in that order, and leaves the
    /// arena empty. Unlike repeated [`Arena::take`], no freed slot is
    /// recorded.
    pub(crate) fn take_in_order(&mut self, handles: &[Handle]) -> Vec<T> {
        let mut slots = core::mem::take(&mut self.slots);
        self.free.clear();
        handles
            .iter()
            .map(|h| slots[h.to_index()].take().expect("`Arena::take_in_order()` - `handle` is invalid!"))
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T: Clone> Arena<T> {
    /// Deep-copies the arena, slot for slot, so every handle means the same
    /// element in the copy.
    ///
    /// If storage cannot be obtained the partial copy is dropped before the
    /// error is returned.
    pub(crate) fn try_clone(&self) -> Result<Self, TreeError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(self.slots.len())?;
        let mut free = Vec::new();
        free.try_reserve_exact(self.free.len())?;
        slots.extend(self.slots.iter().cloned());
        free.extend(self.free.iter().copied());
        Ok(Self { slots, free })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert_eq!(arena.capacity(), 10);
    }

    #[test]
    fn freed_slot_is_recycled() {
        let mut arena: Arena<&str> = Arena::new();
        let a = arena.alloc("a");
        let _b = arena.alloc("b");
        assert_eq!(arena.take(a), "a");
        let c = arena.alloc("c");
        assert_eq!(a, c);
        assert_eq!(*arena.get(c), "c");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn try_reserve_covers_recycled_slots() {
        let mut arena: Arena<u32> = Arena::new();
        let handles: Vec<Handle> = (0..8).map(|v| arena.alloc(v)).collect();
        for h in &handles[..4] {
            arena.take(*h);
        }
        let before = arena.capacity();
        arena.try_reserve(4).unwrap();
        assert_eq!(arena.capacity(), before);
        arena.try_reserve(32).unwrap();
        assert!(arena.capacity() >= 36);
    }

    #[test]
    fn take_after_try_reserve_keeps_free_list_capacity() {
        let mut arena: Arena<u32> = Arena::new();
        let handles: Vec<Handle> = (0..100).map(|v| arena.alloc(v)).collect();
        for h in &handles[..60] {
            arena.take(*h);
        }
        arena.try_reserve(1).unwrap();
        let reserved = arena.free.capacity();
        for h in &handles[60..] {
            arena.take(*h);
        }
        assert_eq!(arena.free.len(), 100);
        assert_eq!(arena.free.capacity(), reserved);
    }

    #[test]
    fn take_in_order_empties_without_recording_slots() {
        let mut arena: Arena<&str> = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        let c = arena.alloc("c");
        assert_eq!(arena.take_in_order(&[c, a, b]), ["c", "a", "b"]);
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.free.capacity(), 0);
        assert_eq!(arena.alloc("d"), a);
    }

    #[test]
    fn try_reserve_past_handle_limit_fails() {
        let mut arena: Arena<u32> = Arena::new();
        assert_eq!(
            arena.try_reserve(Handle::MAX + 1),
            Err(TreeError::CapacityExceeded { max: Handle::MAX })
        );
        assert!(arena.try_reserve(16).is_ok());
    }

    #[test]
    fn try_clone_preserves_handles() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        arena.take(a);
        let copy = arena.try_clone().unwrap();
        assert_eq!(copy.len(), 1);
        assert_eq!(*copy.get(b), 2);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_after_take_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(1);
        arena.take(a);
        let _ = arena.get(a);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        model.push((handle, value));
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let value = arena.take(model[index].0);
                        let (_, expected) = model.swap_remove(index);
                        prop_assert_eq!(value, expected);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        GetMut(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            8 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
