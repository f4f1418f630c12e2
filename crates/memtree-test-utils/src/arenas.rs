//! Arena wrappers and a mock arena.

use std::cell::Cell;
use std::collections::HashMap;

use indexmap::IndexMap;
use memtree_core::{Arena, ArenaError, Handle};

/// Records every call made to the wrapped arena.
///
/// Live allocations are tracked in insertion order, so a leak report lists
/// handles in the order they were allocated.
pub struct CountingArena<A> {
    inner: A,
    allocations: u64,
    frees: u64,
    reads: Cell<u64>,
    writes: u64,
    live: IndexMap<Handle, usize>,
    bad_frees: Vec<Handle>,
}

impl<A: Arena> CountingArena<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            allocations: 0,
            frees: 0,
            reads: Cell::new(0),
            writes: 0,
            live: IndexMap::new(),
            bad_frees: Vec::new(),
        }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Successful `allocate` calls.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Successful `free` calls.
    pub fn frees(&self) -> u64 {
        self.frees
    }

    pub fn reads(&self) -> u64 {
        self.reads.get()
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Handles allocated and not yet freed, oldest first.
    pub fn live_handles(&self) -> Vec<Handle> {
        self.live.keys().copied().collect()
    }

    /// Size of each live allocation, oldest first.
    pub fn live_sizes(&self) -> Vec<usize> {
        self.live.values().copied().collect()
    }

    /// Handles passed to `free` that were not live at the time.
    pub fn bad_frees(&self) -> &[Handle] {
        &self.bad_frees
    }

    /// Panic unless every allocation was freed exactly once.
    pub fn assert_balanced(&self) {
        assert!(
            self.bad_frees.is_empty(),
            "freed handles that were not live: {:?}",
            self.bad_frees
        );
        assert_eq!(
            self.allocations,
            self.frees,
            "leaked handles: {:?}",
            self.live_handles()
        );
        assert!(self.live.is_empty());
    }
}

impl<A: Arena> Arena for CountingArena<A> {
    fn allocate(&mut self, size: usize) -> Result<Handle, ArenaError> {
        let handle = self.inner.allocate(size)?;
        self.allocations += 1;
        self.live.insert(handle, size);
        Ok(handle)
    }

    fn free(&mut self, handle: Handle) -> Result<(), ArenaError> {
        if !self.live.contains_key(&handle) {
            self.bad_frees.push(handle);
        }
        self.inner.free(handle)?;
        self.live.shift_remove(&handle);
        self.frees += 1;
        Ok(())
    }

    fn write(&mut self, handle: Handle, bytes: &[u8]) -> Result<(), ArenaError> {
        self.writes += 1;
        self.inner.write(handle, bytes)
    }

    fn read_into(&self, handle: Handle, dest: &mut [u8]) -> Result<(), ArenaError> {
        self.reads.set(self.reads.get() + 1);
        self.inner.read_into(handle, dest)
    }
}

/// Refuses allocations once `budget` of them have succeeded.
///
/// Frees can be limited the same way with [`RefusingArena::set_free_budget`].
/// A refused free reports the handle as stale and leaves it allocated.
pub struct RefusingArena<A> {
    inner: A,
    budget: usize,
    free_budget: Option<usize>,
}

impl<A: Arena> RefusingArena<A> {
    pub fn new(inner: A, budget: usize) -> Self {
        Self {
            inner,
            budget,
            free_budget: None,
        }
    }

    /// Allocations still allowed.
    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn set_budget(&mut self, budget: usize) {
        self.budget = budget;
    }

    /// Frees still allowed, or `None` for no limit.
    pub fn set_free_budget(&mut self, budget: Option<usize>) {
        self.free_budget = budget;
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: Arena> Arena for RefusingArena<A> {
    fn allocate(&mut self, size: usize) -> Result<Handle, ArenaError> {
        if self.budget == 0 {
            return Err(ArenaError::Exhausted {
                requested: size,
                available: 0,
            });
        }
        let handle = self.inner.allocate(size)?;
        self.budget -= 1;
        Ok(handle)
    }

    fn free(&mut self, handle: Handle) -> Result<(), ArenaError> {
        if self.free_budget == Some(0) {
            return Err(ArenaError::StaleHandle { handle });
        }
        self.inner.free(handle)?;
        if let Some(left) = &mut self.free_budget {
            *left -= 1;
        }
        Ok(())
    }

    fn write(&mut self, handle: Handle, bytes: &[u8]) -> Result<(), ArenaError> {
        self.inner.write(handle, bytes)
    }

    fn read_into(&self, handle: Handle, dest: &mut [u8]) -> Result<(), ArenaError> {
        self.inner.read_into(handle, dest)
    }
}

/// Unbounded map-backed arena. Every allocation gets a fresh index, so a
/// freed handle can never come back to life.
#[derive(Default)]
pub struct MockArena {
    blocks: HashMap<Handle, Vec<u8>>,
    next_index: u32,
}

impl MockArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live allocations.
    pub fn live_count(&self) -> usize {
        self.blocks.len()
    }

    fn block(&self, handle: Handle) -> Result<&Vec<u8>, ArenaError> {
        self.blocks
            .get(&handle)
            .ok_or(ArenaError::StaleHandle { handle })
    }
}

impl Arena for MockArena {
    fn allocate(&mut self, size: usize) -> Result<Handle, ArenaError> {
        let handle = Handle::new(self.next_index, 0);
        self.next_index += 1;
        self.blocks.insert(handle, vec![0; size]);
        Ok(handle)
    }

    fn free(&mut self, handle: Handle) -> Result<(), ArenaError> {
        self.blocks
            .remove(&handle)
            .map(drop)
            .ok_or(ArenaError::StaleHandle { handle })
    }

    fn write(&mut self, handle: Handle, bytes: &[u8]) -> Result<(), ArenaError> {
        let block = self
            .blocks
            .get_mut(&handle)
            .ok_or(ArenaError::StaleHandle { handle })?;
        let size = block.len();
        block
            .get_mut(..bytes.len())
            .ok_or(ArenaError::OutOfBounds {
                handle,
                requested: bytes.len(),
                size,
            })?
            .copy_from_slice(bytes);
        Ok(())
    }

    fn read_into(&self, handle: Handle, dest: &mut [u8]) -> Result<(), ArenaError> {
        let block = self.block(handle)?;
        let src = block.get(..dest.len()).ok_or(ArenaError::OutOfBounds {
            handle,
            requested: dest.len(),
            size: block.len(),
        })?;
        dest.copy_from_slice(src);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_tracks_live_handles() {
        let mut a = CountingArena::new(MockArena::new());
        let h1 = a.allocate(4).unwrap();
        let h2 = a.allocate(8).unwrap();
        a.free(h1).unwrap();
        assert_eq!(a.live_handles(), vec![h2]);
        assert_eq!(a.live_sizes(), vec![8]);
        let _ = a.read(h2, 8).unwrap();
        assert_eq!(a.reads(), 1);
        a.free(h2).unwrap();
        a.assert_balanced();
    }

    #[test]
    fn counting_records_bad_free() {
        let mut a = CountingArena::new(MockArena::new());
        let h = a.allocate(4).unwrap();
        a.free(h).unwrap();
        assert!(a.free(h).is_err());
        assert_eq!(a.bad_frees(), &[h]);
        assert_eq!(a.frees(), 1);
    }

    #[test]
    fn refusing_spends_budget() {
        let mut a = RefusingArena::new(MockArena::new(), 1);
        assert!(a.allocate(4).is_ok());
        assert_eq!(a.budget(), 0);
        assert!(matches!(
            a.allocate(4),
            Err(ArenaError::Exhausted { requested: 4, .. })
        ));
        a.set_budget(1);
        assert!(a.allocate(4).is_ok());
    }

    #[test]
    fn refused_free_keeps_handle_live() {
        let mut a = RefusingArena::new(CountingArena::new(MockArena::new()), usize::MAX);
        let h1 = a.allocate(4).unwrap();
        let h2 = a.allocate(4).unwrap();
        a.set_free_budget(Some(1));
        a.free(h1).unwrap();
        assert_eq!(a.free(h2), Err(ArenaError::StaleHandle { handle: h2 }));
        assert_eq!(a.inner().live_handles(), vec![h2]);
        a.set_free_budget(None);
        a.free(h2).unwrap();
        a.inner().assert_balanced();
    }

    #[test]
    fn mock_bounds_checked() {
        let mut a = MockArena::new();
        let h = a.allocate(2).unwrap();
        assert!(a.write(h, &[1, 2, 3]).is_err());
        a.write(h, &[1, 2]).unwrap();
        assert_eq!(a.read(h, 2).unwrap(), vec![1, 2]);
        assert_eq!(a.live_count(), 1);
    }
}
