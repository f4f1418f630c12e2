//! The arena contract and the element comparator.

use std::cmp::Ordering;

use crate::error::ArenaError;
use crate::handle::Handle;

/// Byte-addressed storage that hands out [`Handle`]s instead of pointers.
///
/// Everything the tree keeps lives behind this trait. Implementations must
/// never return the same live handle twice and must reject handles that are
/// no longer live with [`ArenaError::StaleHandle`].
pub trait Arena {
    /// Allocate `size` bytes and return a handle to them.
    ///
    /// Returns [`ArenaError::Exhausted`] if the request cannot be met.
    fn allocate(&mut self, size: usize) -> Result<Handle, ArenaError>;

    /// Release an allocation. The handle is invalid afterwards.
    fn free(&mut self, handle: Handle) -> Result<(), ArenaError>;

    /// Overwrite the first `bytes.len()` bytes of the allocation.
    fn write(&mut self, handle: Handle, bytes: &[u8]) -> Result<(), ArenaError>;

    /// Fill `dest` from the first `dest.len()` bytes of the allocation.
    fn read_into(&self, handle: Handle, dest: &mut [u8]) -> Result<(), ArenaError>;

    /// Read `len` bytes from the start of the allocation into a new buffer.
    fn read(&self, handle: Handle, len: usize) -> Result<Vec<u8>, ArenaError> {
        let mut buf = vec![0; len];
        self.read_into(handle, &mut buf)?;
        Ok(buf)
    }
}

/// Total order over fixed-width element payloads.
///
/// `compare(target, stored)` returns how `target` relates to `stored`.
/// Must be pure: the tree calls it once per visited node and relies on
/// the answer being stable.
pub trait Comparator {
    /// Compare two payloads of the tree's element width.
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;
}

impl<F> Comparator for F
where
    F: Fn(&[u8], &[u8]) -> Ordering,
{
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        self(a, b)
    }
}
