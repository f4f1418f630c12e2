//! The contiguous byte region behind a [`MemSys`](crate::MemSys).
//!
//! A [`Region`] is a fixed-size `Vec<u8>` with a bump cursor. Released
//! ranges are kept in a retired list and handed out again before the cursor
//! advances: exact-size matches first, then the first larger range, which is
//! split. Node records all share one size and payloads share the tree's
//! width, so exact matches cover the common case.
//!
//! Retired ranges are coalesced on release: no two of them touch, and none
//! ends at the cursor. Freeing everything, in any order, returns the region
//! to a single untouched tail.

/// A byte range that has been released and is available for reuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RetiredRange {
    offset: usize,
    len: usize,
}

impl RetiredRange {
    fn end(&self) -> usize {
        self.offset + self.len
    }

    fn touches(&self, other: &RetiredRange) -> bool {
        self.end() == other.offset || other.end() == self.offset
    }
}

/// Fixed-capacity byte storage with bump allocation and range reuse.
pub struct Region {
    /// Backing storage. Allocated to full capacity at creation.
    data: Vec<u8>,
    /// Bump pointer: next never-used byte.
    cursor: usize,
    /// Released ranges below `cursor`.
    retired: Vec<RetiredRange>,
}

impl Region {
    /// Create a zeroed region of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            cursor: 0,
            retired: Vec::new(),
        }
    }

    /// Reserve `len` bytes, returning their offset, or `None` if no range fits.
    ///
    /// The returned range is zeroed.
    pub fn alloc(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return Some(self.cursor);
        }
        let offset = if let Some(pos) = self.retired.iter().position(|r| r.len == len) {
            self.retired.swap_remove(pos).offset
        } else if let Some(offset) = self.bump(len) {
            offset
        } else {
            let pos = self.retired.iter().position(|r| r.len > len)?;
            let range = &mut self.retired[pos];
            let offset = range.offset;
            range.offset += len;
            range.len -= len;
            offset
        };
        self.data[offset..offset + len].fill(0);
        Some(offset)
    }

    fn bump(&mut self, len: usize) -> Option<usize> {
        let end = self.cursor.checked_add(len)?;
        if end > self.data.len() {
            return None;
        }
        let offset = self.cursor;
        self.cursor = end;
        Some(offset)
    }

    /// Return a range to the region.
    ///
    /// The range is merged with any retired neighbours. If the merged range
    /// ends at the cursor, the cursor rolls back over it instead.
    pub fn release(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        let mut range = RetiredRange { offset, len };
        while let Some(pos) = self.retired.iter().position(|r| r.touches(&range)) {
            let neighbour = self.retired.swap_remove(pos);
            range.offset = range.offset.min(neighbour.offset);
            range.len += neighbour.len;
        }
        if range.end() == self.cursor {
            self.cursor = range.offset;
        } else {
            self.retired.push(range);
        }
    }

    /// Shared view of `len` bytes at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the region.
    pub fn slice(&self, offset: usize, len: usize) -> &[u8] {
        &self.data[offset..offset + len]
    }

    /// Mutable view of `len` bytes at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the region.
    pub fn slice_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.data[offset..offset + len]
    }

    /// Total size in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes not currently reserved: untouched tail plus retired ranges.
    ///
    /// A request of this size may still fail if the bytes are fragmented.
    pub fn available(&self) -> usize {
        let retired: usize = self.retired.iter().map(|r| r.len).sum();
        self.data.len() - self.cursor + retired
    }

    /// Number of released ranges waiting for reuse.
    pub fn retired_count(&self) -> usize {
        self.retired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_until_full() {
        let mut r = Region::new(16);
        assert_eq!(r.alloc(10), Some(0));
        assert_eq!(r.alloc(6), Some(10));
        assert_eq!(r.alloc(1), None);
        assert_eq!(r.available(), 0);
    }

    #[test]
    fn exact_size_range_reused() {
        let mut r = Region::new(64);
        let a = r.alloc(8).unwrap();
        let _b = r.alloc(8).unwrap();
        r.release(a, 8);
        assert_eq!(r.retired_count(), 1);
        assert_eq!(r.alloc(8), Some(a));
        assert_eq!(r.retired_count(), 0);
    }

    #[test]
    fn release_at_cursor_rolls_back() {
        let mut r = Region::new(32);
        let _a = r.alloc(8).unwrap();
        let b = r.alloc(8).unwrap();
        r.release(b, 8);
        assert_eq!(r.retired_count(), 0);
        assert_eq!(r.available(), 24);
    }

    #[test]
    fn larger_range_split_when_tail_full() {
        let mut r = Region::new(24);
        let a = r.alloc(16).unwrap();
        let _b = r.alloc(8).unwrap();
        r.release(a, 16);
        // Tail is exhausted, so the 16-byte range is split.
        assert_eq!(r.alloc(4), Some(0));
        assert_eq!(r.alloc(12), Some(4));
        assert_eq!(r.available(), 0);
    }

    #[test]
    fn neighbours_merge_on_release() {
        let mut r = Region::new(32);
        let a = r.alloc(8).unwrap();
        let b = r.alloc(8).unwrap();
        let c = r.alloc(8).unwrap();
        let _d = r.alloc(8).unwrap();
        r.release(a, 8);
        r.release(c, 8);
        assert_eq!(r.retired_count(), 2);
        r.release(b, 8);
        assert_eq!(r.retired_count(), 1);
        assert_eq!(r.alloc(24), Some(0));
    }

    #[test]
    fn cursor_rollback_absorbs_retired_ranges() {
        let mut r = Region::new(24);
        let a = r.alloc(8).unwrap();
        let b = r.alloc(8).unwrap();
        let c = r.alloc(8).unwrap();
        r.release(a, 8);
        r.release(b, 8);
        r.release(c, 8);
        assert_eq!(r.retired_count(), 0);
        assert_eq!(r.available(), 24);
        assert_eq!(r.alloc(24), Some(0));
    }

    #[test]
    fn reused_bytes_are_zeroed() {
        let mut r = Region::new(16);
        let a = r.alloc(4).unwrap();
        let _b = r.alloc(4).unwrap();
        r.slice_mut(a, 4).copy_from_slice(&[9, 9, 9, 9]);
        r.release(a, 4);
        let c = r.alloc(4).unwrap();
        assert_eq!(c, a);
        assert_eq!(r.slice(c, 4), &[0, 0, 0, 0]);
    }

    #[test]
    fn zero_length_is_free() {
        let mut r = Region::new(4);
        assert!(r.alloc(0).is_some());
        assert_eq!(r.available(), 4);
    }
}
