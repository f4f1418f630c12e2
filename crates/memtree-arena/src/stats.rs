//! Allocation counters for a [`MemSys`](crate::MemSys).

use std::fmt;

/// Running totals kept by the arena.
///
/// `allocations - frees == live_blocks` holds at all times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Successful `allocate` calls.
    pub allocations: u64,
    /// Successful `free` calls.
    pub frees: u64,
    /// Refused `allocate` calls.
    pub refusals: u64,
    /// Allocations currently live.
    pub live_blocks: u64,
    /// Bytes held by live allocations.
    pub bytes_in_use: usize,
    /// Peak of `bytes_in_use`.
    pub high_water_bytes: usize,
}

impl ArenaStats {
    pub(crate) fn record_alloc(&mut self, size: usize) {
        self.allocations += 1;
        self.live_blocks += 1;
        self.bytes_in_use += size;
        self.high_water_bytes = self.high_water_bytes.max(self.bytes_in_use);
    }

    pub(crate) fn record_free(&mut self, size: usize) {
        self.frees += 1;
        self.live_blocks -= 1;
        self.bytes_in_use -= size;
    }

    pub(crate) fn record_refusal(&mut self) {
        self.refusals += 1;
    }

    /// Whether every allocation has been freed.
    pub fn is_balanced(&self) -> bool {
        self.allocations == self.frees
    }
}

impl fmt::Display for ArenaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} allocs, {} frees, {} refused, {} live ({} bytes, peak {})",
            self.allocations,
            self.frees,
            self.refusals,
            self.live_blocks,
            self.bytes_in_use,
            self.high_water_bytes
        )
    }
}
