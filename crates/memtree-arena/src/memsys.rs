//! [`MemSys`]: the generational arena.
//!
//! Allocations are recorded in a block table. A handle is a block index plus
//! the block's generation at allocation time; `free` bumps the generation, so
//! a handle that outlives its allocation is caught on the next access
//! instead of reading whatever reused the bytes.

use memtree_core::{Arena, ArenaError, Handle};

use crate::config::ArenaConfig;
use crate::region::Region;
use crate::stats::ArenaStats;

/// One entry of the block table.
#[derive(Clone, Copy, Debug)]
struct Block {
    generation: u32,
    offset: usize,
    size: usize,
    live: bool,
}

/// A bounded, generational byte arena.
///
/// Backed by a single [`Region`] of `config.capacity_bytes`. Dead block
/// slots are reused through a free list; their generation is bumped on every
/// `free`.
pub struct MemSys {
    config: ArenaConfig,
    region: Region,
    /// All block slots (live and dead).
    blocks: Vec<Block>,
    /// Indices of dead slots available for reuse.
    free_slots: Vec<u32>,
    stats: ArenaStats,
}

impl MemSys {
    /// Create an arena from a validated configuration.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            region: Region::new(config.capacity_bytes),
            blocks: Vec::new(),
            free_slots: Vec::new(),
            stats: ArenaStats::default(),
            config,
        })
    }

    /// Create an arena of `capacity_bytes` with default limits.
    pub fn with_capacity(capacity_bytes: usize) -> Result<Self, ArenaError> {
        Self::new(ArenaConfig::new(capacity_bytes))
    }

    /// The configuration this arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Allocation counters.
    pub fn stats(&self) -> ArenaStats {
        self.stats
    }

    /// Bytes not reserved by live allocations.
    pub fn available(&self) -> usize {
        self.region.available()
    }

    /// Whether `handle` names a live allocation.
    pub fn is_live(&self, handle: Handle) -> bool {
        self.block(handle).is_ok()
    }

    /// Size of the allocation behind `handle`.
    pub fn size_of(&self, handle: Handle) -> Result<usize, ArenaError> {
        self.block(handle).map(|b| b.size)
    }

    fn block(&self, handle: Handle) -> Result<&Block, ArenaError> {
        self.blocks
            .get(handle.index() as usize)
            .filter(|b| b.live && b.generation == handle.generation())
            .ok_or(ArenaError::StaleHandle { handle })
    }

    fn bounded(&self, handle: Handle, len: usize) -> Result<(usize, usize), ArenaError> {
        let block = self.block(handle)?;
        if len > block.size {
            return Err(ArenaError::OutOfBounds {
                handle,
                requested: len,
                size: block.size,
            });
        }
        Ok((block.offset, block.size))
    }

    fn refuse(&mut self, requested: usize) -> ArenaError {
        self.stats.record_refusal();
        let available = self.region.available();
        tracing::debug!(requested, available, "allocation refused");
        ArenaError::Exhausted {
            requested,
            available,
        }
    }
}

impl Arena for MemSys {
    fn allocate(&mut self, size: usize) -> Result<Handle, ArenaError> {
        let slot_free =
            !self.free_slots.is_empty() || self.blocks.len() < self.config.max_blocks as usize;
        if !slot_free {
            return Err(self.refuse(size));
        }
        let Some(offset) = self.region.alloc(size) else {
            return Err(self.refuse(size));
        };

        let handle = if let Some(index) = self.free_slots.pop() {
            let block = &mut self.blocks[index as usize];
            block.offset = offset;
            block.size = size;
            block.live = true;
            Handle::new(index, block.generation)
        } else {
            let index = self.blocks.len() as u32;
            self.blocks.push(Block {
                generation: 0,
                offset,
                size,
                live: true,
            });
            Handle::new(index, 0)
        };

        self.stats.record_alloc(size);
        tracing::trace!(%handle, size, offset, "allocate");
        Ok(handle)
    }

    fn free(&mut self, handle: Handle) -> Result<(), ArenaError> {
        let (offset, size) = self.bounded(handle, 0)?;
        let block = &mut self.blocks[handle.index() as usize];
        block.live = false;
        block.generation = block.generation.wrapping_add(1);
        self.free_slots.push(handle.index());
        self.region.release(offset, size);
        self.stats.record_free(size);
        tracing::trace!(%handle, size, "free");
        Ok(())
    }

    fn write(&mut self, handle: Handle, bytes: &[u8]) -> Result<(), ArenaError> {
        let (offset, _) = self.bounded(handle, bytes.len())?;
        self.region
            .slice_mut(offset, bytes.len())
            .copy_from_slice(bytes);
        Ok(())
    }

    fn read_into(&self, handle: Handle, dest: &mut [u8]) -> Result<(), ArenaError> {
        let (offset, _) = self.bounded(handle, dest.len())?;
        dest.copy_from_slice(self.region.slice(offset, dest.len()));
        Ok(())
    }
}

impl Default for MemSys {
    fn default() -> Self {
        Self {
            region: Region::new(ArenaConfig::DEFAULT_CAPACITY_BYTES),
            blocks: Vec::new(),
            free_slots: Vec::new(),
            stats: ArenaStats::default(),
            config: ArenaConfig::default(),
        }
    }
}

impl std::fmt::Debug for MemSys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemSys")
            .field("capacity_bytes", &self.region.capacity())
            .field("available", &self.region.available())
            .field("blocks", &self.blocks.len())
            .field("stats", &self.stats)
            .finish()
    }
}
