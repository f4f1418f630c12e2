//! Arena configuration parameters.

use memtree_core::ArenaError;

/// Configuration for a [`MemSys`](crate::MemSys) arena.
///
/// Validated at construction; immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the backing byte region.
    ///
    /// Default: 1 MiB. Must be non-zero.
    pub capacity_bytes: usize,

    /// Maximum number of simultaneously live allocations.
    ///
    /// Default: 65 536. Must be non-zero. Bounds the block table, which
    /// would otherwise grow with every zero-sized allocation.
    pub max_blocks: u32,
}

impl ArenaConfig {
    /// Default region size: 1 MiB.
    pub const DEFAULT_CAPACITY_BYTES: usize = 1 << 20;

    /// Default block table limit.
    pub const DEFAULT_MAX_BLOCKS: u32 = 65_536;

    /// Create a config with the given region size and the default block limit.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            max_blocks: Self::DEFAULT_MAX_BLOCKS,
        }
    }

    /// Replace the block table limit.
    pub fn with_max_blocks(mut self, max_blocks: u32) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    /// Check that the values describe a usable arena.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity_bytes == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "capacity_bytes must be non-zero".into(),
            });
        }
        if self.max_blocks == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "max_blocks must be non-zero".into(),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY_BYTES)
    }
}
