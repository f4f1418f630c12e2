//! Arena handles and the [`Direction`] of a comparison.
//!
//! A [`Handle`] names one allocation inside an arena. It is generation-scoped:
//! freeing an allocation bumps the slot generation, so a handle kept past its
//! `free` no longer matches and is reported as stale instead of aliasing a
//! newer allocation.

use std::cmp::Ordering;
use std::fmt;

/// Opaque identifier of a live arena allocation.
///
/// "No allocation" is spelled `Option::<Handle>::None` in process memory. In
/// the on-arena byte layout it is the reserved word [`Handle::NULL_BITS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    /// Encoded form of a NULL handle. Never produced by [`Handle::to_bits`]
    /// because slot index `u32::MAX` is never handed out.
    pub const NULL_BITS: u64 = u64::MAX;

    /// Largest slot index an arena may hand out.
    pub const MAX_INDEX: u32 = u32::MAX - 1;

    /// Create a handle from its parts.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the arena's block table.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot at the time of allocation.
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Pack into a single word: `(generation << 32) | index`.
    pub const fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    /// Unpack a word produced by [`Handle::to_bits`].
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }

    /// Encode an optional handle, mapping `None` to [`Handle::NULL_BITS`].
    pub fn encode(handle: Option<Self>) -> u64 {
        handle.map_or(Self::NULL_BITS, Self::to_bits)
    }

    /// Decode a word written by [`Handle::encode`].
    pub fn decode(bits: u64) -> Option<Self> {
        (bits != Self::NULL_BITS).then(|| Self::from_bits(bits))
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

/// Which child link a comparison selects.
///
/// Only strictly-less goes left. Equal elements go right together with
/// greater ones, so duplicates are kept as separate entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow or create the left (`lt`) link.
    Less,
    /// Follow or create the right (`gte`) link.
    GreaterOrEqual,
}

impl From<Ordering> for Direction {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Less,
            Ordering::Equal | Ordering::Greater => Self::GreaterOrEqual,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Less => write!(f, "left"),
            Self::GreaterOrEqual => write!(f, "right"),
        }
    }
}
