//! The memtree arena: a generational byte allocator addressed by handles.
//!
//! [`MemSys`] implements the [`Arena`](memtree_core::Arena) contract over a
//! single fixed-capacity byte region:
//!
//! ```text
//! MemSys
//! ├── Region (Vec<u8>, bump cursor + retired ranges)
//! ├── block table: index → (generation, offset, size, live)
//! └── free slot list (dead block indices, generation already bumped)
//! ```
//!
//! Handles carry the block generation, so use-after-free and double free are
//! reported as [`ArenaError::StaleHandle`](memtree_core::ArenaError) rather
//! than silently touching a newer allocation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod memsys;
pub mod region;
pub mod stats;

pub use config::ArenaConfig;
pub use memsys::MemSys;
pub use stats::ArenaStats;
