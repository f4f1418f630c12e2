//! memtree: a binary search tree whose nodes live in a simulated memory arena.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! memtree sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use memtree::prelude::*;
//! use memtree::types::compare::i32_native;
//!
//! let mut arena = MemSys::new(ArenaConfig::new(4096)).unwrap();
//! let mut tree = Tree::new(std::mem::size_of::<i32>());
//! for v in [5i32, 3, 8, 1, 4] {
//!     tree.insert(&mut arena, &i32_native, &v.to_ne_bytes()).unwrap();
//! }
//!
//! let mut probe = 4i32.to_ne_bytes();
//! assert!(tree.search(&arena, &i32_native, &mut probe).unwrap());
//! let mut missing = 9i32.to_ne_bytes();
//! assert!(!tree.search(&arena, &i32_native, &mut missing).unwrap());
//!
//! tree.destroy(&mut arena).unwrap();
//! assert!(arena.stats().is_balanced());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `memtree-core` | `Handle`, `Arena` and `Comparator` traits, errors, comparators |
//! | [`arena`] | `memtree-arena` | `MemSys`, `ArenaConfig`, `ArenaStats` |
//! | [`tree`] | `memtree-tree` | Node protocol and `Tree` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`memtree-core`).
pub use memtree_core as types;

/// The generational byte arena (`memtree-arena`).
pub use memtree_arena as arena;

/// Node and tree protocols (`memtree-tree`).
///
/// [`tree::node`] exposes the single-node operations; [`tree::Tree`] is the
/// usual entry point.
pub use memtree_tree as tree;

/// Common imports for typical memtree usage.
///
/// ```rust
/// use memtree::prelude::*;
/// ```
pub mod prelude {
    pub use memtree_arena::{ArenaConfig, ArenaStats, MemSys};
    pub use memtree_core::{Arena, ArenaError, Comparator, Direction, Handle, TreeError};
    pub use memtree_tree::Tree;
}
