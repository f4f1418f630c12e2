//! A binary search tree that never holds a pointer.
//!
//! Nodes and payloads live in an [`Arena`](memtree_core::Arena) and are
//! reached only through [`Handle`](memtree_core::Handle)s. Two layers:
//!
//! - [`node`]: create, link, compare, read, and release a single node.
//! - [`tree`]: [`Tree`], which owns a root handle and an element width and
//!   implements insertion and point search on top of the node layer.
//!
//! ```rust
//! use memtree_arena::MemSys;
//! use memtree_core::compare::i32_native;
//! use memtree_tree::Tree;
//!
//! let mut arena = MemSys::default();
//! let mut tree = Tree::new(4);
//! for v in [5i32, 3, 8] {
//!     tree.insert(&mut arena, &i32_native, &v.to_ne_bytes()).unwrap();
//! }
//! let mut probe = 3i32.to_ne_bytes();
//! assert!(tree.search(&arena, &i32_native, &mut probe).unwrap());
//! tree.destroy(&mut arena).unwrap();
//! assert!(arena.stats().is_balanced());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod node;
pub mod tree;

pub use node::{NodeRecord, NODE_RECORD_SIZE};
pub use tree::Tree;
