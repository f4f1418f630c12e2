//! Core types and traits for memtree.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! arena contract the tree is written against ([`Arena`]), the generational
//! [`Handle`] that replaces pointers, the [`Comparator`] trait, and the
//! error types shared by every layer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod handle;
pub mod traits;

pub use error::{ArenaError, TreeError};
pub use handle::{Direction, Handle};
pub use traits::{Arena, Comparator};
