//! Error types for memtree.
//!
//! Split by layer: [`ArenaError`] is what an [`Arena`](crate::Arena)
//! reports, [`TreeError`] is what the node and tree protocols report.
//! Arena failures that the tree cannot classify more precisely are carried
//! inside [`TreeError::Arena`].

use std::error::Error;
use std::fmt;

use crate::handle::Handle;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The arena refused an allocation: not enough free bytes or no free
    /// block slot.
    Exhausted {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes still available when the request was refused.
        available: usize,
    },
    /// The handle does not name a live allocation: it was freed already,
    /// or it never came from this arena.
    StaleHandle {
        /// The offending handle.
        handle: Handle,
    },
    /// A read or write reached past the end of the allocation.
    OutOfBounds {
        /// The allocation that was accessed.
        handle: Handle,
        /// Number of bytes the caller asked to access.
        requested: usize,
        /// Size of the allocation.
        size: usize,
    },
    /// Arena configuration rejected at construction.
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted {
                requested,
                available,
            } => {
                write!(
                    f,
                    "arena exhausted: requested {requested} bytes, {available} bytes available"
                )
            }
            Self::StaleHandle { handle } => {
                write!(f, "stale handle {handle}")
            }
            Self::OutOfBounds {
                handle,
                requested,
                size,
            } => {
                write!(
                    f,
                    "access of {requested} bytes out of bounds for {handle} ({size} bytes)"
                )
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}

/// Errors from the node and tree protocols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The arena refused to allocate a payload or node record.
    AllocationExhausted {
        /// Number of bytes requested.
        requested: usize,
        /// The arena's refusal.
        source: ArenaError,
    },
    /// An operation that needs a node was given the NULL handle.
    NullHandle {
        /// Name of the operation that was called.
        operation: &'static str,
    },
    /// `detach_leaf` was called on a node that still has children.
    NotALeaf {
        /// The node that was not detached.
        node: Handle,
    },
    /// A payload buffer does not match the tree's element width.
    WidthMismatch {
        /// The tree's element width.
        expected: usize,
        /// Length of the buffer supplied.
        actual: usize,
    },
    /// A node record has a NULL payload handle.
    CorruptNode {
        /// The node whose record failed to decode.
        node: Handle,
    },
    /// Any other arena failure.
    Arena(ArenaError),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationExhausted { requested, .. } => {
                write!(f, "allocation of {requested} bytes refused by arena")
            }
            Self::NullHandle { operation } => {
                write!(f, "{operation}: NULL node handle")
            }
            Self::NotALeaf { node } => {
                write!(f, "node {node} still has children and cannot be detached")
            }
            Self::WidthMismatch { expected, actual } => {
                write!(
                    f,
                    "payload width mismatch: tree stores {expected} bytes, got {actual}"
                )
            }
            Self::CorruptNode { node } => {
                write!(f, "node {node} has no payload handle")
            }
            Self::Arena(e) => write!(f, "arena error: {e}"),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AllocationExhausted { source, .. } => Some(source),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for TreeError {
    fn from(e: ArenaError) -> Self {
        match e {
            ArenaError::Exhausted { requested, .. } => Self::AllocationExhausted {
                requested,
                source: e,
            },
            other => Self::Arena(other),
        }
    }
}
