//! Node protocol: one BST node, addressed only by its arena handle.
//!
//! A node is two allocations: the payload blob (`width` bytes) and a
//! fixed-size record linking payload and children:
//!
//! ```text
//! offset  0: data   u64 LE   payload handle, never NULL
//! offset  8: left   u64 LE   child comparing strictly less, or NULL
//! offset 16: right  u64 LE   child comparing greater-or-equal, or NULL
//! ```
//!
//! Every function here reads or writes the record through the arena; no
//! node state is cached between calls.

use std::cmp::Ordering;

use memtree_core::{Arena, Comparator, Direction, Handle, TreeError};
use smallvec::SmallVec;

/// Size in bytes of an encoded [`NodeRecord`].
pub const NODE_RECORD_SIZE: usize = 24;

/// Payloads up to this size are compared without a heap buffer.
const INLINE_PAYLOAD: usize = 32;

/// Decoded form of the on-arena node record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeRecord {
    /// Handle of the payload blob.
    pub data: Handle,
    /// Left (`lt`) child.
    pub left: Option<Handle>,
    /// Right (`gte`) child.
    pub right: Option<Handle>,
}

impl NodeRecord {
    /// A record with no children.
    pub fn leaf(data: Handle) -> Self {
        Self {
            data,
            left: None,
            right: None,
        }
    }

    /// The child link selected by `direction`.
    pub fn child(&self, direction: Direction) -> Option<Handle> {
        match direction {
            Direction::Less => self.left,
            Direction::GreaterOrEqual => self.right,
        }
    }

    fn child_mut(&mut self, direction: Direction) -> &mut Option<Handle> {
        match direction {
            Direction::Less => &mut self.left,
            Direction::GreaterOrEqual => &mut self.right,
        }
    }

    /// Whether both child links are NULL.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Encode into the on-arena layout.
    pub fn to_bytes(&self) -> [u8; NODE_RECORD_SIZE] {
        let mut buf = [0u8; NODE_RECORD_SIZE];
        buf[0..8].copy_from_slice(&self.data.to_bits().to_le_bytes());
        buf[8..16].copy_from_slice(&Handle::encode(self.left).to_le_bytes());
        buf[16..24].copy_from_slice(&Handle::encode(self.right).to_le_bytes());
        buf
    }

    /// Decode the record stored at `node`.
    ///
    /// Returns [`TreeError::CorruptNode`] if the payload word is NULL.
    pub fn from_bytes(node: Handle, bytes: &[u8; NODE_RECORD_SIZE]) -> Result<Self, TreeError> {
        let word = |i: usize| {
            let mut w = [0u8; 8];
            w.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            u64::from_le_bytes(w)
        };
        let data = Handle::decode(word(0)).ok_or(TreeError::CorruptNode { node })?;
        Ok(Self {
            data,
            left: Handle::decode(word(1)),
            right: Handle::decode(word(2)),
        })
    }

    /// Read and decode the record of `node`.
    pub fn load<A: Arena + ?Sized>(arena: &A, node: Handle) -> Result<Self, TreeError> {
        let mut buf = [0u8; NODE_RECORD_SIZE];
        arena.read_into(node, &mut buf)?;
        Self::from_bytes(node, &buf)
    }

    /// Encode and write this record to `node`.
    pub fn store<A: Arena + ?Sized>(&self, arena: &mut A, node: Handle) -> Result<(), TreeError> {
        arena.write(node, &self.to_bytes())?;
        Ok(())
    }
}

fn allocate<A: Arena + ?Sized>(arena: &mut A, size: usize) -> Result<Handle, TreeError> {
    arena.allocate(size).map_err(|e| {
        tracing::error!(size, error = %e, "arena refused node allocation");
        TreeError::from(e)
    })
}

/// Store `payload` in a new childless node and return the node's handle.
///
/// Allocates the payload blob, then the record. If the record allocation is
/// refused the payload blob is released before the error is returned.
pub fn create_node<A: Arena + ?Sized>(arena: &mut A, payload: &[u8]) -> Result<Handle, TreeError> {
    let data = allocate(arena, payload.len())?;
    let node = match allocate(arena, NODE_RECORD_SIZE) {
        Ok(node) => node,
        Err(e) => {
            arena.free(data)?;
            return Err(e);
        }
    };
    arena.write(data, payload)?;
    NodeRecord::leaf(data).store(arena, node)?;
    Ok(node)
}

/// Create a node for `payload` and link it under `parent` on the `direction`
/// side. Returns the new child's handle.
///
/// The target link must be NULL. This is not checked: a non-NULL link is
/// overwritten and the subtree it pointed to becomes unreachable. Tree
/// insertion only ever attaches where its descent ended on NULL.
pub fn attach_child<A: Arena + ?Sized>(
    arena: &mut A,
    parent: Handle,
    payload: &[u8],
    direction: Direction,
) -> Result<Handle, TreeError> {
    let mut record = NodeRecord::load(arena, parent)?;
    let child = create_node(arena, payload)?;
    *record.child_mut(direction) = Some(child);
    record.store(arena, parent)?;
    Ok(child)
}

/// Compare `target` against the element stored in `node`.
///
/// Returns `comparator.compare(target, stored)`: `Less` means `target`
/// sorts before the stored element.
pub fn compare_against<A, C>(
    arena: &A,
    node: Handle,
    comparator: &C,
    target: &[u8],
) -> Result<Ordering, TreeError>
where
    A: Arena + ?Sized,
    C: Comparator + ?Sized,
{
    let record = NodeRecord::load(arena, node)?;
    let mut stored: SmallVec<[u8; INLINE_PAYLOAD]> = SmallVec::from_elem(0, target.len());
    arena.read_into(record.data, &mut stored)?;
    Ok(comparator.compare(target, &stored))
}

/// The child of `node` on the `direction` side, or `None` for NULL.
pub fn child<A: Arena + ?Sized>(
    arena: &A,
    node: Handle,
    direction: Direction,
) -> Result<Option<Handle>, TreeError> {
    Ok(NodeRecord::load(arena, node)?.child(direction))
}

/// Copy the payload of `node` into `dest`. `dest.len()` is the width.
pub fn read_payload<A: Arena + ?Sized>(
    arena: &A,
    node: Option<Handle>,
    dest: &mut [u8],
) -> Result<(), TreeError> {
    let Some(node) = node else {
        tracing::error!("read_payload called on a NULL node");
        return Err(TreeError::NullHandle {
            operation: "read_payload",
        });
    };
    let record = NodeRecord::load(arena, node)?;
    arena.read_into(record.data, dest)?;
    Ok(())
}

/// Free a childless node and its payload, then set `slot` to NULL.
///
/// A node that still has a child is refused with [`TreeError::NotALeaf`]
/// and nothing is freed; detaching it would strand the children in the
/// arena.
pub fn detach_leaf<A: Arena + ?Sized>(
    arena: &mut A,
    slot: &mut Option<Handle>,
) -> Result<(), TreeError> {
    let Some(node) = *slot else {
        tracing::error!("detach_leaf called on a NULL node");
        return Err(TreeError::NullHandle {
            operation: "detach_leaf",
        });
    };
    let record = NodeRecord::load(arena, node)?;
    if !record.is_leaf() {
        return Err(TreeError::NotALeaf { node });
    }
    arena.free(node)?;
    arena.free(record.data)?;
    *slot = None;
    Ok(())
}

/// Free every node reachable from `slot`, children before parents, then set
/// `slot` to NULL. Returns the number of nodes freed. NULL is a no-op.
///
/// Iterative post-order walk. Each leaf is released with [`detach_leaf`] and
/// its link in the parent record is cleared in the arena right after, so the
/// parent becomes a leaf in turn. If the arena fails midway, everything not
/// yet freed is still linked from `slot` and the call can be repeated.
pub fn free_subtree<A: Arena + ?Sized>(
    arena: &mut A,
    slot: &mut Option<Handle>,
) -> Result<usize, TreeError> {
    let Some(root) = *slot else {
        return Ok(0);
    };
    let mut path = vec![root];
    let mut freed = 0;
    while let Some(&node) = path.last() {
        let record = NodeRecord::load(arena, node)?;
        if let Some(next) = record.left.or(record.right) {
            path.push(next);
            continue;
        }
        let mut leaf = Some(node);
        detach_leaf(arena, &mut leaf)?;
        path.pop();
        freed += 1;
        match path.last() {
            Some(&parent) => unlink(arena, parent, node)?,
            None => *slot = None,
        }
    }
    Ok(freed)
}

/// Clear whichever link of `parent` names `child`.
fn unlink<A: Arena + ?Sized>(
    arena: &mut A,
    parent: Handle,
    child: Handle,
) -> Result<(), TreeError> {
    let mut record = NodeRecord::load(arena, parent)?;
    if record.left == Some(child) {
        record.left = None;
    } else {
        record.right = None;
    }
    record.store(arena, parent)
}
