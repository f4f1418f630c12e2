//! Tree protocol: an unbalanced BST over arena-resident nodes.
//!
//! [`Tree`] lives in ordinary memory and holds nothing but the element width
//! and the root handle. Insertion and search walk the arena one node at a
//! time through the [`node`](crate::node) protocol.

use std::cmp::Ordering;

use memtree_core::{Arena, Comparator, Direction, Handle, TreeError};

use crate::node;

/// A binary search tree whose nodes live in an [`Arena`].
///
/// The tree does not own the arena, and dropping it does not free anything:
/// call [`Tree::destroy`] to release the nodes. Not `Clone`: two trees must
/// never share a root. No rebalancing is done, so sorted input degrades the
/// tree to a list.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a Tree without destroy() leaks its nodes in the arena"]
pub struct Tree {
    width: usize,
    root: Option<Handle>,
}

impl Tree {
    /// Create an empty tree of `width`-byte elements.
    pub fn new(width: usize) -> Self {
        Self { width, root: None }
    }

    /// Element width in bytes.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Handle of the root node, `None` while the tree is empty.
    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Whether nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn check_width(&self, len: usize) -> Result<(), TreeError> {
        if len != self.width {
            return Err(TreeError::WidthMismatch {
                expected: self.width,
                actual: len,
            });
        }
        Ok(())
    }

    /// Insert a copy of `payload`.
    ///
    /// Elements comparing equal to a stored one go to its right subtree, so
    /// duplicates are kept as separate entries.
    pub fn insert<A, C>(
        &mut self,
        arena: &mut A,
        comparator: &C,
        payload: &[u8],
    ) -> Result<(), TreeError>
    where
        A: Arena + ?Sized,
        C: Comparator + ?Sized,
    {
        self.check_width(payload.len())?;
        let Some(root) = self.root else {
            self.root = Some(node::create_node(arena, payload)?);
            tracing::trace!(width = self.width, "inserted root");
            return Ok(());
        };

        let mut parent = root;
        let mut depth = 1usize;
        let direction = loop {
            let direction =
                Direction::from(node::compare_against(arena, parent, comparator, payload)?);
            match node::child(arena, parent, direction)? {
                Some(next) => {
                    parent = next;
                    depth += 1;
                }
                None => break direction,
            }
        };
        node::attach_child(arena, parent, payload, direction)?;
        tracing::trace!(depth, %direction, "inserted");
        Ok(())
    }

    /// Look up an element comparing equal to `target`.
    ///
    /// On a match, `target` is overwritten with the stored bytes and `true`
    /// is returned. The stored bytes may differ from the probe wherever the
    /// comparator ignores them.
    pub fn search<A, C>(
        &self,
        arena: &A,
        comparator: &C,
        target: &mut [u8],
    ) -> Result<bool, TreeError>
    where
        A: Arena + ?Sized,
        C: Comparator + ?Sized,
    {
        self.check_width(target.len())?;
        let mut current = self.root;
        let mut depth = 0usize;
        while let Some(node) = current {
            depth += 1;
            let ordering = node::compare_against(arena, node, comparator, target)?;
            if ordering == Ordering::Equal {
                node::read_payload(arena, Some(node), target)?;
                tracing::trace!(depth, "search hit");
                return Ok(true);
            }
            current = node::child(arena, node, Direction::from(ordering))?;
        }
        tracing::trace!(depth, "search miss");
        Ok(false)
    }

    /// Release every node and payload, leaving the tree empty. Returns the
    /// number of nodes freed.
    ///
    /// If the arena fails midway, the tree keeps every node that was not
    /// freed yet and `clear` can be called again.
    pub fn clear<A: Arena + ?Sized>(&mut self, arena: &mut A) -> Result<usize, TreeError> {
        let freed = node::free_subtree(arena, &mut self.root)?;
        tracing::debug!(freed, width = self.width, "tree cleared");
        Ok(freed)
    }

    /// Release every node and payload, consuming the tree.
    ///
    /// On error the tree is lost along with the nodes it still held; use
    /// [`Tree::clear`] to keep it for a retry.
    pub fn destroy<A: Arena + ?Sized>(mut self, arena: &mut A) -> Result<(), TreeError> {
        self.clear(arena)?;
        Ok(())
    }
}
