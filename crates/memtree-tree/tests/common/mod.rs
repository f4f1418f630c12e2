//! Structure inspection helpers shared by the integration tests.
//!
//! The tree has no traversal API, so tests walk it with the node protocol.

#![allow(dead_code)]

use std::cmp::Ordering;

use memtree_core::{Arena, Comparator, Direction, Handle};
use memtree_test_utils::to_int;
use memtree_tree::node;

/// Payload bytes of every node under `root`, preorder.
pub fn collect<A: Arena>(arena: &A, root: Option<Handle>, width: usize) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut stack: Vec<Handle> = root.into_iter().collect();
    while let Some(n) = stack.pop() {
        let mut buf = vec![0u8; width];
        node::read_payload(arena, Some(n), &mut buf).unwrap();
        out.push(buf);
        if let Some(r) = node::child(arena, n, Direction::GreaterOrEqual).unwrap() {
            stack.push(r);
        }
        if let Some(l) = node::child(arena, n, Direction::Less).unwrap() {
            stack.push(l);
        }
    }
    out
}

/// `i32` values under `root`, sorted.
pub fn collect_ints<A: Arena>(arena: &A, root: Option<Handle>) -> Vec<i32> {
    let mut v: Vec<i32> = collect(arena, root, 4).iter().map(|b| to_int(b)).collect();
    v.sort_unstable();
    v
}

/// Assert the BST ordering invariant at every node under `root`.
pub fn assert_ordered<A: Arena, C: Comparator>(
    arena: &A,
    comparator: &C,
    root: Option<Handle>,
    width: usize,
) {
    let mut stack: Vec<Handle> = root.into_iter().collect();
    while let Some(n) = stack.pop() {
        let mut here = vec![0u8; width];
        node::read_payload(arena, Some(n), &mut here).unwrap();

        let left = node::child(arena, n, Direction::Less).unwrap();
        for v in collect(arena, left, width) {
            assert_eq!(comparator.compare(&v, &here), Ordering::Less);
        }
        let right = node::child(arena, n, Direction::GreaterOrEqual).unwrap();
        for v in collect(arena, right, width) {
            assert_ne!(comparator.compare(&v, &here), Ordering::Less);
        }
        stack.extend(left);
        stack.extend(right);
    }
}

/// Longest root-to-leaf path, in nodes.
pub fn height<A: Arena>(arena: &A, root: Option<Handle>) -> usize {
    let mut best = 0;
    let mut stack: Vec<(Handle, usize)> = root.into_iter().map(|h| (h, 1)).collect();
    while let Some((n, d)) = stack.pop() {
        best = best.max(d);
        for dir in [Direction::Less, Direction::GreaterOrEqual] {
            if let Some(c) = node::child(arena, n, dir).unwrap() {
                stack.push((c, d + 1));
            }
        }
    }
    best
}
