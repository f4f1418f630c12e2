//! Benchmark profiles for memtree.
//!
//! - [`shuffled_keys`]: a fixed permutation of `0..n` that yields a
//!   reasonably bushy tree without a random number generator.
//! - [`arena_for`]: a [`MemSys`] sized to hold `n` `i32` nodes exactly.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use memtree_arena::{ArenaConfig, MemSys};
use memtree_core::ArenaError;

/// Bytes one `i32` node occupies: payload plus 24-byte record.
pub const I32_NODE_BYTES: usize = 4 + 24;

/// Keys `0..n` visited in stride order.
///
/// The stride is the largest prime below `n` that is coprime with it, so
/// each key appears exactly once.
pub fn shuffled_keys(n: u32) -> Vec<i32> {
    let stride = (1..n.max(2))
        .rev()
        .find(|&s| is_prime(s) && n % s != 0)
        .unwrap_or(1);
    (0..n)
        .map(|i| ((u64::from(i) * u64::from(stride)) % u64::from(n)) as i32)
        .collect()
}

fn is_prime(v: u32) -> bool {
    let v = u64::from(v);
    v >= 2 && (2..).take_while(|d| d * d <= v).all(|d| v % d != 0)
}

/// A `MemSys` with room for exactly `n` `i32` nodes.
pub fn arena_for(n: usize) -> Result<MemSys, ArenaError> {
    MemSys::new(
        ArenaConfig::new((n * I32_NODE_BYTES).max(1)).with_max_blocks((2 * n).max(1) as u32),
    )
}
