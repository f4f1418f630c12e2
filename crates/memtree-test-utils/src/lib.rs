//! Test utilities and mock arenas for memtree development.
//!
//! - [`CountingArena`] wraps any arena and records every call, so tests can
//!   check that each allocation is freed exactly once.
//! - [`RefusingArena`] wraps any arena and refuses allocations, or frees,
//!   once a budget is spent.
//! - [`MockArena`] is a map-backed arena that never reuses handles.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod arenas;

pub use arenas::{CountingArena, MockArena, RefusingArena};

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`, writing through the
/// test harness. Safe to call from every test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Native-endian payload for an `i32` element.
pub fn int(v: i32) -> [u8; 4] {
    v.to_ne_bytes()
}

/// Decode a native-endian `i32` payload.
///
/// # Panics
///
/// Panics if `bytes` is not exactly four bytes long.
pub fn to_int(bytes: &[u8]) -> i32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    i32::from_ne_bytes(buf)
}
