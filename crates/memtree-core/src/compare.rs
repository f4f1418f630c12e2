//! Stock comparators for common payload encodings.
//!
//! Fixed-width numeric comparators read the first `N` bytes of each buffer
//! in native byte order. Buffers shorter than `N` are zero-extended.

use std::cmp::Ordering;

fn word<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut buf = [0u8; N];
    let n = bytes.len().min(N);
    buf[..n].copy_from_slice(&bytes[..n]);
    buf
}

/// Compare payloads holding a native-endian `i32`.
pub fn i32_native(a: &[u8], b: &[u8]) -> Ordering {
    i32::from_ne_bytes(word(a)).cmp(&i32::from_ne_bytes(word(b)))
}

/// Compare payloads holding a native-endian `u64`.
pub fn u64_native(a: &[u8], b: &[u8]) -> Ordering {
    u64::from_ne_bytes(word(a)).cmp(&u64::from_ne_bytes(word(b)))
}

/// Plain byte-wise lexicographic order.
pub fn lexicographic(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}
