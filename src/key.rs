//! Stable photo keys.
//!
//! A key is the 64-bit FNV-1a hash of the path a photo was indexed under,
//! rendered as unpadded lowercase hex. The hash covers the path only, never the
//! file content: a renamed file gets a new key, and two paths to the same bytes
//! get two keys. Callers must hand in the path the same way on every run.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over `bytes`.
#[must_use]
pub const fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Derive the key for a path. Paths that are not UTF-8 have no key; the
/// index builder rejects them.
#[must_use]
pub fn derive_key(path: &str) -> String {
    format!("{:x}", fnv1a64(path.as_bytes()))
}
