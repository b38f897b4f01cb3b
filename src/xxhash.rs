//! Thin wrapper around the `xxhash-rust` crate providing the XXH3 API used
//! by the rest of this crate.
//!
//! Only the 64-bit one-shot form is needed: both hash tables and the
//! delete-enumeration dedup set key on a single `u64` per byte string.

pub use xxhash_rust::xxh3::Xxh3 as Xxh3State;

/// One-shot 64-bit XXH3 hash of `data`.
#[inline]
pub fn xxh3_oneshot(data: &[u8]) -> u64 {
    xxhash_rust::xxh3::xxh3_64(data)
}

/// Hash a term for the exact-match table.
///
/// The table uses `0` as its empty-slot sentinel, so a raw hash of zero is
/// remapped to `1`. XXH3 of real words never returns zero in practice; the
/// remap just keeps the sentinel unambiguous.
#[inline]
pub fn term_hash(term: &[u8]) -> u64 {
    let h = xxhash_rust::xxh3::xxh3_64(term);
    if h == 0 {
        1
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oneshot_is_deterministic() {
        assert_eq!(xxh3_oneshot(b"hello"), xxh3_oneshot(b"hello"));
        assert_ne!(xxh3_oneshot(b"hello"), xxh3_oneshot(b"helo"));
    }

    #[test]
    fn term_hash_never_returns_sentinel() {
        assert_ne!(term_hash(b""), 0);
        assert_ne!(term_hash(b"the"), 0);
    }
}
