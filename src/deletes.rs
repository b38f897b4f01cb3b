//! Delete-variant enumeration.
//!
//! Given a word, produce every unique byte string reachable by deleting
//! 1 to `max_distance` characters from the word's prefix (its first
//! `prefix_length` bytes), plus the prefix itself, plus the empty string
//! when the prefix is short enough to be deleted away entirely.
//!
//! The same enumeration runs in two places: once per dictionary word at
//! load time (variants become delete-index keys) and once per query on
//! the lookup slow path (variants become probe keys). Both callers own a
//! reusable [`DeleteBuffer`] so the enumeration itself never touches the
//! heap in the steady state.
//!
//! Ordering matters: the prefix truncation happens BEFORE any deletion is
//! enumerated. Deleting first and truncating after yields a different set
//! and silently breaks the index/query symmetry the algorithm depends on.

use std::collections::HashSet;

use crate::config::{MAX_DELETE_QUEUE, MAX_TERM_LEN};
use crate::xxhash::xxh3_oneshot;

/// Reusable output buffer for delete enumeration.
///
/// Variants are stored back to back in one flat byte buffer and addressed
/// by (offset, length) pairs. The dedup set keys on the 64-bit XXH3 of the
/// variant bytes — the same accepted-collision posture as the exact-match
/// table.
pub struct DeleteBuffer {
    bytes: Vec<u8>,
    spans: Vec<(u32, u32)>,
    seen: HashSet<u64>,
    queue: Vec<(u32, u32)>, // (variant index, deletions so far)
}

impl DeleteBuffer {
    pub fn new() -> Self {
        DeleteBuffer {
            bytes: Vec::with_capacity(4096),
            spans: Vec::with_capacity(256),
            seen: HashSet::with_capacity(256),
            queue: Vec::with_capacity(256),
        }
    }

    /// Number of variants produced by the last enumeration.
    #[inline]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Variant `i` of the last enumeration.
    #[inline]
    pub fn get(&self, i: usize) -> &[u8] {
        let (off, len) = self.spans[i];
        &self.bytes[off as usize..(off + len) as usize]
    }

    /// Iterate over all variants of the last enumeration.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.spans
            .iter()
            .map(|&(off, len)| &self.bytes[off as usize..(off + len) as usize])
    }

    fn clear(&mut self) {
        self.bytes.clear();
        self.spans.clear();
        self.seen.clear();
        self.queue.clear();
    }

    /// Append `variant` unless it is a duplicate or the buffer is at
    /// capacity. Returns the variant's index when freshly added.
    fn push(&mut self, variant: &[u8]) -> Option<u32> {
        if self.spans.len() >= MAX_DELETE_QUEUE {
            return None;
        }
        if !self.seen.insert(xxh3_oneshot(variant)) {
            return None;
        }
        let off = self.bytes.len() as u32;
        self.bytes.extend_from_slice(variant);
        self.spans.push((off, variant.len() as u32));
        Some((self.spans.len() - 1) as u32)
    }

    /// Enumerate the delete set of `word` into this buffer, replacing any
    /// previous contents.
    ///
    /// The set contains: the prefix (`word` truncated to `prefix_length`
    /// bytes), every unique string reachable from the prefix by 1 to
    /// `max_distance` single-character deletions, and the empty string iff
    /// `prefix_length <= max_distance`.
    pub fn enumerate(&mut self, word: &[u8], max_distance: u32, prefix_length: u32) {
        self.clear();
        if word.is_empty() {
            return;
        }

        // Truncate to the prefix first; everything below operates on it.
        let take = (prefix_length as usize).min(word.len()).min(MAX_TERM_LEN);
        let prefix = &word[..take];

        let root = match self.push(prefix) {
            Some(i) => i,
            None => return,
        };
        if prefix_length <= max_distance {
            self.push(b"");
        }

        // Breadth-first over the deletion lattice. Variants of length <= 1
        // are not descended into: their only deletion is the empty string,
        // which is handled by the emission rule above.
        self.queue.push((root, 0));
        let mut head = 0;
        while head < self.queue.len() {
            let (idx, dist) = self.queue[head];
            head += 1;
            if dist >= max_distance {
                continue;
            }
            let (off, len) = self.spans[idx as usize];
            if len <= 1 {
                continue;
            }

            // Copy the current variant out of the flat buffer so pushing
            // fresh variants cannot invalidate what we read from.
            let mut current = [0u8; MAX_TERM_LEN];
            let cur_len = len as usize;
            current[..cur_len]
                .copy_from_slice(&self.bytes[off as usize..off as usize + cur_len]);

            let mut variant = [0u8; MAX_TERM_LEN];
            for skip in 0..cur_len {
                variant[..skip].copy_from_slice(&current[..skip]);
                variant[skip..cur_len - 1].copy_from_slice(&current[skip + 1..cur_len]);
                if let Some(new_idx) = self.push(&variant[..cur_len - 1]) {
                    self.queue.push((new_idx, dist + 1));
                }
            }
        }
    }
}

impl Default for DeleteBuffer {
    fn default() -> Self {
        Self::new()
    }
}
