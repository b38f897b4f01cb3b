//! Exact-match index: the lookup fast path.
//!
//! A flat open-addressed table in struct-of-arrays layout. Slot `i` holds
//! `(hash, frequency, probability, iwf)` across four parallel arrays; a
//! hash of `0` marks an empty slot. Probing is linear from `hash % N`.
//!
//! The table is keyed by 64-bit hash only — the word string itself is not
//! stored. A hash collision between two distinct words therefore resolves
//! to whichever was inserted first; callers that need stronger guarantees
//! must carry their own confirmation compare.

use crate::config::{EXACT_TABLE_SLOTS, ZERO_PROBABILITY_IWF};
use crate::index::IndexError;

/// Open-addressed `hash -> (frequency, probability, iwf)` table of fixed
/// size. Insertion keeps the maximum frequency seen for a hash.
pub struct ExactIndex {
    hashes: Vec<u64>,
    frequencies: Vec<u64>,
    probabilities: Vec<f32>,
    iwfs: Vec<f32>,
    len: usize,
}

impl ExactIndex {
    pub fn new() -> Self {
        ExactIndex {
            hashes: vec![0; EXACT_TABLE_SLOTS],
            frequencies: vec![0; EXACT_TABLE_SLOTS],
            probabilities: vec![0.0; EXACT_TABLE_SLOTS],
            iwfs: vec![0.0; EXACT_TABLE_SLOTS],
            len: 0,
        }
    }

    /// Number of distinct hashes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Probe for `hash`. Returns the slot holding it, or the empty slot
    /// where it would be inserted.
    #[inline]
    fn probe(&self, hash: u64) -> usize {
        let n = self.hashes.len();
        let mut i = (hash % n as u64) as usize;
        loop {
            let h = self.hashes[i];
            if h == hash || h == 0 {
                return i;
            }
            i += 1;
            if i == n {
                i = 0;
            }
        }
    }

    /// Insert `(hash, frequency)`, keeping the maximum frequency when the
    /// hash is already present.
    ///
    /// Returns `Ok(true)` for a fresh hash, `Ok(false)` for an update, and
    /// [`IndexError::TableFull`] when no free slot is left. A `hash` of
    /// zero (the empty sentinel) is never inserted.
    pub fn insert_max(&mut self, hash: u64, frequency: u64) -> Result<bool, IndexError> {
        if hash == 0 {
            return Ok(false);
        }
        let slot = self.probe(hash);
        if self.hashes[slot] == hash {
            if frequency > self.frequencies[slot] {
                self.frequencies[slot] = frequency;
            }
            return Ok(false);
        }
        // One slot always stays empty so probe loops terminate.
        if self.len + 1 >= self.hashes.len() {
            return Err(IndexError::TableFull);
        }
        self.hashes[slot] = hash;
        self.frequencies[slot] = frequency;
        self.len += 1;
        Ok(true)
    }

    /// Stored frequency for `hash`, if present.
    #[inline]
    pub fn frequency(&self, hash: u64) -> Option<u64> {
        if hash == 0 {
            return None;
        }
        let slot = self.probe(hash);
        (self.hashes[slot] == hash).then(|| self.frequencies[slot])
    }

    /// Derived probability for `hash`; `0.0` when absent.
    #[inline]
    pub fn probability(&self, hash: u64) -> f32 {
        if hash == 0 {
            return 0.0;
        }
        let slot = self.probe(hash);
        if self.hashes[slot] == hash {
            self.probabilities[slot]
        } else {
            0.0
        }
    }

    /// Derived IWF for `hash`; `0.0` when absent.
    #[inline]
    pub fn iwf(&self, hash: u64) -> f32 {
        if hash == 0 {
            return 0.0;
        }
        let slot = self.probe(hash);
        if self.hashes[slot] == hash {
            self.iwfs[slot]
        } else {
            0.0
        }
    }

    /// End-of-load sweep: derive `probability = frequency / max_frequency`
    /// and `iwf = |ln probability|` for every inhabited slot.
    ///
    /// Idempotent; safe to re-run after an additional load pass.
    pub fn derive_weights(&mut self) {
        let max_freq = self
            .hashes
            .iter()
            .zip(&self.frequencies)
            .filter(|(h, _)| **h != 0)
            .map(|(_, f)| *f)
            .max()
            .unwrap_or(0);
        if max_freq == 0 {
            return;
        }
        for i in 0..self.hashes.len() {
            if self.hashes[i] == 0 {
                continue;
            }
            let p = self.frequencies[i] as f32 / max_freq as f32;
            self.probabilities[i] = p;
            self.iwfs[i] = if p > 0.0 {
                p.ln().abs()
            } else {
                ZERO_PROBABILITY_IWF
            };
        }
    }
}

impl Default for ExactIndex {
    fn default() -> Self {
        Self::new()
    }
}
