//! The dictionary: root object owning the arena and both indexes.
//!
//! Lifecycle: created empty with a fixed `(max_edit_distance,
//! prefix_length)`, populated by one or more additive load passes
//! ([`Dictionary::load_file`] / [`Dictionary::insert`]), then sealed by
//! [`Dictionary::finalize`], which derives per-word probability and IWF.
//! After that the dictionary is logically immutable and lookups through
//! any number of concurrent [`LookupSession`]s are lock-free.

use std::fmt;
use std::io;

use crate::arena::{Arena, ArenaFull};
use crate::config::{
    MAX_EDIT_DISTANCE_MAX, MAX_EDIT_DISTANCE_MIN, MAX_TERM_LEN, STRING_ARENA_CAPACITY,
};
use crate::index::{DeleteIndex, ExactIndex, IndexError};
use crate::xxhash::term_hash;

mod load;
mod lookup;

pub use load::LoadSummary;
pub use lookup::{LookupSession, Suggestion};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Configuration error reported by [`Dictionary::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateError {
    /// `max_edit_distance` outside `1..=3`.
    MaxDistanceOutOfRange(u32),
    /// `prefix_length` of zero or beyond [`MAX_TERM_LEN`].
    PrefixLengthInvalid(u32),
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateError::MaxDistanceOutOfRange(d) => {
                write!(f, "max edit distance {} out of range 1..=3", d)
            }
            CreateError::PrefixLengthInvalid(p) => {
                write!(f, "prefix length {} invalid (want 1..={})", p, MAX_TERM_LEN)
            }
        }
    }
}

impl std::error::Error for CreateError {}

/// Error reported by the load path.
///
/// Partial-load state is still valid: whatever was admitted before the
/// failure remains consistent and queryable.
#[derive(Debug)]
pub enum LoadError {
    /// The dictionary file could not be opened or read.
    Io(io::Error),
    /// The string arena ran out of capacity.
    ArenaFull(ArenaFull),
    /// One of the fixed-size tables ran out of free slots.
    IndexFull,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "dictionary I/O error: {}", e),
            LoadError::ArenaFull(e) => e.fmt(f),
            LoadError::IndexFull => f.write_str("dictionary index is full"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::ArenaFull(e) => Some(e),
            LoadError::IndexFull => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<ArenaFull> for LoadError {
    fn from(e: ArenaFull) -> Self {
        LoadError::ArenaFull(e)
    }
}

impl From<IndexError> for LoadError {
    fn from(e: IndexError) -> Self {
        match e {
            IndexError::TableFull => LoadError::IndexFull,
            IndexError::Arena(a) => LoadError::ArenaFull(a),
        }
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Aggregate counters exposed by [`Dictionary::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Distinct words admitted to the exact-match table.
    pub word_count: usize,
    /// Distinct delete variants in the delete index.
    pub entry_count: usize,
    /// Input lines skipped as malformed across all load passes.
    pub skipped_lines: u64,
}

// ── Dictionary ────────────────────────────────────────────────────────────────

/// An immutable-after-load SymSpell dictionary.
pub struct Dictionary {
    max_edit_distance: u32,
    prefix_length: u32,
    arena: Arena,
    exact: ExactIndex,
    deletes: DeleteIndex,
    skipped_lines: u64,
}

impl Dictionary {
    /// Create an empty dictionary.
    ///
    /// `max_edit_distance` must be in `1..=3`; it fixes the delete-index
    /// table size. `prefix_length` bounds how much of each word feeds the
    /// delete enumeration; 7 is the usual choice.
    pub fn new(max_edit_distance: u32, prefix_length: u32) -> Result<Self, CreateError> {
        if !(MAX_EDIT_DISTANCE_MIN..=MAX_EDIT_DISTANCE_MAX).contains(&max_edit_distance) {
            return Err(CreateError::MaxDistanceOutOfRange(max_edit_distance));
        }
        if prefix_length == 0 || prefix_length as usize > MAX_TERM_LEN {
            return Err(CreateError::PrefixLengthInvalid(prefix_length));
        }
        Ok(Dictionary {
            max_edit_distance,
            prefix_length,
            arena: Arena::with_capacity(STRING_ARENA_CAPACITY),
            exact: ExactIndex::new(),
            deletes: DeleteIndex::for_distance(max_edit_distance),
            skipped_lines: 0,
        })
    }

    /// Configured maximum edit distance.
    #[inline]
    pub fn max_edit_distance(&self) -> u32 {
        self.max_edit_distance
    }

    /// Configured prefix length.
    #[inline]
    pub fn prefix_length(&self) -> u32 {
        self.prefix_length
    }

    /// Derive probability and IWF for every word from the accumulated
    /// frequencies. Call once after the last load pass; idempotent, and
    /// required again after any further load.
    pub fn finalize(&mut self) {
        self.exact.derive_weights();
    }

    /// Word, entry, and skip counters.
    pub fn stats(&self) -> Stats {
        Stats {
            word_count: self.exact.len(),
            entry_count: self.deletes.entry_count(),
            skipped_lines: self.skipped_lines,
        }
    }

    /// Probability of the word with this hash, `0.0` when absent.
    ///
    /// `0.0` is ambiguous between "absent" and "present with probability
    /// zero"; [`Dictionary::iwf`] disambiguates (a present zero-probability
    /// word reports the zero-probability IWF, an absent one reports 0.0).
    #[inline]
    pub fn probability(&self, word_hash: u64) -> f32 {
        self.exact.probability(word_hash)
    }

    /// IWF of `word`, `0.0` when absent. The term is normalized the same
    /// way lookup normalizes queries.
    pub fn iwf(&self, word: &str) -> f32 {
        let mut buf = [0u8; MAX_TERM_LEN];
        let len = normalize_term(word, &mut buf);
        if len == 0 {
            return 0.0;
        }
        self.exact.iwf(term_hash(&buf[..len]))
    }

    /// Open a lookup session holding this caller's scratch buffers.
    ///
    /// Sessions borrow the dictionary immutably; any number may be live at
    /// once, one per thread or task, and no lookup takes a lock.
    pub fn session(&self) -> LookupSession<'_> {
        LookupSession::new(self)
    }

    // Internal accessors for the load/lookup submodules.

    #[inline]
    pub(crate) fn arena(&self) -> &Arena {
        &self.arena
    }

    #[inline]
    pub(crate) fn exact(&self) -> &ExactIndex {
        &self.exact
    }

    #[inline]
    pub(crate) fn deletes(&self) -> &DeleteIndex {
        &self.deletes
    }

    #[inline]
    pub(crate) fn parts_mut(&mut self) -> (&mut Arena, &mut ExactIndex, &mut DeleteIndex) {
        (&mut self.arena, &mut self.exact, &mut self.deletes)
    }

    #[inline]
    pub(crate) fn count_skipped(&mut self, n: u64) {
        self.skipped_lines += n;
    }
}

/// Lowercase `term` into `buf`, clipping at [`MAX_TERM_LEN`] bytes.
/// Returns the number of bytes written.
pub(crate) fn normalize_term(term: &str, buf: &mut [u8; MAX_TERM_LEN]) -> usize {
    let bytes = term.as_bytes();
    let len = bytes.len().min(MAX_TERM_LEN);
    for (dst, &src) in buf[..len].iter_mut().zip(bytes) {
        *dst = src.to_ascii_lowercase();
    }
    len
}
