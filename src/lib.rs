// symdel — symmetric-delete spell correction

pub mod arena;
pub mod bench;
pub mod cli;
pub mod config;
pub mod deletes;
pub mod dict;
pub mod distance;
pub mod index;
pub mod xxhash;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports for the most common API entry points.
// ─────────────────────────────────────────────────────────────────────────────

/// The dictionary: build with [`Dictionary::new`] + [`Dictionary::load_file`],
/// seal with [`Dictionary::finalize`], query through [`Dictionary::session`].
pub use dict::Dictionary;

/// Per-caller lookup handle; one per thread for concurrent querying.
pub use dict::LookupSession;

/// A candidate correction with distance, frequency, probability, and IWF.
pub use dict::Suggestion;

/// Configuration error from [`Dictionary::new`].
pub use dict::CreateError;

/// Load-boundary error: I/O, arena exhaustion, or a full table.
pub use dict::LoadError;

/// Per-pass ingest counters from [`Dictionary::load_file`].
pub use dict::LoadSummary;

/// Word/entry/skip counters from [`Dictionary::stats`].
pub use dict::Stats;

/// Bounded Damerau–Levenshtein distance over byte strings.
pub use distance::damerau_levenshtein_bounded;

/// One-shot 64-bit XXH3 of a term, as used by the exact-match table.
pub use xxhash::term_hash;
