// config.rs — Compile-time tunables for the engine.
//
// All table sizes are fixed at dictionary creation; nothing here is a
// runtime knob except through `Dictionary::new(max_edit_distance,
// prefix_length)`.

/// Longest term the engine stores or compares. Longer inputs are clipped
/// at ingest and at lookup; distance math treats anything beyond this as
/// over-budget.
pub const MAX_TERM_LEN: usize = 128;

/// Upper bound on the number of delete variants a single enumeration may
/// produce. 10,000 is comfortably above the worst case for
/// `max_edit_distance <= 2, prefix_length = 7`.
pub const MAX_DELETE_QUEUE: usize = 10_000;

/// Slot count of the exact-match table. Prime, sized to hold ~250 K words
/// at <= 50 % load.
pub const EXACT_TABLE_SLOTS: usize = 524_287;

/// Delete-index slot counts keyed by max edit distance. All prime.
pub const DELETE_TABLE_SLOTS_D1: usize = 524_287;
pub const DELETE_TABLE_SLOTS_D2: usize = 4_194_301;
pub const DELETE_TABLE_SLOTS_D3: usize = 33_554_393;

/// Load factor above which the delete index emits a one-shot warning.
/// Exceeding it degrades probe lengths but is not an error.
pub const DELETE_TABLE_WARN_LOAD: f64 = 0.75;

/// String-arena capacity: every dictionary word and every delete-variant
/// key is interned here exactly once. Exhaustion is a load-time error.
pub const STRING_ARENA_CAPACITY: usize = 128 << 20;

/// Inclusive range of accepted `max_edit_distance` values.
pub const MAX_EDIT_DISTANCE_MIN: u32 = 1;
pub const MAX_EDIT_DISTANCE_MAX: u32 = 3;

/// Defaults used by the CLI when `-d` / `-p` are not given.
pub const DEFAULT_MAX_EDIT_DISTANCE: u32 = 2;
pub const DEFAULT_PREFIX_LENGTH: u32 = 7;

/// Queries of this length or shorter are corrected with an effective
/// edit distance of 1 regardless of what the caller requested. Bounds the
/// delete-lattice blowup on short words without hurting accuracy.
pub const SHORT_WORD_LEN: usize = 4;

/// IWF assigned to a word whose probability rounds to zero.
pub const ZERO_PROBABILITY_IWF: f32 = 99.0;
