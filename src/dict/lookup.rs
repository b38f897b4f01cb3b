//! Lookup engine: fast path, slow path, candidate ranking.
//!
//! The fast path is a single hash probe of the exact-match table. The
//! slow path enumerates the query's delete set, probes the delete index
//! for each variant, scores the gathered candidates by bounded
//! Damerau–Levenshtein distance, and picks a winner.
//!
//! All mutable state lives in the caller's [`LookupSession`], never in the
//! dictionary, so concurrent lookups from different sessions share nothing
//! but immutable tables. One session per thread or task; no locks.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::arena::Span;
use crate::config::{MAX_TERM_LEN, SHORT_WORD_LEN};
use crate::deletes::DeleteBuffer;
use crate::dict::{normalize_term, Dictionary};
use crate::distance::damerau_levenshtein_bounded;
use crate::xxhash::{term_hash, xxh3_oneshot};

/// A candidate correction.
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// The dictionary word.
    pub term: String,
    /// Damerau–Levenshtein distance from the query.
    pub distance: i32,
    /// Frequency recorded at load time.
    pub frequency: u64,
    /// `frequency / max_frequency`, derived at finalize.
    pub probability: f32,
    /// `|ln probability|`, derived at finalize.
    pub iwf: f32,
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term
            && self.distance == other.distance
            && self.frequency == other.frequency
    }
}

impl Eq for Suggestion {}

/// Total order: distance ascending, then frequency descending, then term
/// ascending. Lexicographic term breaks all remaining ties, so sorted
/// output is deterministic.
impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.frequency.cmp(&self.frequency))
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Candidate {
    word: Span,
    frequency: u64,
    distance: i32,
}

/// Per-caller lookup state: the normalized-query buffer, the delete
/// enumeration buffer, and the candidate scratch.
///
/// Obtained from [`Dictionary::session`]. Reuse one session across many
/// lookups to avoid re-allocating scratch; create one per thread for
/// concurrent querying.
pub struct LookupSession<'d> {
    dict: &'d Dictionary,
    deletes: DeleteBuffer,
    candidates: Vec<Candidate>,
    seen: HashSet<u64>,
    query: [u8; MAX_TERM_LEN],
}

impl<'d> LookupSession<'d> {
    pub(crate) fn new(dict: &'d Dictionary) -> Self {
        LookupSession {
            dict,
            deletes: DeleteBuffer::new(),
            candidates: Vec::with_capacity(64),
            seen: HashSet::with_capacity(64),
            query: [0u8; MAX_TERM_LEN],
        }
    }

    /// The dictionary this session reads.
    #[inline]
    pub fn dictionary(&self) -> &'d Dictionary {
        self.dict
    }

    /// Correct `term`, returning the single best suggestion.
    ///
    /// The winner is the candidate with the smallest distance, ties broken
    /// by higher frequency. An exact match short-circuits at distance 0.
    /// `None` when nothing lies within the effective distance.
    pub fn correct(&mut self, term: &str, max_distance: u32) -> Option<Suggestion> {
        let qlen = self.normalize(term);
        if qlen == 0 {
            return None;
        }
        if let Some(hit) = self.exact_hit(qlen) {
            return Some(hit);
        }

        self.gather(qlen, max_distance);

        // Single-pass reduction: smaller distance wins, then larger
        // frequency. Iteration order over the delete index is fixed for a
        // fixed dictionary, so the result is deterministic.
        let mut best: Option<usize> = None;
        for (i, c) in self.candidates.iter().enumerate() {
            best = match best {
                None => Some(i),
                Some(b) => {
                    let bc = &self.candidates[b];
                    if c.distance < bc.distance
                        || (c.distance == bc.distance && c.frequency > bc.frequency)
                    {
                        Some(i)
                    } else {
                        Some(b)
                    }
                }
            };
        }
        best.map(|i| self.emit(&self.candidates[i]))
    }

    /// Sorted lookup: collect every candidate within the effective
    /// distance, order by `(distance asc, frequency desc, term asc)`, and
    /// append up to `max_suggestions` of them to `out`. Returns how many
    /// were appended. `out` is cleared first.
    ///
    /// An exact match returns just the distance-0 suggestion.
    pub fn lookup_into(
        &mut self,
        term: &str,
        max_distance: u32,
        out: &mut Vec<Suggestion>,
        max_suggestions: usize,
    ) -> usize {
        out.clear();
        if max_suggestions == 0 {
            return 0;
        }
        let qlen = self.normalize(term);
        if qlen == 0 {
            return 0;
        }
        if let Some(hit) = self.exact_hit(qlen) {
            out.push(hit);
            return 1;
        }

        self.gather(qlen, max_distance);

        for c in &self.candidates {
            out.push(self.emit(c));
        }
        out.sort();
        out.truncate(max_suggestions);
        out.len()
    }

    /// Lowercase and clip the query into the session buffer.
    fn normalize(&mut self, term: &str) -> usize {
        normalize_term(term, &mut self.query)
    }

    /// Fast path: one probe of the exact-match table.
    fn exact_hit(&self, qlen: usize) -> Option<Suggestion> {
        let q = &self.query[..qlen];
        let hash = term_hash(q);
        let frequency = self.dict.exact().frequency(hash)?;
        Some(Suggestion {
            term: String::from_utf8_lossy(q).into_owned(),
            distance: 0,
            frequency,
            probability: self.dict.exact().probability(hash),
            iwf: self.dict.exact().iwf(hash),
        })
    }

    /// Slow path: fill the candidate scratch with every dictionary word
    /// within the effective distance of the query.
    fn gather(&mut self, qlen: usize, max_distance: u32) {
        let mut effective = max_distance.min(self.dict.max_edit_distance());
        // Short-word rule: tiny queries explode the delete lattice and
        // gain nothing from distance 2.
        if qlen <= SHORT_WORD_LEN {
            effective = effective.min(1);
        }

        self.candidates.clear();
        self.seen.clear();

        self.deletes
            .enumerate(&self.query[..qlen], effective, self.dict.prefix_length());

        let arena = self.dict.arena();
        let query = &self.query[..qlen];
        for vi in 0..self.deletes.len() {
            let variant = self.deletes.get(vi);
            let entry = match self.dict.deletes().get(arena, variant) {
                Some(e) => e,
                None => continue,
            };
            for &(word, frequency) in &entry.sources {
                let bytes = arena.get(word);
                if !self.seen.insert(xxh3_oneshot(bytes)) {
                    continue;
                }
                let distance = damerau_levenshtein_bounded(query, bytes, effective as i32);
                if distance <= effective as i32 {
                    self.candidates.push(Candidate {
                        word,
                        frequency,
                        distance,
                    });
                }
            }
        }
    }

    /// Materialize a candidate, filling probability and IWF from the
    /// exact-match table.
    fn emit(&self, c: &Candidate) -> Suggestion {
        let bytes = self.dict.arena().get(c.word);
        let hash = term_hash(bytes);
        Suggestion {
            term: String::from_utf8_lossy(bytes).into_owned(),
            distance: c.distance,
            frequency: c.frequency,
            probability: self.dict.exact().probability(hash),
            iwf: self.dict.exact().iwf(hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(entries: &[(&str, u64)]) -> Dictionary {
        let mut d = Dictionary::new(2, 7).unwrap();
        for &(term, freq) in entries {
            d.insert(term, freq).unwrap();
        }
        d.finalize();
        d
    }

    #[test]
    fn exact_match_is_distance_zero() {
        let d = dict(&[("hello", 5000), ("held", 200)]);
        let mut s = d.session();
        let hit = s.correct("hello", 2).unwrap();
        assert_eq!(hit.term, "hello");
        assert_eq!(hit.distance, 0);
        assert_eq!(hit.frequency, 5000);
        assert_eq!(hit.probability, 1.0);
    }

    #[test]
    fn query_is_normalized_before_the_fast_path() {
        let d = dict(&[("hello", 5000)]);
        let mut s = d.session();
        let hit = s.correct("HELLO", 2).unwrap();
        assert_eq!(hit.distance, 0);
    }

    #[test]
    fn empty_query_returns_nothing() {
        let d = dict(&[("hello", 5000)]);
        let mut s = d.session();
        assert!(s.correct("", 2).is_none());
        let mut out = Vec::new();
        assert_eq!(s.lookup_into("", 2, &mut out, 8), 0);
    }

    #[test]
    fn short_word_rule_clamps_distance_to_one() {
        // "held" is distance 2 from "hl" — but |query| <= 4 clamps the
        // effective distance to 1, so nothing within reach.
        let d = dict(&[("held", 200)]);
        let mut s = d.session();
        assert!(s.correct("hl", 2).is_none());
        // Distance 1 still works for short queries.
        assert_eq!(s.correct("hel", 2).unwrap().term, "held");
    }

    #[test]
    fn distance_beats_frequency() {
        // "helo": distance 1 to "held", distance 1 to "hello"? No:
        // helo -> hello is one insertion (distance 1), helo -> held is one
        // substitution (distance 1); frequency decides.
        let d = dict(&[("hello", 5000), ("held", 200)]);
        let mut s = d.session();
        let hit = s.correct("helo", 2).unwrap();
        assert_eq!(hit.distance, 1);
        assert_eq!(hit.term, "hello");
    }

    #[test]
    fn no_candidates_returns_none() {
        let d = dict(&[("hello", 5000)]);
        let mut s = d.session();
        assert!(s.correct("xqzyyy", 2).is_none());
    }

    #[test]
    fn requested_distance_is_clamped_to_dictionary_limit() {
        let d = dict(&[("spelling", 1000)]);
        let mut s = d.session();
        // Request far beyond the configured 2; still capped at 2.
        assert!(s.correct("spng", 9).is_none());
        let hit = s.correct("speling", 9).unwrap();
        assert_eq!(hit.distance, 1);
    }

    #[test]
    fn sorted_mode_respects_the_total_order() {
        let d = dict(&[("spelling", 1000), ("sailing", 800), ("spewing", 1000)]);
        let mut s = d.session();
        let mut out = Vec::new();
        let n = s.lookup_into("speling", 2, &mut out, 8);
        assert!(n >= 2);
        for pair in out.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(out[0].term, "spelling");
    }

    #[test]
    fn sorted_mode_truncates_to_max_suggestions() {
        let d = dict(&[("spelling", 1000), ("sailing", 800), ("spewing", 900)]);
        let mut s = d.session();
        let mut out = Vec::new();
        let n = s.lookup_into("speling", 2, &mut out, 1);
        assert_eq!(n, 1);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn consecutive_lookups_are_identical() {
        let d = dict(&[("hello", 5000), ("held", 200), ("help", 300)]);
        let mut s = d.session();
        let first = s.correct("helo", 2);
        let second = s.correct("helo", 2);
        assert_eq!(first, second);
    }

    #[test]
    fn lookups_are_independent_of_prior_queries() {
        let d = dict(&[("hello", 5000), ("world", 100)]);
        let mut s1 = d.session();
        let mut s2 = d.session();
        let _ = s1.correct("wrld", 2);
        let _ = s1.correct("xyz", 2);
        assert_eq!(s1.correct("helo", 2), s2.correct("helo", 2));
    }

    #[test]
    fn overlong_query_is_clipped_before_lookup() {
        let d = dict(&[("hello", 5000)]);
        let mut s = d.session();
        let long = format!("hello{}", "x".repeat(MAX_TERM_LEN));
        // Clipped to MAX_TERM_LEN bytes; no panic, no match.
        assert!(s.correct(&long, 2).is_none());
    }

    #[test]
    fn suggestion_carries_probability_and_iwf() {
        let d = dict(&[("hello", 5000), ("held", 200)]);
        let mut s = d.session();
        let hit = s.correct("hel", 2).unwrap();
        assert_eq!(hit.term, "held");
        let expected_p = 200.0 / 5000.0;
        assert!((hit.probability - expected_p).abs() < 1e-6);
        assert!((hit.iwf - expected_p.ln().abs()).abs() < 1e-5);
    }
}
