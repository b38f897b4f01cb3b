// e2e/lookup_pipeline.rs — End-to-end lookup behavior against small
// dictionaries written to disk.
//
// Exercises the full load -> finalize -> lookup pipeline: scenario pairs,
// boundary behaviors, ordering guarantees, and concurrent sessions.

use std::io::Write;

use symdel::{Dictionary, Suggestion};

/// Write a frequency file and load it at (D = 2, P = 7).
fn load(entries: &[(&str, u64)]) -> Dictionary {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for (term, freq) in entries {
        writeln!(file, "{}\t{}", term, freq).unwrap();
    }
    let mut dict = Dictionary::new(2, 7).unwrap();
    dict.load_file(file.path(), 0, 1).unwrap();
    dict.finalize();
    dict
}

fn correct(dict: &Dictionary, query: &str) -> Option<Suggestion> {
    dict.session().correct(query, 2)
}

// ── Scenario table ────────────────────────────────────────────────────────────

#[test]
fn exact_word_comes_back_at_distance_zero() {
    let dict = load(&[("hello", 5000), ("held", 200)]);
    let s = correct(&dict, "hello").unwrap();
    assert_eq!(s.term, "hello");
    assert_eq!(s.distance, 0);
    assert_eq!(s.frequency, 5000);
}

#[test]
fn one_deletion_typo_is_corrected() {
    let dict = load(&[("hello", 5000), ("held", 200)]);
    let s = correct(&dict, "helo").unwrap();
    assert_eq!(s.distance, 1);
    // Both "hello" and "held" sit at distance 1; the higher frequency wins
    // under the (distance, frequency) order.
    assert_eq!(s.term, "hello");
}

#[test]
fn transposition_counts_as_one_edit() {
    let dict = load(&[("receive", 3000)]);
    let s = correct(&dict, "recieve").unwrap();
    assert_eq!(s.term, "receive");
    assert_eq!(s.distance, 1);
}

#[test]
fn closer_word_beats_more_frequent_word() {
    let dict = load(&[("spelling", 1000), ("sailing", 800)]);
    let s = correct(&dict, "speling").unwrap();
    assert_eq!(s.term, "spelling");
    assert_eq!(s.distance, 1);
}

#[test]
fn frequency_breaks_equal_distance_ties() {
    let dict = load(&[("the", 100_000), ("tea", 500)]);
    let s = correct(&dict, "teh").unwrap();
    assert_eq!(s.term, "the");
    assert_eq!(s.distance, 1);
}

#[test]
fn nothing_within_distance_returns_none() {
    let dict = load(&[("hello", 5000)]);
    assert!(correct(&dict, "xqzyyy").is_none());
}

// ── Boundary behaviors ────────────────────────────────────────────────────────

#[test]
fn empty_query_yields_no_suggestions() {
    let dict = load(&[("hello", 5000)]);
    assert!(correct(&dict, "").is_none());
    let mut out = Vec::new();
    assert_eq!(dict.session().lookup_into("", 2, &mut out, 8), 0);
}

#[test]
fn single_letter_query_hits_single_letter_entry() {
    let dict = load(&[("a", 1000)]);
    let s = correct(&dict, "a").unwrap();
    assert_eq!(s.term, "a");
    assert_eq!(s.distance, 0);
}

#[test]
fn short_queries_are_limited_to_one_edit() {
    // "ap" -> "apple" needs three insertions; even at distance 2 it would
    // be out of reach, but check a real distance-2 case: "apl" -> "apple".
    let dict = load(&[("apple", 1000)]);
    assert!(correct(&dict, "apl").is_none(), "distance 2 blocked at len 3");
    // A distance-1 correction still lands.
    let s = correct(&dict, "aple").unwrap();
    assert_eq!(s.term, "apple");
    assert_eq!(s.distance, 1);
}

#[test]
fn oversized_queries_are_clipped_not_crashed() {
    let dict = load(&[("hello", 5000)]);
    let long = "h".repeat(4096);
    assert!(correct(&dict, &long).is_none());
}

// ── Properties ────────────────────────────────────────────────────────────────

#[test]
fn every_dictionary_word_corrects_to_itself() {
    let words: &[(&str, u64)] = &[
        ("hello", 5000),
        ("held", 200),
        ("the", 100_000),
        ("tea", 500),
        ("receive", 3000),
        ("spelling", 1000),
        ("a", 17),
    ];
    let dict = load(words);
    let mut session = dict.session();
    for (word, freq) in words {
        let s = session.correct(word, 2).unwrap();
        assert_eq!(&s.term, word);
        assert_eq!(s.distance, 0);
        assert_eq!(s.frequency, *freq);
    }
}

#[test]
fn suggestions_never_exceed_the_effective_distance() {
    let dict = load(&[("hello", 5000), ("help", 300), ("held", 200)]);
    let mut out = Vec::new();
    let mut session = dict.session();
    for query in ["helo", "hlep", "hxlp", "banana"] {
        session.lookup_into(query, 2, &mut out, 16);
        for s in &out {
            assert!(s.distance <= 2, "{} -> {} at {}", query, s.term, s.distance);
        }
    }
}

#[test]
fn repeat_lookups_are_stable() {
    let dict = load(&[("hello", 5000), ("held", 200), ("help", 300)]);
    let mut session = dict.session();
    let a = session.correct("helo", 2);
    let b = session.correct("helo", 2);
    assert_eq!(a, b);
}

#[test]
fn sorted_output_respects_the_total_order() {
    let dict = load(&[
        ("spelling", 1000),
        ("spewing", 1000),
        ("sailing", 800),
        ("spilling", 900),
    ]);
    let mut out = Vec::new();
    let n = dict.session().lookup_into("speling", 2, &mut out, 16);
    assert!(n >= 2);
    for pair in out.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let ordered = a.distance < b.distance
            || (a.distance == b.distance && a.frequency > b.frequency)
            || (a.distance == b.distance && a.frequency == b.frequency && a.term <= b.term);
        assert!(ordered, "{:?} must precede {:?}", a, b);
    }
}

// ── Concurrency ───────────────────────────────────────────────────────────────

#[test]
fn concurrent_sessions_agree() {
    let dict = load(&[
        ("hello", 5000),
        ("held", 200),
        ("the", 100_000),
        ("receive", 3000),
        ("spelling", 1000),
    ]);
    let baseline: Vec<Option<String>> = {
        let mut s = dict.session();
        ["helo", "teh", "recieve", "speling", "zzz"]
            .iter()
            .map(|q| s.correct(q, 2).map(|r| r.term))
            .collect()
    };

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let mut session = dict.session();
                for _ in 0..50 {
                    let got: Vec<Option<String>> = ["helo", "teh", "recieve", "speling", "zzz"]
                        .iter()
                        .map(|q| session.correct(q, 2).map(|r| r.term))
                        .collect();
                    assert_eq!(got, baseline);
                }
            });
        }
    });
}
