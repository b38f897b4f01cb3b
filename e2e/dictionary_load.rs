// e2e/dictionary_load.rs — Dictionary file ingest, derived weights, and
// the stats/probability/IWF accessors, tested black-box through the
// public API.

use std::io::Write;

use symdel::{term_hash, Dictionary, LoadError};

fn write_dict(content: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f
}

#[test]
fn typical_frequency_file_round_trips() {
    let f = write_dict(
        "# top words\n\
         the\t100000\n\
         hello 5000\n\
         tea   500\n\
         \n\
         held\t200\n",
    );
    let mut dict = Dictionary::new(2, 7).unwrap();
    let summary = dict.load_file(f.path(), 0, 1).unwrap();
    dict.finalize();

    assert_eq!(summary.ingested, 4);
    assert_eq!(summary.skipped, 2); // comment + blank

    let stats = dict.stats();
    assert_eq!(stats.word_count, 4);
    assert!(stats.entry_count > stats.word_count);
    assert_eq!(stats.skipped_lines, 2);
}

#[test]
fn exact_probe_returns_each_words_own_frequency() {
    let f = write_dict("alpha 10\nbeta 20\ngamma 30\n");
    let mut dict = Dictionary::new(2, 7).unwrap();
    dict.load_file(f.path(), 0, 1).unwrap();
    dict.finalize();

    let mut session = dict.session();
    for (word, freq) in [("alpha", 10), ("beta", 20), ("gamma", 30)] {
        let s = session.correct(word, 0).unwrap();
        assert_eq!(s.frequency, freq);
        assert_eq!(s.distance, 0);
    }
}

#[test]
fn probability_and_iwf_derive_from_the_maximum_frequency() {
    let f = write_dict("common 1000\nmiddling 100\nrare 1\n");
    let mut dict = Dictionary::new(2, 7).unwrap();
    dict.load_file(f.path(), 0, 1).unwrap();
    dict.finalize();

    assert_eq!(dict.probability(term_hash(b"common")), 1.0);
    assert_eq!(dict.iwf("common"), 0.0);

    let p = dict.probability(term_hash(b"middling"));
    assert!((p - 0.1).abs() < 1e-6);
    assert!((dict.iwf("middling") - p.ln().abs()).abs() < 1e-5);

    let p = dict.probability(term_hash(b"rare"));
    assert!((p - 0.001).abs() < 1e-7);

    // Absent words report 0.0 from both accessors.
    assert_eq!(dict.probability(term_hash(b"absent")), 0.0);
    assert_eq!(dict.iwf("absent"), 0.0);
}

#[test]
fn duplicate_terms_keep_their_maximum_frequency() {
    let f = write_dict("word 10\nword 500\nword 90\n");
    let mut dict = Dictionary::new(2, 7).unwrap();
    dict.load_file(f.path(), 0, 1).unwrap();
    dict.finalize();

    let s = dict.session().correct("word", 2).unwrap();
    assert_eq!(s.frequency, 500);
    assert_eq!(dict.stats().word_count, 1);
}

#[test]
fn column_selection_reads_reversed_files() {
    let f = write_dict("100000 the\n5000 hello\n");
    let mut dict = Dictionary::new(2, 7).unwrap();
    dict.load_file(f.path(), 1, 0).unwrap();
    dict.finalize();

    let s = dict.session().correct("teh", 2).unwrap();
    assert_eq!(s.term, "the");
    assert_eq!(s.frequency, 100_000);
}

#[test]
fn mixed_case_input_is_normalized_at_load_and_query() {
    let f = write_dict("Hello 5000\n");
    let mut dict = Dictionary::new(2, 7).unwrap();
    dict.load_file(f.path(), 0, 1).unwrap();
    dict.finalize();

    let s = dict.session().correct("HELLO", 2).unwrap();
    assert_eq!(s.term, "hello");
    assert_eq!(s.distance, 0);
}

#[test]
fn additive_passes_then_single_finalize() {
    let f1 = write_dict("hello 5000\n");
    let f2 = write_dict("world 8000\n");
    let mut dict = Dictionary::new(2, 7).unwrap();
    dict.load_file(f1.path(), 0, 1).unwrap();
    dict.load_file(f2.path(), 0, 1).unwrap();
    dict.finalize();

    assert_eq!(dict.stats().word_count, 2);
    // Probabilities normalize against the max across both passes.
    assert_eq!(dict.probability(term_hash(b"world")), 1.0);
    let p = dict.probability(term_hash(b"hello"));
    assert!((p - 0.625).abs() < 1e-6);
}

#[test]
fn missing_file_reports_io_error_and_leaves_dictionary_usable() {
    let mut dict = Dictionary::new(2, 7).unwrap();
    dict.insert("hello", 100).unwrap();

    let err = dict.load_file("/nonexistent/words.txt", 0, 1).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));

    // Whatever was admitted before the failure still answers.
    dict.finalize();
    assert_eq!(dict.session().correct("helo", 2).unwrap().term, "hello");
}

#[test]
fn distance_one_dictionary_still_corrects() {
    let f = write_dict("spelling 1000\n");
    let mut dict = Dictionary::new(1, 7).unwrap();
    dict.load_file(f.path(), 0, 1).unwrap();
    dict.finalize();

    assert_eq!(dict.max_edit_distance(), 1);
    let s = dict.session().correct("speling", 2).unwrap();
    assert_eq!(s.distance, 1);
    // Distance-2 typos are out of reach for a D=1 dictionary.
    assert!(dict.session().correct("spelng", 2).is_none());
}

#[test]
fn create_rejects_bad_configuration() {
    assert!(Dictionary::new(0, 7).is_err());
    assert!(Dictionary::new(4, 7).is_err());
    assert!(Dictionary::new(2, 0).is_err());
}
