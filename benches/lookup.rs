//! Criterion benchmarks for dictionary load and lookup.
//!
//! Run with:
//!   cargo bench --bench lookup
//!
//! The dictionary is synthetic: pronounceable-ish terms generated from a
//! fixed seed so runs are comparable across machines and commits.

use std::io::Write;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use symdel::Dictionary;

/// Deterministic word generator: xorshift over a fixed alphabet.
fn synthetic_words(count: usize) -> Vec<String> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    let mut words = Vec::with_capacity(count);
    for _ in 0..count {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let len = 3 + (state % 9) as usize;
        let mut word = String::with_capacity(len);
        let mut bits = state;
        for _ in 0..len {
            word.push((b'a' + (bits % 26) as u8) as char);
            bits /= 26;
            if bits == 0 {
                bits = state.rotate_left(31);
            }
        }
        words.push(word);
    }
    words
}

fn build_dictionary(words: &[String]) -> Dictionary {
    let mut dict = Dictionary::new(2, 7).unwrap();
    for (i, word) in words.iter().enumerate() {
        dict.insert(word, 1 + (i as u64 % 10_000)).unwrap();
    }
    dict.finalize();
    dict
}

/// Misspell a word by dropping its middle character.
fn misspell(word: &str) -> String {
    if word.len() < 2 {
        return word.to_string();
    }
    let mid = word.len() / 2;
    let mut s = String::with_capacity(word.len() - 1);
    s.push_str(&word[..mid]);
    s.push_str(&word[mid + 1..]);
    s
}

fn bench_lookup(c: &mut Criterion) {
    let words = synthetic_words(50_000);
    let dict = build_dictionary(&words);
    let mut group = c.benchmark_group("lookup");

    // ── Fast path: exact hits ───────────────────────────────────────────────
    {
        let mut session = dict.session();
        let queries: Vec<&String> = words.iter().step_by(97).collect();
        let mut i = 0;
        group.bench_function("exact_hit", |b| {
            b.iter(|| {
                let q = queries[i % queries.len()];
                i += 1;
                session.correct(q, 2)
            })
        });
    }

    // ── Slow path: one-deletion typos ───────────────────────────────────────
    {
        let mut session = dict.session();
        let typos: Vec<String> = words.iter().step_by(97).map(|w| misspell(w)).collect();
        let mut i = 0;
        group.bench_function("single_deletion_typo", |b| {
            b.iter(|| {
                let q = &typos[i % typos.len()];
                i += 1;
                session.correct(q, 2)
            })
        });
    }

    // ── Slow path: misses ───────────────────────────────────────────────────
    {
        let mut session = dict.session();
        group.bench_function("no_candidate_miss", |b| {
            b.iter(|| session.correct("xqzyyyqv", 2))
        });
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    group.sample_size(10);

    for &count in &[10_000usize, 50_000] {
        let words = synthetic_words(count);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for (i, word) in words.iter().enumerate() {
            writeln!(file, "{}\t{}", word, 1 + i % 10_000).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("load_file", count), &count, |b, _| {
            b.iter(|| {
                let mut dict = Dictionary::new(2, 7).unwrap();
                dict.load_file(file.path(), 0, 1).unwrap();
                dict.finalize();
                dict.stats().word_count
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_load);
criterion_main!(benches);
