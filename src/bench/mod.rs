//! Benchmark driver: replay a misspelling corpus against a dictionary.
//!
//! The corpus is line-oriented `wrong<TAB>correct` (a run of spaces also
//! works as the separator). Every `wrong` term is corrected and compared
//! against `correct`; the driver reports accuracy and mean lookup time,
//! and writes the pairs it failed to match to an errors file for offline
//! inspection.
//!
//! Only the lookups themselves are timed; file parsing and the final
//! comparison bookkeeping stay outside the measured window.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::dict::Dictionary;

/// Default file that unmatched pairs are written to.
pub const ERRORS_FILE: &str = "errors.txt";

/// Outcome of one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    /// Pairs replayed.
    pub total: usize,
    /// Pairs whose correction equalled the expected term.
    pub matched: usize,
    /// Wall time spent inside lookups only.
    pub elapsed: Duration,
}

impl BenchReport {
    /// Fraction of pairs corrected to the expected term.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }

    /// Mean nanoseconds per lookup.
    pub fn ns_per_lookup(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.elapsed.as_nanos() as f64 / self.total as f64
        }
    }
}

/// Replay `pairs_path` against `dict`, writing unmatched pairs to
/// `errors_path`.
///
/// Lines without a separator are skipped. Comparison is done on the
/// lowercased expected term, matching the dictionary's own
/// normalization.
pub fn bench_pairs<P: AsRef<Path>, Q: AsRef<Path>>(
    dict: &Dictionary,
    pairs_path: P,
    errors_path: Q,
) -> io::Result<BenchReport> {
    let reader = BufReader::new(File::open(pairs_path)?);

    let mut pairs: Vec<(String, String)> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (wrong, correct) = match trimmed.split_once('\t') {
            Some((w, c)) => (w.trim(), c.trim()),
            None => match trimmed.split_once(' ') {
                Some((w, c)) => (w.trim(), c.trim()),
                None => continue,
            },
        };
        if wrong.is_empty() || correct.is_empty() {
            continue;
        }
        pairs.push((wrong.to_string(), correct.to_ascii_lowercase()));
    }

    let max_distance = dict.max_edit_distance();
    let mut session = dict.session();
    let mut results: Vec<Option<String>> = Vec::with_capacity(pairs.len());

    let start = Instant::now();
    for (wrong, _) in &pairs {
        results.push(session.correct(wrong, max_distance).map(|s| s.term));
    }
    let elapsed = start.elapsed();

    let mut matched = 0usize;
    let mut errors = BufWriter::new(File::create(errors_path)?);
    for ((wrong, correct), result) in pairs.iter().zip(&results) {
        match result {
            Some(term) if term == correct => matched += 1,
            Some(term) => writeln!(errors, "{}\t{}\t{}", wrong, correct, term)?,
            None => writeln!(errors, "{}\t{}\t-", wrong, correct)?,
        }
    }
    errors.flush()?;

    let report = BenchReport {
        total: pairs.len(),
        matched,
        elapsed,
    };

    crate::displaylevel!(
        2,
        "{} pairs, {} matched ({:.2}%), {:.0} ns/lookup\n",
        report.total,
        report.matched,
        report.accuracy() * 100.0,
        report.ns_per_lookup()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Dictionary {
        let mut d = Dictionary::new(2, 7).unwrap();
        for (term, freq) in [("hello", 5000u64), ("the", 100_000), ("receive", 3000)] {
            d.insert(term, freq).unwrap();
        }
        d.finalize();
        d
    }

    #[test]
    fn reports_accuracy_and_writes_errors() {
        let mut pairs = tempfile::NamedTempFile::new().unwrap();
        writeln!(pairs, "helo\thello").unwrap();
        writeln!(pairs, "teh\tthe").unwrap();
        writeln!(pairs, "recieve\treceive").unwrap();
        writeln!(pairs, "xqzyyy\thello").unwrap();

        let errors = tempfile::NamedTempFile::new().unwrap();
        let d = dict();
        let report = bench_pairs(&d, pairs.path(), errors.path()).unwrap();

        assert_eq!(report.total, 4);
        assert_eq!(report.matched, 3);
        assert!((report.accuracy() - 0.75).abs() < 1e-9);

        let written = std::fs::read_to_string(errors.path()).unwrap();
        assert!(written.contains("xqzyyy\thello\t-"));
        assert_eq!(written.lines().count(), 1);
    }

    #[test]
    fn blank_and_comment_lines_are_ignored() {
        let mut pairs = tempfile::NamedTempFile::new().unwrap();
        writeln!(pairs, "# corpus").unwrap();
        writeln!(pairs).unwrap();
        writeln!(pairs, "helo\thello").unwrap();

        let errors = tempfile::NamedTempFile::new().unwrap();
        let report = bench_pairs(&dict(), pairs.path(), errors.path()).unwrap();
        assert_eq!(report.total, 1);
        assert_eq!(report.matched, 1);
    }

    #[test]
    fn space_separated_pairs_are_accepted() {
        let mut pairs = tempfile::NamedTempFile::new().unwrap();
        writeln!(pairs, "teh the").unwrap();

        let errors = tempfile::NamedTempFile::new().unwrap();
        let report = bench_pairs(&dict(), pairs.path(), errors.path()).unwrap();
        assert_eq!(report.total, 1);
        assert_eq!(report.matched, 1);
    }

    #[test]
    fn missing_corpus_is_an_io_error() {
        let errors = tempfile::NamedTempFile::new().unwrap();
        assert!(bench_pairs(&dict(), "/nonexistent/pairs.tsv", errors.path()).is_err());
    }
}
