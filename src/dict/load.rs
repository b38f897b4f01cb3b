//! Dictionary building: frequency-file ingest.
//!
//! Input is line-oriented: whitespace-separated fields, with
//! `term_column` and `count_column` selecting (0-based) which field is the
//! term and which the count. Blank lines and `#` comment lines are
//! skipped; lines with too few fields are skipped and counted. Terms are
//! lowercased and clipped to [`MAX_TERM_LEN`](crate::config::MAX_TERM_LEN)
//! before use; a missing, zero, or unparseable count is coerced to 1.
//!
//! For each admitted `(word, frequency)` pair the builder inserts into the
//! exact-match table, then enumerates the word's delete set and records
//! every variant in the delete index pointing back at the word.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::MAX_TERM_LEN;
use crate::deletes::DeleteBuffer;
use crate::dict::{normalize_term, Dictionary, LoadError};
use crate::xxhash::term_hash;

/// Per-pass counters returned by [`Dictionary::load_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Lines read from the file, including skipped ones.
    pub lines: u64,
    /// `(word, frequency)` pairs admitted.
    pub ingested: u64,
    /// Lines skipped as blank, comment, or malformed.
    pub skipped: u64,
}

impl Dictionary {
    /// Stream a frequency file into the dictionary. Additive: repeated
    /// calls accumulate, and a repeated word keeps its maximum observed
    /// frequency. Call [`Dictionary::finalize`] after the last pass.
    ///
    /// On error, everything admitted before the failing line remains
    /// valid and queryable.
    pub fn load_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        term_column: u32,
        count_column: u32,
    ) -> Result<LoadSummary, LoadError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let min_fields = term_column.max(count_column) as usize + 1;

        let mut summary = LoadSummary::default();
        let mut scratch = DeleteBuffer::new();

        for line in reader.lines() {
            let line = line?;
            summary.lines += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                summary.skipped += 1;
                continue;
            }

            let mut term = None;
            let mut count = None;
            for (i, field) in trimmed.split_whitespace().enumerate().take(min_fields) {
                if i == term_column as usize {
                    term = Some(field);
                }
                if i == count_column as usize {
                    count = Some(field);
                }
            }
            let (term, count) = match (term, count) {
                (Some(t), Some(c)) => (t, c),
                _ => {
                    summary.skipped += 1;
                    continue;
                }
            };

            let frequency = count.parse::<u64>().unwrap_or(0).max(1);

            let mut buf = [0u8; MAX_TERM_LEN];
            let len = normalize_term(term, &mut buf);
            if len == 0 {
                summary.skipped += 1;
                continue;
            }

            self.insert_bytes(&buf[..len], frequency, &mut scratch)?;
            summary.ingested += 1;
        }

        self.count_skipped(summary.skipped);
        Ok(summary)
    }

    /// Insert a single `(term, frequency)` pair, normalizing the term the
    /// same way [`Dictionary::load_file`] does. Intended for building
    /// small dictionaries without a file; finalize afterwards.
    pub fn insert(&mut self, term: &str, frequency: u64) -> Result<(), LoadError> {
        let mut buf = [0u8; MAX_TERM_LEN];
        let len = normalize_term(term, &mut buf);
        if len == 0 {
            return Ok(());
        }
        let mut scratch = DeleteBuffer::new();
        self.insert_bytes(&buf[..len], frequency.max(1), &mut scratch)
    }

    /// Admit one normalized word: exact-match table first, then every
    /// delete variant.
    fn insert_bytes(
        &mut self,
        word: &[u8],
        frequency: u64,
        scratch: &mut DeleteBuffer,
    ) -> Result<(), LoadError> {
        let (max_distance, prefix_length) = (self.max_edit_distance(), self.prefix_length());
        let hash = term_hash(word);

        scratch.enumerate(word, max_distance, prefix_length);

        let (arena, exact, deletes) = self.parts_mut();
        exact.insert_max(hash, frequency).map_err(LoadError::from)?;

        let span = arena.intern(word)?;
        for i in 0..scratch.len() {
            deletes.insert(arena, scratch.get(i), span, frequency)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dict(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_tab_and_space_separated_lines() {
        let f = write_dict("hello\t5000\nworld 300\n");
        let mut dict = Dictionary::new(2, 7).unwrap();
        let summary = dict.load_file(f.path(), 0, 1).unwrap();
        assert_eq!(summary.ingested, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(dict.stats().word_count, 2);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let f = write_dict("# frequency list\n\nhello 10\n   \n# trailer\n");
        let mut dict = Dictionary::new(2, 7).unwrap();
        let summary = dict.load_file(f.path(), 0, 1).unwrap();
        assert_eq!(summary.ingested, 1);
        assert_eq!(summary.skipped, 4);
        assert_eq!(dict.stats().skipped_lines, 4);
    }

    #[test]
    fn skips_lines_with_too_few_fields() {
        let f = write_dict("justaword\nok 5\n");
        let mut dict = Dictionary::new(2, 7).unwrap();
        let summary = dict.load_file(f.path(), 0, 1).unwrap();
        assert_eq!(summary.ingested, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn column_selection_is_respected() {
        // count first, term second
        let f = write_dict("5000 hello\n300 world\n");
        let mut dict = Dictionary::new(2, 7).unwrap();
        dict.load_file(f.path(), 1, 0).unwrap();
        dict.finalize();
        assert_eq!(dict.stats().word_count, 2);
        let h = term_hash(b"hello");
        assert_eq!(dict.exact().frequency(h), Some(5000));
    }

    #[test]
    fn zero_and_unparseable_counts_coerce_to_one() {
        let f = write_dict("alpha 0\nbeta x\n");
        let mut dict = Dictionary::new(2, 7).unwrap();
        let summary = dict.load_file(f.path(), 0, 1).unwrap();
        assert_eq!(summary.ingested, 2);
        assert_eq!(dict.exact().frequency(term_hash(b"alpha")), Some(1));
        assert_eq!(dict.exact().frequency(term_hash(b"beta")), Some(1));
    }

    #[test]
    fn repeated_word_keeps_maximum_frequency() {
        let f = write_dict("dup 10\ndup 90\ndup 40\n");
        let mut dict = Dictionary::new(2, 7).unwrap();
        dict.load_file(f.path(), 0, 1).unwrap();
        assert_eq!(dict.stats().word_count, 1);
        assert_eq!(dict.exact().frequency(term_hash(b"dup")), Some(90));
    }

    #[test]
    fn terms_are_lowercased() {
        let f = write_dict("HeLLo 10\n");
        let mut dict = Dictionary::new(2, 7).unwrap();
        dict.load_file(f.path(), 0, 1).unwrap();
        assert_eq!(dict.exact().frequency(term_hash(b"hello")), Some(10));
        assert_eq!(dict.exact().frequency(term_hash(b"HeLLo")), None);
    }

    #[test]
    fn crlf_line_endings_are_handled() {
        let f = write_dict("hello 10\r\nworld 20\r\n");
        let mut dict = Dictionary::new(2, 7).unwrap();
        let summary = dict.load_file(f.path(), 0, 1).unwrap();
        assert_eq!(summary.ingested, 2);
        assert_eq!(dict.exact().frequency(term_hash(b"world")), Some(20));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut dict = Dictionary::new(2, 7).unwrap();
        let err = dict.load_file("/nonexistent/words.txt", 0, 1).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn every_word_gets_delete_entries() {
        let mut dict = Dictionary::new(2, 7).unwrap();
        dict.insert("hello", 100).unwrap();
        // "hello" itself plus its deletions at distance 1 and 2.
        let stats = dict.stats();
        assert_eq!(stats.word_count, 1);
        assert!(stats.entry_count > 1);
        let entry = dict.deletes().get(dict.arena(), b"hello").unwrap();
        assert_eq!(dict.arena().get(entry.sources[0].0), b"hello");
    }

    #[test]
    fn additive_load_passes_accumulate() {
        let f1 = write_dict("hello 10\n");
        let f2 = write_dict("world 20\nhello 50\n");
        let mut dict = Dictionary::new(2, 7).unwrap();
        dict.load_file(f1.path(), 0, 1).unwrap();
        dict.load_file(f2.path(), 0, 1).unwrap();
        dict.finalize();
        assert_eq!(dict.stats().word_count, 2);
        assert_eq!(dict.exact().frequency(term_hash(b"hello")), Some(50));
    }
}
