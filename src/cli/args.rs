//! Command-line argument parsing for the `symdel` binary.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for
//! unit-testing). Both return a [`ParsedArgs`] value.
//!
//! Usage shapes:
//!
//! ```text
//! symdel [options] <dictionary_file> [misspelled expected ...]
//! symdel [options] -b <misspelling_file> <dictionary_file>
//! ```
//!
//! Check mode corrects each `misspelled` and compares against `expected`.
//! Benchmark mode (`-b`) replays a `wrong<TAB>correct` pair file against
//! the dictionary, reporting accuracy and timing.
//!
//! Bad or unrecognised options return an `Err` whose message begins with
//! `"bad usage: "`.

use anyhow::anyhow;

use crate::cli::constants::{display_level, set_display_level, PROGRAM_NAME, VERSION};
use crate::config::{
    DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_PREFIX_LENGTH, MAX_EDIT_DISTANCE_MAX,
    MAX_EDIT_DISTANCE_MIN,
};

/// Selected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Correct `misspelled expected` pairs and verify each result.
    Check,
    /// Replay a misspelling corpus and report accuracy/timing.
    Bench,
}

/// Complete set of options and filenames produced by the argument loop.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Resolved operation mode.
    pub op_mode: OpMode,
    /// Path to the frequency dictionary.
    pub dictionary_file: String,
    /// `(misspelled, expected)` pairs (check mode).
    pub pairs: Vec<(String, String)>,
    /// Path to the `wrong<TAB>correct` corpus (bench mode).
    pub misspelling_file: Option<String>,
    /// Max edit distance for the dictionary (`-d`, default 2).
    pub max_edit_distance: u32,
    /// Prefix length for delete enumeration (`-p`, default 7).
    pub prefix_length: u32,
    /// 0-based field index of the term column (`--term-column`).
    pub term_column: u32,
    /// 0-based field index of the count column (`--count-column`).
    pub count_column: u32,
    /// When `true`, a --help / --version flag was processed; the caller
    /// should exit 0 without doing any work.
    pub exit_early: bool,
}

/// Parse `std::env::args()` (skipping argv[0]).
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&argv)
}

/// Parse an explicit argument list. Callable from tests without touching
/// `std::env`.
pub fn parse_args_from(argv: &[String]) -> anyhow::Result<ParsedArgs> {
    let mut op_mode = OpMode::Check;
    let mut dictionary_file: Option<String> = None;
    let mut misspelling_file: Option<String> = None;
    let mut positionals: Vec<String> = Vec::new();
    let mut max_edit_distance: u32 = DEFAULT_MAX_EDIT_DISTANCE;
    let mut prefix_length: u32 = DEFAULT_PREFIX_LENGTH;
    let mut term_column: u32 = 0;
    let mut count_column: u32 = 1;
    let mut exit_early = false;
    let mut all_arguments_are_files = false;

    let mut arg_idx = 0usize;
    while arg_idx < argv.len() {
        let argument = &argv[arg_idx];

        if argument.is_empty() {
            arg_idx += 1;
            continue;
        }

        if !all_arguments_are_files && argument.starts_with('-') && argument.len() > 1 {
            match argument.as_str() {
                "--" => all_arguments_are_files = true,
                "-h" | "--help" => {
                    print_usage();
                    exit_early = true;
                }
                "-V" | "--version" => {
                    crate::displayout!("{} v{}\n", PROGRAM_NAME, VERSION);
                    exit_early = true;
                }
                "-v" => set_display_level(display_level() + 1),
                "-q" => set_display_level(display_level().saturating_sub(1)),
                "-b" => {
                    op_mode = OpMode::Bench;
                    arg_idx += 1;
                    let path = argv
                        .get(arg_idx)
                        .ok_or_else(|| anyhow!("bad usage: -b requires a misspelling file"))?;
                    misspelling_file = Some(path.clone());
                }
                "-d" => {
                    arg_idx += 1;
                    let v = argv
                        .get(arg_idx)
                        .ok_or_else(|| anyhow!("bad usage: -d requires a value"))?;
                    max_edit_distance = v
                        .parse()
                        .map_err(|_| anyhow!("bad usage: -d expects a number, got '{}'", v))?;
                    if !(MAX_EDIT_DISTANCE_MIN..=MAX_EDIT_DISTANCE_MAX)
                        .contains(&max_edit_distance)
                    {
                        return Err(anyhow!(
                            "bad usage: -d must be in {}..={}",
                            MAX_EDIT_DISTANCE_MIN,
                            MAX_EDIT_DISTANCE_MAX
                        ));
                    }
                }
                "-p" => {
                    arg_idx += 1;
                    let v = argv
                        .get(arg_idx)
                        .ok_or_else(|| anyhow!("bad usage: -p requires a value"))?;
                    prefix_length = v
                        .parse()
                        .map_err(|_| anyhow!("bad usage: -p expects a number, got '{}'", v))?;
                }
                "--term-column" => {
                    arg_idx += 1;
                    let v = argv
                        .get(arg_idx)
                        .ok_or_else(|| anyhow!("bad usage: --term-column requires a value"))?;
                    term_column = v
                        .parse()
                        .map_err(|_| anyhow!("bad usage: --term-column expects a number"))?;
                }
                "--count-column" => {
                    arg_idx += 1;
                    let v = argv
                        .get(arg_idx)
                        .ok_or_else(|| anyhow!("bad usage: --count-column requires a value"))?;
                    count_column = v
                        .parse()
                        .map_err(|_| anyhow!("bad usage: --count-column expects a number"))?;
                }
                _ => return Err(anyhow!("bad usage: unknown option '{}'", argument)),
            }
            arg_idx += 1;
            continue;
        }

        // Positional: first is the dictionary, the rest are pairs.
        if dictionary_file.is_none() {
            dictionary_file = Some(argument.clone());
        } else {
            positionals.push(argument.clone());
        }
        arg_idx += 1;
    }

    if exit_early {
        return Ok(ParsedArgs {
            op_mode,
            dictionary_file: dictionary_file.unwrap_or_default(),
            pairs: Vec::new(),
            misspelling_file,
            max_edit_distance,
            prefix_length,
            term_column,
            count_column,
            exit_early,
        });
    }

    let dictionary_file =
        dictionary_file.ok_or_else(|| anyhow!("bad usage: missing dictionary file"))?;

    if op_mode == OpMode::Bench && !positionals.is_empty() {
        return Err(anyhow!(
            "bad usage: bench mode takes no misspelled/expected pairs"
        ));
    }
    if positionals.len() % 2 != 0 {
        return Err(anyhow!(
            "bad usage: misspelled/expected arguments must come in pairs"
        ));
    }

    let pairs = positionals
        .chunks(2)
        .map(|c| (c[0].clone(), c[1].clone()))
        .collect();

    Ok(ParsedArgs {
        op_mode,
        dictionary_file,
        pairs,
        misspelling_file,
        max_edit_distance,
        prefix_length,
        term_column,
        count_column,
        exit_early,
    })
}

/// Print usage to stdout.
pub fn print_usage() {
    crate::displayout!(
        "usage: {} [options] <dictionary_file> [misspelled expected ...]\n\
         \n\
         Corrects each <misspelled> term against the dictionary and exits 0\n\
         only if every correction equals its <expected> term.\n\
         \n\
         options:\n\
         \x20 -b FILE          benchmark mode: replay a wrong<TAB>correct file\n\
         \x20 -d N             max edit distance (1..=3, default {})\n\
         \x20 -p N             prefix length (default {})\n\
         \x20 --term-column N  0-based term field in the dictionary (default 0)\n\
         \x20 --count-column N 0-based count field in the dictionary (default 1)\n\
         \x20 -v / -q          more / less verbose\n\
         \x20 -h, --help       this message\n\
         \x20 -V, --version    version\n",
        PROGRAM_NAME,
        DEFAULT_MAX_EDIT_DISTANCE,
        DEFAULT_PREFIX_LENGTH
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn check_mode_with_pairs() {
        let parsed = parse_args_from(&args(&["words.txt", "helo", "hello", "teh", "the"])).unwrap();
        assert_eq!(parsed.op_mode, OpMode::Check);
        assert_eq!(parsed.dictionary_file, "words.txt");
        assert_eq!(
            parsed.pairs,
            vec![
                ("helo".to_string(), "hello".to_string()),
                ("teh".to_string(), "the".to_string())
            ]
        );
    }

    #[test]
    fn bench_mode_takes_a_pair_file() {
        let parsed = parse_args_from(&args(&["-b", "typos.tsv", "words.txt"])).unwrap();
        assert_eq!(parsed.op_mode, OpMode::Bench);
        assert_eq!(parsed.misspelling_file.as_deref(), Some("typos.tsv"));
        assert_eq!(parsed.dictionary_file, "words.txt");
    }

    #[test]
    fn odd_pair_count_is_rejected() {
        let err = parse_args_from(&args(&["words.txt", "helo"])).unwrap_err();
        assert!(err.to_string().starts_with("bad usage:"));
    }

    #[test]
    fn missing_dictionary_is_rejected() {
        let err = parse_args_from(&args(&[])).unwrap_err();
        assert!(err.to_string().contains("missing dictionary"));
    }

    #[test]
    fn distance_option_is_validated() {
        let parsed = parse_args_from(&args(&["-d", "3", "words.txt"])).unwrap();
        assert_eq!(parsed.max_edit_distance, 3);
        assert!(parse_args_from(&args(&["-d", "4", "words.txt"])).is_err());
        assert!(parse_args_from(&args(&["-d", "0", "words.txt"])).is_err());
    }

    #[test]
    fn column_options() {
        let parsed = parse_args_from(&args(&[
            "--term-column",
            "1",
            "--count-column",
            "0",
            "words.txt",
        ]))
        .unwrap();
        assert_eq!(parsed.term_column, 1);
        assert_eq!(parsed.count_column, 0);
    }

    #[test]
    fn double_dash_ends_option_parsing() {
        let parsed = parse_args_from(&args(&["--", "-d", "-wrong", "-right"])).unwrap();
        assert_eq!(parsed.dictionary_file, "-d");
        assert_eq!(
            parsed.pairs,
            vec![("-wrong".to_string(), "-right".to_string())]
        );
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = parse_args_from(&args(&["--frobnicate", "words.txt"])).unwrap_err();
        assert!(err.to_string().contains("unknown option"));
    }
}
