//! Binary entry point for the `symdel` command-line tool.
//!
//! Check mode loads a frequency dictionary, corrects each
//! `misspelled expected` pair given on the command line, and exits 0 only
//! if every correction matches. Benchmark mode (`-b`) replays a
//! `wrong<TAB>correct` corpus and reports accuracy and timing, writing
//! unmatched pairs to `errors.txt`.

use symdel::bench::{bench_pairs, ERRORS_FILE};
use symdel::cli::args::{parse_args, OpMode, ParsedArgs};
use symdel::Dictionary;

/// Execute the operation selected by argument parsing.
///
/// Returns the process exit code (0 = success, non-zero = error or
/// mismatch).
fn run(args: ParsedArgs) -> i32 {
    let mut dict = match Dictionary::new(args.max_edit_distance, args.prefix_length) {
        Ok(d) => d,
        Err(e) => {
            symdel::displaylevel!(1, "symdel: {}\n", e);
            return 1;
        }
    };

    let summary = match dict.load_file(&args.dictionary_file, args.term_column, args.count_column)
    {
        Ok(s) => s,
        Err(e) => {
            symdel::displaylevel!(1, "symdel: {}: {}\n", args.dictionary_file, e);
            return 1;
        }
    };
    dict.finalize();

    let stats = dict.stats();
    symdel::displaylevel!(
        3,
        "loaded {} words, {} delete entries ({} of {} lines skipped)\n",
        stats.word_count,
        stats.entry_count,
        summary.skipped,
        summary.lines
    );

    match args.op_mode {
        OpMode::Bench => {
            // Presence enforced by the parser.
            let corpus = args.misspelling_file.as_deref().unwrap_or_default();
            match bench_pairs(&dict, corpus, ERRORS_FILE) {
                Ok(report) => {
                    symdel::displayout!(
                        "accuracy {:.2}% ({}/{}), {:.0} ns/lookup\n",
                        report.accuracy() * 100.0,
                        report.matched,
                        report.total,
                        report.ns_per_lookup()
                    );
                    0
                }
                Err(e) => {
                    symdel::displaylevel!(1, "symdel: {}: {}\n", corpus, e);
                    1
                }
            }
        }
        OpMode::Check => {
            let mut session = dict.session();
            let mut failures = 0u32;
            for (misspelled, expected) in &args.pairs {
                let got = session.correct(misspelled, args.max_edit_distance);
                let expected_norm = expected.to_ascii_lowercase();
                match got {
                    Some(s) if s.term == expected_norm => {
                        symdel::displaylevel!(
                            3,
                            "{} -> {} (distance {})\n",
                            misspelled,
                            s.term,
                            s.distance
                        );
                    }
                    Some(s) => {
                        symdel::displaylevel!(
                            1,
                            "{}: expected {}, got {}\n",
                            misspelled,
                            expected_norm,
                            s.term
                        );
                        failures += 1;
                    }
                    None => {
                        symdel::displaylevel!(
                            1,
                            "{}: expected {}, got no suggestion\n",
                            misspelled,
                            expected_norm
                        );
                        failures += 1;
                    }
                }
            }
            if failures == 0 {
                0
            } else {
                1
            }
        }
    }
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("symdel: {}", e);
            std::process::exit(1);
        }
    };

    // Help / version flags set exit_early; the caller should exit 0.
    if args.exit_early {
        std::process::exit(0);
    }

    std::process::exit(run(args));
}
