// e2e/cli_integration.rs — CLI integration tests.
//
// Tests the `symdel` binary as a black-box tool using
// std::process::Command: argument parsing, check-mode exit codes, bench
// mode output and errors file, version/help flags.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Locate the `symdel` binary produced by Cargo.
fn symdel_bin() -> PathBuf {
    // CARGO_BIN_EXE_symdel is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_symdel") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("symdel");
    p
}

/// Create a TempDir containing a small frequency dictionary.
fn make_dictionary() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("words.txt");
    let mut f = fs::File::create(&path).unwrap();
    writeln!(f, "the\t100000").unwrap();
    writeln!(f, "hello\t5000").unwrap();
    writeln!(f, "receive\t3000").unwrap();
    writeln!(f, "spelling\t1000").unwrap();
    writeln!(f, "tea\t500").unwrap();
    (dir, path)
}

// ── 1. Check mode ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_check_mode_all_pairs_match() {
    let (_dir, dict) = make_dictionary();
    let status = Command::new(symdel_bin())
        .args([
            dict.to_str().unwrap(),
            "teh",
            "the",
            "recieve",
            "receive",
            "speling",
            "spelling",
        ])
        .status()
        .expect("failed to run symdel");
    assert!(status.success(), "matching pairs should exit 0");
}

#[test]
fn test_cli_check_mode_mismatch_exits_nonzero() {
    let (_dir, dict) = make_dictionary();
    let status = Command::new(symdel_bin())
        .args([dict.to_str().unwrap(), "teh", "tea"])
        .status()
        .expect("failed to run symdel");
    assert!(
        !status.success(),
        "teh corrects to the, not tea; must exit non-zero"
    );
}

#[test]
fn test_cli_check_mode_no_pairs_just_loads() {
    let (_dir, dict) = make_dictionary();
    let status = Command::new(symdel_bin())
        .arg(dict.to_str().unwrap())
        .status()
        .expect("failed to run symdel");
    assert!(status.success(), "a bare dictionary load should exit 0");
}

#[test]
fn test_cli_missing_dictionary_exits_nonzero() {
    let status = Command::new(symdel_bin())
        .arg("/nonexistent/words.txt")
        .status()
        .expect("failed to run symdel");
    assert!(!status.success());
}

// ── 2. Bench mode ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_bench_mode_reports_accuracy_and_writes_errors() {
    let (dir, dict) = make_dictionary();
    let corpus = dir.path().join("typos.tsv");
    let mut f = fs::File::create(&corpus).unwrap();
    writeln!(f, "teh\tthe").unwrap();
    writeln!(f, "recieve\treceive").unwrap();
    writeln!(f, "xqzyyy\thello").unwrap();

    let output = Command::new(symdel_bin())
        .args(["-b", corpus.to_str().unwrap(), dict.to_str().unwrap()])
        .current_dir(dir.path())
        .output()
        .expect("failed to run symdel -b");
    assert!(output.status.success(), "bench mode should exit 0");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("accuracy"),
        "bench output should report accuracy; got: {stdout}"
    );

    let errors = fs::read_to_string(dir.path().join("errors.txt")).unwrap();
    assert!(
        errors.contains("xqzyyy"),
        "unmatched pair should land in errors.txt; got: {errors}"
    );
}

// ── 3. --version ──────────────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let output = Command::new(symdel_bin())
        .arg("--version")
        .output()
        .expect("failed to run symdel --version");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("symdel"),
        "--version stdout should name the program; got: {stdout}"
    );
}

// ── 4. --help ─────────────────────────────────────────────────────────────────

#[test]
fn test_cli_help() {
    let output = Command::new(symdel_bin())
        .arg("--help")
        .output()
        .expect("failed to run symdel --help");
    assert!(output.status.success());
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        combined.to_lowercase().contains("usage"),
        "--help output should contain 'usage'; got: {combined}"
    );
}

// ── 5. Bad usage ──────────────────────────────────────────────────────────────

#[test]
fn test_cli_odd_pair_count_is_bad_usage() {
    let (_dir, dict) = make_dictionary();
    let output = Command::new(symdel_bin())
        .args([dict.to_str().unwrap(), "teh"])
        .output()
        .expect("failed to run symdel");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("bad usage"),
        "odd pair count should report bad usage; got: {stderr}"
    );
}

#[test]
fn test_cli_invalid_distance_is_bad_usage() {
    let (_dir, dict) = make_dictionary();
    let output = Command::new(symdel_bin())
        .args(["-d", "9", dict.to_str().unwrap()])
        .output()
        .expect("failed to run symdel");
    assert!(!output.status.success());
}
