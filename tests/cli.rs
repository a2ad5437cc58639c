use std::io::Write;
use std::process::{Command, Output};

const TWO_PAIRS: &str = "0,0\n0,1\n10,10\n10,11\n";

fn write_points(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn symnmf(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_symnmf"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn run_on(k: &str, goal: &str, text: &str) -> Output {
    let file = write_points(text);
    symnmf(&[k, goal, file.path().to_str().unwrap()])
}

fn assert_failed(out: &Output, code: i32) {
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(out.status.code(), Some(code), "stderr: {stderr}");
    assert!(out.stdout.is_empty(), "stdout: {:?}", out.stdout);
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert!(stderr.starts_with("error:"), "stderr: {stderr}");
}

fn rows(out: &Output) -> Vec<Vec<f64>> {
    String::from_utf8(out.stdout.clone())
        .unwrap()
        .lines()
        .map(|line| line.split(',').map(|f| f.parse().unwrap()).collect())
        .collect()
}

#[test]
fn test_norm_output() {
    let out = run_on("2", "norm", TWO_PAIRS);
    assert!(out.status.success());

    let text = String::from_utf8(out.stdout.clone()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    for (i, line) in lines.iter().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 4, "line {line}");
        assert_eq!(fields[i], "0.0000");
        for f in &fields {
            let (_, frac) = f.split_once('.').unwrap();
            assert_eq!(frac.len(), 4, "field {f}");
        }
    }

    let w = rows(&out);
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(w[i][j], w[j][i]);
            assert!(w[i][j] >= 0.0);
        }
    }
    // The pairs are ~14 apart, so only in-pair similarity survives rounding.
    assert!(w[0][1] > 0.9);
    assert_eq!(w[0][2], 0.0);
}

#[test]
fn test_symnmf_with_defaults() {
    let out = run_on("2", "symnmf", TWO_PAIRS);
    assert!(out.status.success());

    let h = rows(&out);
    assert_eq!(h.len(), 4);
    assert!(h.iter().all(|row| row.len() == 2));
    assert!(h.iter().flatten().all(|&v| v >= 0.0));

    let labels: Vec<usize> = h
        .iter()
        .map(|row| usize::from(row[1] > row[0]))
        .collect();
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[2], labels[3]);
    assert_ne!(labels[0], labels[2]);
}

#[test]
fn test_seed_flag_is_reproducible() {
    let file = write_points(TWO_PAIRS);
    let path = file.path().to_str().unwrap();
    let a = symnmf(&["2", "symnmf", path, "--seed", "7"]);
    let b = symnmf(&["2", "symnmf", path, "--seed", "7"]);
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn test_k_ignored_by_other_goals() {
    let out = run_on("0", "sym", TWO_PAIRS);
    assert!(out.status.success());
    assert_eq!(rows(&out).len(), 4);
}

#[test]
fn test_bad_goal_is_usage_error() {
    assert_failed(&run_on("2", "bogus", TWO_PAIRS), 2);
}

#[test]
fn test_missing_argument_is_usage_error() {
    assert_failed(&symnmf(&["2", "norm"]), 2);
}

#[test]
fn test_ragged_file() {
    assert_failed(&run_on("2", "norm", "0,0\n0,1\n10\n"), 1);
}

#[test]
fn test_non_numeric_field() {
    assert_failed(&run_on("2", "sym", "0,0\n0,x\n"), 1);
}

#[test]
fn test_k_greater_than_n() {
    assert_failed(&run_on("5", "symnmf", TWO_PAIRS), 1);
}

#[test]
fn test_zero_k_for_symnmf() {
    assert_failed(&run_on("0", "symnmf", TWO_PAIRS), 1);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    assert_failed(&symnmf(&["2", "norm", path.to_str().unwrap()]), 1);
}

#[test]
fn test_help_exits_zero() {
    let out = symnmf(&["--help"]);
    assert!(out.status.success());
    assert!(!out.stdout.is_empty());
}
