use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zip-range-reduce"));
    // Keep the caller's environment from leaking into the configuration
    for (key, _) in std::env::vars() {
        if key.starts_with("ZIP_RANGE_REDUCE_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

fn write_input(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("ranges.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn shows_help() {
    command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--unflagged"));
}

#[test]
fn reduces_to_file_and_console() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "10000,10005\n10002,10009\n60001,60001\n60003,60005\n");
    let output = dir.path().join("reduced.csv");
    command()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout("[10000,10009]\n[60001,60001]\n[60003,60005]\n");
    assert_eq!(fs::read_to_string(&output).unwrap(),
        "10000,10009\n60001,60001\n60003,60005\n");
}

#[test]
fn skips_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "abc,5\n99999,99999\n0,500\n");
    command()
        .arg(&input)
        .assert()
        .success()
        .stdout("[99999,99999]\n")
        .stderr(predicate::str::contains("skipping malformed range"));
}

#[test]
fn strict_mode_fails_on_malformed_line() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "1,5\n1,2,3\n");
    command()
        .arg(&input)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn emits_unflagged_ranges() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "3,4\n");
    command()
        .args(["--min", "1", "--max", "10", "--unflagged"])
        .arg(&input)
        .assert()
        .success()
        .stdout("[1,2]\n[5,10]\n");
}

#[test]
fn reads_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "8,12\n");
    let config = dir.path().join("reduce.toml");
    fs::write(&config, format!("input = {:?}\nmin = 5\nmax = 20\nemit = \"unflagged\"\n",
        input.display().to_string())).unwrap();
    command()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("[5,7]\n[13,20]\n");
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    command()
        .arg(dir.path().join("absent.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to open input file"));
}

#[test]
fn inverted_domain_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "1,2\n");
    command()
        .args(["--min", "10", "--max", "5", "--quiet"])
        .arg(&input)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("exceeds maximum"));
}

#[test]
fn false_flagged_value_from_env() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "3,4\n");
    command()
        .env("ZIP_RANGE_REDUCE_FLAGGED_VALUE", "false")
        .args(["--min", "1", "--max", "10"])
        .arg(&input)
        .assert()
        .success()
        .stdout("[3,4]\n");
    command()
        .env("ZIP_RANGE_REDUCE_FLAGGED_VALUE", "false")
        .args(["--min", "1", "--max", "10", "--unflagged"])
        .arg(&input)
        .assert()
        .success()
        .stdout("[1,2]\n[5,10]\n");
}
