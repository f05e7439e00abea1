//! Binary integration tests
//!
//! Runs the built executable with isolated config and data directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_binary(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oddeven"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("XDG_DATA_HOME", dir.join("data"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch oddeven")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn values(lines: &[String], prefix: &str) -> Vec<u64> {
    lines
        .iter()
        .filter_map(|line| line.strip_prefix(prefix))
        .map(|n| n.parse().expect("non-numeric value"))
        .collect()
}

#[test]
fn test_no_args_prints_ten_lines_and_exits_zero() {
    let temp = TempDir::new().unwrap();
    let output = run_binary(temp.path(), &[]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 10);
    assert_eq!(values(&lines, "Odd: "), vec![1, 3, 5, 7, 9]);
    assert_eq!(values(&lines, "Even: "), vec![2, 4, 6, 8, 10]);
}

#[test]
fn test_strict_mode_flag() {
    let temp = TempDir::new().unwrap();
    let output = run_binary(temp.path(), &["--mode", "strict"]);

    assert!(output.status.success());
    let expected: Vec<String> = (1..=10)
        .map(|n| if n % 2 == 0 { format!("Even: {}", n) } else { format!("Odd: {}", n) })
        .collect();
    assert_eq!(stdout_lines(&output), expected);
}

#[test]
fn test_zero_limit_prints_nothing() {
    let temp = TempDir::new().unwrap();
    let output = run_binary(temp.path(), &["--limit", "0"]);

    assert!(output.status.success());
    assert!(stdout_lines(&output).is_empty());
}

#[test]
fn test_project_config_is_picked_up() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".oddeven.yml"), "limit: 4\nmode: strict\n").unwrap();

    let output = run_binary(temp.path(), &[]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["Odd: 1", "Even: 2", "Odd: 3", "Even: 4"]);
}

#[test]
fn test_flags_override_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.yml");
    fs::write(&path, "limit: 4\n").unwrap();

    let output = run_binary(temp.path(), &["-c", path.to_str().unwrap(), "-n", "2", "-m", "strict"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["Odd: 1", "Even: 2"]);
}

#[test]
fn test_invalid_config_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.yml");
    fs::write(&path, "worker-threads: 0\n").unwrap();

    let output = run_binary(temp.path(), &["--config", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stdout_lines(&output).is_empty());
}

#[test]
fn test_verbose_summary_goes_to_stderr() {
    let temp = TempDir::new().unwrap();
    let output = run_binary(temp.path(), &["-v"]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 10);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Finished:"));
    assert!(stderr.contains("10 sent, 10 received"));
}

#[test]
fn test_logs_written_to_data_dir() {
    let temp = TempDir::new().unwrap();
    let output = run_binary(temp.path(), &[]);

    assert!(output.status.success());
    assert!(temp.path().join("data/oddeven/logs/oddeven.log").exists());
}

#[test]
fn test_unwritable_data_dir_still_runs() {
    let temp = TempDir::new().unwrap();
    // A plain file where the data dir should be makes the log directory impossible to create
    let blocked = temp.path().join("blocked");
    fs::write(&blocked, "not a directory").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_oddeven"))
        .current_dir(temp.path())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("XDG_DATA_HOME", &blocked)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch oddeven");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 10);
    assert_eq!(values(&lines, "Odd: "), vec![1, 3, 5, 7, 9]);
}
