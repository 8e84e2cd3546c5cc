//! CLI integration tests
//!
//! Runs the segbuf binary against stdin and temp files.

use std::io::Write;
use std::process::{Command, Stdio};

fn segbuf() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_segbuf"));
    cmd.env_remove("RUST_LOG").env_remove("SEGBUF_CONFIG");
    cmd
}

fn run_with_stdin(args: &[&str], input: &[u8]) -> std::process::Output {
    let mut child = segbuf()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute segbuf");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input)
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for segbuf")
}

#[test]
fn test_help_flag() {
    let output = segbuf().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pipe"));
    assert!(stdout.contains("stats"));
}

#[test]
fn test_invalid_subcommand_fails() {
    let output = segbuf().arg("nonexistent-command").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_pipe_roundtrip() {
    let input: Vec<u8> = (0..5000u32).map(|i| (i % 253) as u8).collect();
    let output = run_with_stdin(&["pipe", "--chunk-size", "100"], &input);

    assert!(output.status.success());
    assert_eq!(output.stdout, input);
}

#[test]
fn test_pipe_rejects_zero_chunk_size() {
    let output = run_with_stdin(&["pipe", "--chunk-size", "0"], b"data");
    assert!(!output.status.success());
}

#[test]
fn test_stats_json_from_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("input.bin");
    std::fs::write(&path, vec![7u8; 300]).unwrap();

    let output = segbuf()
        .args(["stats", path.to_str().unwrap(), "--format", "json", "--label", "file"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["label"], "file");
    assert_eq!(stats["len"], 300);
    assert_eq!(stats["segments"], 2);
    assert_eq!(stats["tail_remaining"], 210);
}

#[test]
fn test_stats_uses_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("segbuf.toml");
    std::fs::write(&config_path, "label = \"from-config\"\nmetrics = false\n").unwrap();

    let output = run_with_stdin(
        &[
            "--config",
            config_path.to_str().unwrap(),
            "stats",
            "--format",
            "json",
        ],
        b"abc",
    );
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["label"], "from-config");
    assert_eq!(stats["len"], 3);
}

#[test]
fn test_peek_hex() {
    let output = run_with_stdin(&["peek", "--bytes", "3"], b"ohai!");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "6f 68 61");
}

#[test]
fn test_metrics_flag_prints_exposition() {
    let output = run_with_stdin(&["--metrics", "pipe"], b"metered");

    assert!(output.status.success());
    assert_eq!(output.stdout, b"metered");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("segbuf_bytes_written_total"));
}
