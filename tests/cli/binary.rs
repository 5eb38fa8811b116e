// Black-box tests of the `zstdr` binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn zstdr_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_zstdr"))
}

fn zstdr(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(zstdr_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("ZSTD_CLEVEL")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run zstdr")
}

fn sample(dir: &Path, name: &str) -> Vec<u8> {
    let content = "Hello, zstd!\n".repeat(500).into_bytes();
    fs::write(dir.join(name), &content).unwrap();
    content
}

#[test]
fn compress_then_decompress_file() {
    let dir = TempDir::new().unwrap();
    let original = sample(dir.path(), "input.txt");

    let out = zstdr(dir.path(), &["-q", "-19", "input.txt"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("input.txt.zst").exists());

    fs::remove_file(dir.path().join("input.txt")).unwrap();
    let out = zstdr(dir.path(), &["-q", "-d", "input.txt.zst"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("input.txt")).unwrap(), original);
}

#[test]
fn stdout_mode_round_trip() {
    let dir = TempDir::new().unwrap();
    let original = sample(dir.path(), "a.txt");

    let out = zstdr(dir.path(), &["-q", "-c", "a.txt"]);
    assert!(out.status.success());
    assert_eq!(zstdr::decompress(&out.stdout).unwrap(), original);
}

#[test]
fn stdin_to_stdout() {
    let dir = TempDir::new().unwrap();
    let mut child = Command::new(zstdr_bin())
        .args(["-q", "-d"])
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    let frame = zstdr::compress(b"piped through", 3).unwrap();
    child.stdin.take().unwrap().write_all(&frame).unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, b"piped through");
}

#[test]
fn refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    sample(dir.path(), "b.txt");
    fs::write(dir.path().join("b.txt.zst"), b"keep me").unwrap();

    let out = zstdr(dir.path(), &["-q", "b.txt"]);
    assert!(!out.status.success());
    assert_eq!(fs::read(dir.path().join("b.txt.zst")).unwrap(), b"keep me");

    let out = zstdr(dir.path(), &["-q", "-f", "b.txt"]);
    assert!(out.status.success());
}

#[test]
fn invalid_level_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    sample(dir.path(), "c.txt");
    let out = zstdr(dir.path(), &["--level", "1000", "c.txt"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("level"));
}

#[test]
fn environment_level_is_used() {
    let dir = TempDir::new().unwrap();
    sample(dir.path(), "d.txt");
    let out = Command::new(zstdr_bin())
        .args(["-q", "-c", "d.txt"])
        .current_dir(dir.path())
        .env("ZSTD_CLEVEL", "not-a-level")
        .stdin(Stdio::null())
        .output()
        .unwrap();
    // Invalid values are ignored, not fatal.
    assert!(out.status.success());
}

#[test]
fn list_prints_a_row_per_file() {
    let dir = TempDir::new().unwrap();
    sample(dir.path(), "e.txt");
    assert!(zstdr(dir.path(), &["-q", "e.txt"]).status.success());

    let out = zstdr(dir.path(), &["--list", "e.txt.zst"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Frames"));
    assert!(stdout.contains("e.txt.zst"));

    let out = zstdr(dir.path(), &["--list", "e.txt"]);
    assert!(!out.status.success());
}
