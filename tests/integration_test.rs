//! Integration tests for cdigest

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;

/// Helper to create a test directory structure
fn create_test_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    // Create directory structure
    fs::create_dir(root.join("src")).unwrap();
    fs::create_dir(root.join("docs")).unwrap();
    fs::create_dir(root.join(".git")).unwrap();

    // Create files with content
    let mut file = File::create(root.join("README.md")).unwrap();
    writeln!(file, "# Test Project\n\nThis is a test.").unwrap();

    let mut file = File::create(root.join("src/main.rs")).unwrap();
    writeln!(file, "fn main() {{\n    println!(\"Hello, world!\");\n}}").unwrap();

    let mut file = File::create(root.join("src/lib.rs")).unwrap();
    writeln!(file, "pub fn add(a: i32, b: i32) -> i32 {{\n    a + b\n}}").unwrap();

    let mut file = File::create(root.join("docs/notes.txt")).unwrap();
    writeln!(file, "some notes").unwrap();

    let mut file = File::create(root.join("data.bin")).unwrap();
    file.write_all(&[0u8, 159, 146, 150]).unwrap();

    temp_dir
}

/// Build a cdigest command with an isolated home and working directory
fn cdigest(work_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cdigest").unwrap();
    cmd.current_dir(work_dir.path());
    cmd.env("HOME", work_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_basic_digest() {
    let temp_dir = create_test_tree();
    let work_dir = TempDir::new().unwrap();
    let out_file = work_dir.path().join("digest.txt");

    cdigest(&work_dir)
        .arg(temp_dir.path())
        .arg("-f")
        .arg(&out_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis Summary"))
        .stdout(predicate::str::contains("Analysis saved to:"));

    let digest = fs::read_to_string(&out_file).unwrap();
    assert!(digest.contains("Codebase Analysis for:"));
    assert!(digest.contains("README.md"));
    assert!(digest.contains("Hello, world!"));
    assert!(digest.contains("Total files analyzed:"));
}

#[test]
fn test_binary_files_get_placeholder() {
    let temp_dir = create_test_tree();
    let work_dir = TempDir::new().unwrap();
    let out_file = work_dir.path().join("digest.txt");

    cdigest(&work_dir)
        .arg(temp_dir.path())
        .arg("-f")
        .arg(&out_file)
        .assert()
        .success();

    let digest = fs::read_to_string(&out_file).unwrap();
    // The binary file appears in the tree but contributes no content section
    // (content headers use the root-prefixed path, tree lines do not).
    assert!(digest.contains("data.bin"));
    assert!(!digest.contains("/data.bin"));
    assert!(!digest.contains("[Non-text file]"));
}

#[test]
fn test_ignore_pattern_marks_entries() {
    let temp_dir = create_test_tree();
    let work_dir = TempDir::new().unwrap();
    let out_file = work_dir.path().join("digest.txt");

    cdigest(&work_dir)
        .arg(temp_dir.path())
        .arg("--ignore")
        .arg("*.md")
        .arg("-f")
        .arg(&out_file)
        .assert()
        .success();

    let digest = fs::read_to_string(&out_file).unwrap();
    // Digest files always render ignored entries with their marker, and the
    // ignored file's content is excluded from the contents section.
    assert!(digest.contains("README.md"));
    assert!(digest.contains("[IGNORED]"));
    assert!(!digest.contains("This is a test."));
}

#[test]
fn test_console_tree_hides_ignored_without_flag() {
    let temp_dir = create_test_tree();
    let work_dir = TempDir::new().unwrap();
    let out_file = work_dir.path().join("digest.txt");

    cdigest(&work_dir)
        .arg(temp_dir.path())
        .arg("--ignore")
        .arg("docs")
        .arg("-f")
        .arg(&out_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.txt").not());

    cdigest(&work_dir)
        .arg(temp_dir.path())
        .arg("--ignore")
        .arg("docs")
        .arg("--show-ignored")
        .arg("-f")
        .arg(&out_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.txt"))
        .stdout(predicate::str::contains("[IGNORED]"));
}

#[test]
fn test_gitignore_respected() {
    let temp_dir = create_test_tree();
    let mut file = File::create(temp_dir.path().join(".gitignore")).unwrap();
    // A pattern that is not in the default set, so the marker below can only
    // come from the .gitignore source.
    writeln!(file, "*.dat").unwrap();
    fs::write(temp_dir.path().join("values.dat"), "1,2,3").unwrap();

    let work_dir = TempDir::new().unwrap();
    let out_file = work_dir.path().join("digest.txt");

    cdigest(&work_dir)
        .arg(temp_dir.path())
        .arg("-f")
        .arg(&out_file)
        .assert()
        .success();

    let digest = fs::read_to_string(&out_file).unwrap();
    assert!(digest.contains("values.dat"));
    assert!(digest.contains("[IGNORED]"));
    // Ignored content never reaches the contents section.
    assert!(!digest.contains("1,2,3"));
}

#[test]
fn test_json_output_parses() {
    let temp_dir = create_test_tree();
    let work_dir = TempDir::new().unwrap();
    let out_file = work_dir.path().join("digest.json");

    cdigest(&work_dir)
        .arg(temp_dir.path())
        .arg("-o")
        .arg("json")
        .arg("-f")
        .arg(&out_file)
        .assert()
        .success();

    let digest = fs::read_to_string(&out_file).unwrap();
    let value: serde_json::Value = serde_json::from_str(&digest).unwrap();
    assert!(value["children"].is_array());
    assert_eq!(value["type"], "directory");
}

#[test]
fn test_max_depth_limits_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("a/b")).unwrap();
    fs::write(root.join("a/shallow.txt"), "shallow").unwrap();
    fs::write(root.join("a/b/deep.txt"), "deep").unwrap();

    let work_dir = TempDir::new().unwrap();
    let out_file = work_dir.path().join("digest.txt");

    cdigest(&work_dir)
        .arg(root)
        .arg("-d")
        .arg("1")
        .arg("-f")
        .arg(&out_file)
        .assert()
        .success();

    let digest = fs::read_to_string(&out_file).unwrap();
    assert!(digest.contains("shallow.txt"));
    assert!(!digest.contains("deep.txt"));
}

#[test]
fn test_no_content_flag() {
    let temp_dir = create_test_tree();
    let work_dir = TempDir::new().unwrap();
    let out_file = work_dir.path().join("digest.txt");

    cdigest(&work_dir)
        .arg(temp_dir.path())
        .arg("--no-content")
        .arg("-f")
        .arg(&out_file)
        .assert()
        .success();

    let digest = fs::read_to_string(&out_file).unwrap();
    assert!(digest.contains("Directory Structure:"));
    assert!(!digest.contains("File Contents:"));
    assert!(!digest.contains("Hello, world!"));
}

#[test]
fn test_vcs_dir_invisible() {
    let temp_dir = create_test_tree();
    fs::write(temp_dir.path().join(".git/HEAD"), "ref: refs/heads/main").unwrap();

    let work_dir = TempDir::new().unwrap();
    let out_file = work_dir.path().join("digest.txt");

    cdigest(&work_dir)
        .arg(temp_dir.path())
        .arg("-f")
        .arg(&out_file)
        .assert()
        .success();

    let digest = fs::read_to_string(&out_file).unwrap();
    assert!(!digest.contains(".git"));
}

#[test]
fn test_missing_path_fails() {
    let work_dir = TempDir::new().unwrap();

    cdigest(&work_dir)
        .arg("/nonexistent/path/for/cdigest")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path does not exist"));
}

#[test]
fn test_markdown_output() {
    let temp_dir = create_test_tree();
    let work_dir = TempDir::new().unwrap();
    let out_file = work_dir.path().join("digest.md");

    cdigest(&work_dir)
        .arg(temp_dir.path())
        .arg("-o")
        .arg("markdown")
        .arg("-f")
        .arg(&out_file)
        .assert()
        .success();

    let digest = fs::read_to_string(&out_file).unwrap();
    assert!(digest.starts_with("# Codebase Analysis for:"));
    assert!(digest.contains("## Summary"));
}
