//! # Output control tests
//!
//! Checks the verbose, quiet, and color flags at the binary level: what
//! lands on stdout, what gets suppressed, and when ANSI codes appear.

mod common;

use assert_cmd::Command;
use common::{NEW_HEADER, write_source, write_templates};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_verbose_shows_skipped_files_and_timing() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  let (old_path, new_path) = write_templates(temp_dir.path())?;
  write_source(temp_dir.path(), "src/main.c", "int main(void) { return 0; }\n")?;
  write_source(temp_dir.path(), "vendor/lib.c", "int lib;\n")?;

  let mut cmd = Command::cargo_bin("relicense")?;
  cmd
    .current_dir(temp_dir.path())
    .args(["--colors=never", "-v"])
    .arg("--old-header")
    .arg(&old_path)
    .arg("--new-header")
    .arg(&new_path)
    .args(["--ignore", "vendor/", "--ext", "c", "src", "vendor"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("vendor/lib.c (matches ignore pattern)"))
    .stdout(predicate::str::is_match(r"Summary: .* \(\d+\.\d{2}s\)")?);

  Ok(())
}

#[test]
fn test_skipped_files_are_hidden_without_verbose() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  let (old_path, new_path) = write_templates(temp_dir.path())?;
  write_source(temp_dir.path(), "src/main.c", "int main(void) { return 0; }\n")?;
  write_source(temp_dir.path(), "vendor/lib.c", "int lib;\n")?;

  let mut cmd = Command::cargo_bin("relicense")?;
  let output = cmd
    .current_dir(temp_dir.path())
    .arg("--colors=never")
    .arg("--old-header")
    .arg(&old_path)
    .arg("--new-header")
    .arg(&new_path)
    .args(["--ignore", "vendor/", "--ext", "c", "src", "vendor"])
    .output()?;

  // The skip still shows up in the summary count, just not as a list
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(!stdout.contains("vendor/lib.c"), "skipped paths need -v to be listed");
  assert!(stdout.contains("1 skipped"));

  Ok(())
}

#[test]
fn test_quiet_modify_prints_only_the_rewritten_paths() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  let (old_path, new_path) = write_templates(temp_dir.path())?;
  let source = write_source(temp_dir.path(), "src/main.c", "int main(void) { return 0; }\n")?;

  let mut cmd = Command::cargo_bin("relicense")?;
  let output = cmd
    .current_dir(temp_dir.path())
    .args(["--quiet", "--modify"])
    .arg("--old-header")
    .arg(&old_path)
    .arg("--new-header")
    .arg(&new_path)
    .args(["--ext", "c", "src"])
    .output()?;

  assert!(output.status.success());
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert_eq!(stdout.trim(), "src/main.c");

  // Quiet changes the output, not the behavior
  assert!(std::fs::read_to_string(&source)?.starts_with(NEW_HEADER));

  Ok(())
}

#[test]
fn test_colors_always_forces_ansi_codes() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  let (old_path, new_path) = write_templates(temp_dir.path())?;
  write_source(temp_dir.path(), "src/main.c", "int main(void) { return 0; }\n")?;

  // Even with output piped, an explicit always emits escape codes
  let mut cmd = Command::cargo_bin("relicense")?;
  let output = cmd
    .current_dir(temp_dir.path())
    .arg("--colors=always")
    .arg("--old-header")
    .arg(&old_path)
    .arg("--new-header")
    .arg(&new_path)
    .args(["--ext", "c", "src"])
    .output()?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("\x1b["), "expected ANSI codes in: {}", stdout);

  Ok(())
}

#[test]
fn test_piped_output_has_no_ansi_codes_by_default() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  let (old_path, new_path) = write_templates(temp_dir.path())?;
  write_source(temp_dir.path(), "src/main.c", "int main(void) { return 0; }\n")?;

  // Auto mode with a piped stdout detects no TTY
  let mut cmd = Command::cargo_bin("relicense")?;
  let output = cmd
    .current_dir(temp_dir.path())
    .arg("--old-header")
    .arg(&old_path)
    .arg("--new-header")
    .arg(&new_path)
    .args(["--ext", "c", "src"])
    .env("NO_COLOR", "1")
    .output()?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(!stdout.contains("\x1b["), "unexpected ANSI codes in: {}", stdout);

  Ok(())
}

#[test]
fn test_verbose_and_quiet_conflict() -> Result<(), Box<dyn std::error::Error>> {
  let mut cmd = Command::cargo_bin("relicense")?;
  let output = cmd.args(["--verbose", "--quiet", "src"]).output()?;

  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(
    stderr.contains("cannot be used with"),
    "clap should reject the flag combination, got: {}",
    stderr
  );

  Ok(())
}
