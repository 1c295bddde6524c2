//! # Output Module
//!
//! All user-facing console output goes through here so a run reads the same
//! everywhere: one symbol vocabulary, one color scheme, one truncation rule
//! for long file lists.
//!
//! Output contracts worth keeping in mind:
//! - stdout carries results; diagnostics and diffs live on stderr
//! - quiet mode reduces every list to bare relative paths for piping
//! - verbose mode lifts the list truncation and adds timing

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileAction, FileReport, RunSummary};

/// Leading symbols for the per-category lists.
pub mod symbols {
  /// Header rewritten
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Read or write failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Skipped by an ignore rule
  pub const SKIPPED: &str = "-";
  /// Rewrite pending (dry run)
  pub const PENDING: &str = "\u{21bb}"; // ↻
}

/// How many files a list shows before truncating (lifted by `-v`).
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

fn files_noun(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// File lists are always presented in path order, whatever order the
/// reports arrived in.
fn sorted_by_path<'a>(files: &[&'a FileReport]) -> Vec<&'a FileReport> {
  let mut sorted: Vec<_> = files.to_vec();
  sorted.sort_by(|a, b| a.path.cmp(&b.path));
  sorted
}

/// Quiet-mode rendering: nothing but relative paths, one per line.
fn print_bare_paths(files: &[&FileReport], workspace_root: Option<&Path>) {
  for file in files {
    println!("{}", make_relative_path(&file.path, workspace_root));
  }
}

/// Print the initial "Checking N files..." or "Rewriting N files..." message.
pub fn print_start_message(file_count: usize, modify_mode: bool) {
  if is_quiet() {
    return;
  }

  let verb = if modify_mode { "Rewriting" } else { "Checking" };
  println!("{} {} {}...", verb, file_count, files_noun(file_count));
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the list of files whose headers were rewritten (or would be).
///
/// Shows up to `DEFAULT_FILE_LIST_LIMIT` files; in verbose mode, shows all.
/// In quiet mode only the bare paths are printed, so the list can be piped
/// into other tools.
pub fn print_replaced_files(files: &[&FileReport], workspace_root: Option<&Path>, modify_mode: bool) {
  if files.is_empty() {
    return;
  }

  let sorted = sorted_by_path(files);

  if is_quiet() {
    print_bare_paths(&sorted, workspace_root);
    return;
  }

  let count = sorted.len();
  let header = if modify_mode {
    format!(
      "{} Rewrote header in {} {}:",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      count,
      files_noun(count)
    )
  } else {
    format!(
      "{} {} {} pending header rewrite:",
      symbols::PENDING.if_supports_color(Stream::Stdout, |s| s.yellow()),
      count,
      files_noun(count)
    )
  };
  println!("{}", header);

  let show_all = is_verbose();
  let effective_limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in sorted.iter().take(effective_limit) {
    println!("  {}", make_relative_path(&file.path, workspace_root));
  }

  if !show_all && count > effective_limit {
    let more = format!("... and {} more (use -v to see all)", count - effective_limit);
    println!("  {}", more.if_supports_color(Stream::Stdout, |s| s.dimmed()));
  }
}

/// Print the list of files that could not be read or written.
///
/// Each entry carries the I/O error detail so the cause is visible without
/// rerunning. In quiet mode only the bare paths are printed.
pub fn print_failed_files(files: &[&FileReport], workspace_root: Option<&Path>) {
  if files.is_empty() {
    return;
  }

  let sorted = sorted_by_path(files);

  if is_quiet() {
    print_bare_paths(&sorted, workspace_root);
    return;
  }

  let count = sorted.len();
  println!(
    "{} {} {} failed:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    count,
    files_noun(count)
  );

  for file in &sorted {
    let display_path = make_relative_path(&file.path, workspace_root);
    match &file.detail {
      Some(detail) => println!("  {} ({}: {})", display_path, file.action, detail),
      None => println!("  {} ({})", display_path, file.action),
    }
  }
}

/// Print the list of files skipped by ignore rules.
///
/// Only shown in verbose mode; skipped files are routine noise otherwise.
pub fn print_skipped_files(files: &[&FileReport], workspace_root: Option<&Path>) {
  if !is_verbose() || is_quiet() || files.is_empty() {
    return;
  }

  let sorted = sorted_by_path(files);

  let count = sorted.len();
  println!(
    "{} {} {} skipped:",
    symbols::SKIPPED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    count,
    files_noun(count)
  );

  for file in &sorted {
    let display_path = make_relative_path(&file.path, workspace_root);
    let line = match &file.detail {
      Some(reason) => format!("{} ({})", display_path, reason),
      None => display_path,
    };
    println!("  {}", line.if_supports_color(Stream::Stdout, |s| s.dimmed()));
  }
}

/// Print the success message when no file needed a rewrite.
pub fn print_nothing_to_do() {
  if is_quiet() {
    return;
  }

  println!(
    "{} No headers needed rewriting.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the run summary.
///
/// Format: "Summary: X rewritten, Y unchanged, Z skipped, W failed"
/// (dry runs say "pending" instead of "rewritten"). In verbose mode,
/// also shows timing.
pub fn print_summary(summary: &RunSummary, modify_mode: bool) {
  if is_quiet() {
    return;
  }

  let replaced_label = if modify_mode { "rewritten" } else { "pending" };
  let replaced_str = summary
    .files_replaced
    .if_supports_color(Stream::Stdout, |s| s.cyan())
    .to_string();
  let unchanged_str = summary
    .files_unchanged
    .if_supports_color(Stream::Stdout, |s| s.cyan())
    .to_string();
  let skipped_str = summary
    .files_skipped
    .if_supports_color(Stream::Stdout, |s| s.dimmed())
    .to_string();
  let failed_str = if summary.files_failed > 0 {
    summary
      .files_failed
      .if_supports_color(Stream::Stdout, |s| s.red())
      .to_string()
  } else {
    summary
      .files_failed
      .if_supports_color(Stream::Stdout, |s| s.cyan())
      .to_string()
  };

  let mut summary_line = format!(
    "Summary: {} {}, {} unchanged, {} skipped, {} failed",
    replaced_str, replaced_label, unchanged_str, skipped_str, failed_str
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a next-step hint, like pointing a dry run at `--modify`.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// File reports grouped by how the console presents them.
pub struct CategorizedReports<'a> {
  /// Files whose headers were rewritten (or are pending in a dry run)
  pub replaced: Vec<&'a FileReport>,
  /// Files where the old header did not occur, or was already canonical
  pub unchanged: Vec<&'a FileReport>,
  /// Files skipped by ignore rules
  pub skipped: Vec<&'a FileReport>,
  /// Files that could not be read or written
  pub failed: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Splits a report list into the four display groups.
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut replaced = Vec::new();
    let mut unchanged = Vec::new();
    let mut skipped = Vec::new();
    let mut failed = Vec::new();

    for report in reports {
      match report.action {
        FileAction::Replaced => replaced.push(report),
        FileAction::Unchanged => unchanged.push(report),
        FileAction::Skipped => skipped.push(report),
        FileAction::ReadFailed | FileAction::WriteFailed => failed.push(report),
      }
    }

    Self {
      replaced,
      unchanged,
      skipped,
      failed,
    }
  }
}

/// Make a path relative to the workspace root for display.
///
/// Falls back to a `..`-style relative path when the file lies outside the
/// root, and to the path as given when no relation can be computed.
fn make_relative_path(path: &Path, workspace_root: Option<&Path>) -> String {
  if let Some(root) = workspace_root {
    if let Ok(stripped) = path.strip_prefix(root) {
      return stripped.to_string_lossy().to_string();
    }

    if let Some(rel_path) = pathdiff::diff_paths(path, root) {
      return rel_path.to_string_lossy().to_string();
    }
  }

  path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn test_categorize_reports_replaced() {
    let reports = vec![FileReport::replaced(PathBuf::from("src/main.rs"))];

    let categorized = CategorizedReports::from_reports(&reports);

    assert_eq!(categorized.replaced.len(), 1);
    assert!(categorized.unchanged.is_empty());
    assert!(categorized.skipped.is_empty());
    assert!(categorized.failed.is_empty());
  }

  #[test]
  fn test_categorize_reports_unchanged() {
    let reports = vec![FileReport::unchanged(PathBuf::from("src/main.rs"))];

    let categorized = CategorizedReports::from_reports(&reports);

    assert!(categorized.replaced.is_empty());
    assert_eq!(categorized.unchanged.len(), 1);
    assert!(categorized.skipped.is_empty());
    assert!(categorized.failed.is_empty());
  }

  #[test]
  fn test_categorize_reports_failures() {
    let reports = vec![
      FileReport::read_failed(PathBuf::from("src/a.rs"), "permission denied".to_string()),
      FileReport::write_failed(PathBuf::from("src/b.rs"), "disk full".to_string()),
    ];

    let categorized = CategorizedReports::from_reports(&reports);

    assert!(categorized.replaced.is_empty());
    assert!(categorized.unchanged.is_empty());
    assert!(categorized.skipped.is_empty());
    assert_eq!(categorized.failed.len(), 2);
  }

  #[test]
  fn test_categorize_reports_mixed() {
    let reports = vec![
      FileReport::replaced(PathBuf::from("src/main.rs")),
      FileReport::unchanged(PathBuf::from("src/lib.rs")),
      FileReport::skipped(PathBuf::from("vendor/dep.rs"), "matches ignore pattern".to_string()),
      FileReport::read_failed(PathBuf::from("src/broken.rs"), "not utf-8".to_string()),
    ];

    let categorized = CategorizedReports::from_reports(&reports);

    assert_eq!(categorized.replaced.len(), 1);
    assert_eq!(categorized.unchanged.len(), 1);
    assert_eq!(categorized.skipped.len(), 1);
    assert_eq!(categorized.failed.len(), 1);
  }

  #[test]
  fn test_sorted_by_path_orders_lists() {
    let b = FileReport::replaced(PathBuf::from("src/b.rs"));
    let a = FileReport::replaced(PathBuf::from("src/a.rs"));
    let refs = vec![&b, &a];

    let sorted = sorted_by_path(&refs);

    assert_eq!(sorted[0].path, PathBuf::from("src/a.rs"));
    assert_eq!(sorted[1].path, PathBuf::from("src/b.rs"));
  }

  #[test]
  fn test_make_relative_path_with_root() {
    let path = PathBuf::from("/workspace/project/src/main.rs");
    let root = PathBuf::from("/workspace/project");

    let result = make_relative_path(&path, Some(&root));
    assert_eq!(result, "src/main.rs");
  }

  #[test]
  fn test_make_relative_path_without_root() {
    let path = PathBuf::from("/workspace/project/src/main.rs");

    let result = make_relative_path(&path, None);
    assert_eq!(result, "/workspace/project/src/main.rs");
  }

  #[cfg(unix)]
  #[test]
  fn test_make_relative_path_outside_root() {
    let path = PathBuf::from("/workspace/other/file.rs");
    let root = PathBuf::from("/workspace/project");

    let result = make_relative_path(&path, Some(&root));
    assert_eq!(result, "../other/file.rs");
  }
}
