//! Tests driving the crate the way a library consumer would, without going
//! through the binary.

mod common;

use std::fs;

use anyhow::Result;
use common::{NEW_HEADER, OLD_HEADER, write_source, write_templates};
use relicense::collector::FileCollector;
use relicense::ignore::IgnoreManager;
use relicense::pattern::{Anchor, HeaderPattern};
use relicense::report::{FileAction, RunSummary};
use relicense::rewriter::{Rewriter, RewriterConfig};
use relicense::templates::HeaderTemplate;
use tempfile::tempdir;

#[test]
fn test_documented_library_flow() -> Result<()> {
  let temp_dir = tempdir()?;
  let (old_path, new_path) = write_templates(temp_dir.path())?;
  let source = write_source(temp_dir.path(), "main.c", "int main(void) { return 0; }\n")?;

  // Templates come from disk, exactly as the binary loads them
  let old_header = HeaderTemplate::from_file(&old_path)?;
  let new_header = HeaderTemplate::from_file(&new_path)?;

  let pattern = HeaderPattern::compile(old_header.text(), Anchor::Top)?;
  let rewriter = Rewriter::new(RewriterConfig::new(pattern, new_header));

  let reports = rewriter.run(&[source.clone()]);

  assert_eq!(reports.len(), 1);
  assert_eq!(reports[0].action, FileAction::Replaced);
  assert!(fs::read_to_string(&source)?.starts_with(NEW_HEADER));

  Ok(())
}

#[test]
fn test_collector_ignore_and_rewriter_compose() -> Result<()> {
  let temp_dir = tempdir()?;
  write_source(temp_dir.path(), "src/app.c", "int app;\n")?;
  write_source(temp_dir.path(), "src/gen/out.c", "int out;\n")?;
  fs::write(temp_dir.path().join("src/notes.txt"), "not source\n")?;

  // Collect candidates by extension, then let ignore rules thin them out
  let collector = FileCollector::new(&["c".to_string()]);
  let ignore_manager = IgnoreManager::new(vec!["gen/".to_string()])?;

  let candidates = collector.collect(&[temp_dir.path().join("src")])?;
  assert_eq!(candidates.len(), 2, "the .txt file should not be collected");

  let (kept, skipped): (Vec<_>, Vec<_>) = candidates.into_iter().partition(|p| !ignore_manager.is_ignored(p));
  assert_eq!(kept.len(), 1);
  assert_eq!(skipped.len(), 1);
  assert!(kept[0].ends_with("app.c"));

  let pattern = HeaderPattern::compile(OLD_HEADER, Anchor::Top)?;
  let rewriter = Rewriter::new(RewriterConfig::new(pattern, HeaderTemplate::from_text(NEW_HEADER)));
  let reports = rewriter.run(&kept);

  assert_eq!(reports.len(), 1);
  assert_eq!(reports[0].action, FileAction::Replaced);

  Ok(())
}

#[test]
fn test_summary_math_over_library_reports() -> Result<()> {
  let temp_dir = tempdir()?;
  let with_header = write_source(temp_dir.path(), "a.c", "int a;\n")?;
  let without_header = temp_dir.path().join("b.c");
  fs::write(&without_header, "int b;\n")?;

  let pattern = HeaderPattern::compile(OLD_HEADER, Anchor::Top)?;
  let rewriter = Rewriter::new(RewriterConfig::new(pattern, HeaderTemplate::from_text(NEW_HEADER)));
  let reports = rewriter.run(&[with_header, without_header]);

  let summary = RunSummary::from_reports(&reports, std::time::Duration::from_millis(10));

  assert_eq!(summary.total_files, 2);
  assert_eq!(summary.files_replaced, 1);
  assert_eq!(summary.files_unchanged, 1);
  assert!(!summary.has_failures());

  Ok(())
}
