//! # Diff Module
//!
//! Line diffs of pending header rewrites, so a dry run can show exactly what
//! `--modify` would do. Diffs render to stderr (`--show-diff`), accumulate
//! into one file (`--save-diff`), or both.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};
use tracing::warn;

/// Renders the before/after of each rewrite to the requested sinks.
pub struct DiffManager {
  /// Whether to show diffs on stderr
  pub show_diff: bool,

  /// Path to save the consolidated diff to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output is requested at all.
  pub const fn is_active(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Prepare the save file for a new run.
  ///
  /// Diffs are appended file by file during a run, so a save file left over
  /// from a previous run has to be truncated up front or the runs would
  /// blend together.
  pub fn init(&self) -> Result<()> {
    if let Some(ref diff_path) = self.save_diff_path {
      OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(diff_path)
        .with_context(|| format!("failed to create diff file {}", diff_path.display()))?;
    }
    Ok(())
  }

  /// Renders the line diff of one pending rewrite to the active sinks.
  ///
  /// On stderr, deletions show in red and insertions in green; the saved
  /// rendition is plain text. The diff goes on stderr rather than stdout so
  /// quiet-mode path lists stay pipeable even with `--show-diff` on.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_active() {
      return Ok(());
    }

    if self.show_diff {
      eprintln!("Diff for {}:", path.display());
    }

    let diff = TextDiff::from_lines(original, new);

    let mut diff_content = String::new();
    diff_content.push_str(&format!("Diff for {}:\n", path.display()));

    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };

      if self.show_diff {
        let line = format!("{}{}", sign, change);
        match change.tag() {
          ChangeTag::Delete => eprint!("{}", line.if_supports_color(Stream::Stderr, |text| text.red())),
          ChangeTag::Insert => eprint!("{}", line.if_supports_color(Stream::Stderr, |text| text.green())),
          ChangeTag::Equal => eprint!("{}", line),
        }
      }

      diff_content.push_str(&format!("{}{}", sign, change));
    }

    if self.show_diff {
      eprintln!();
    }

    diff_content.push('\n');
    self.append_to_save_file(&diff_content);

    Ok(())
  }

  /// Appends one rendered diff to the save file, if one is configured.
  ///
  /// A failure here only loses diff output, never the rewrite itself, so it
  /// is logged and swallowed.
  fn append_to_save_file(&self, content: &str) {
    let Some(ref diff_path) = self.save_diff_path else {
      return;
    };

    let appended = OpenOptions::new()
      .create(true)
      .append(true)
      .open(diff_path)
      .and_then(|mut file| file.write_all(content.as_bytes()));

    if let Err(e) = appended {
      warn!("could not append to diff file {}: {}", diff_path.display(), e);
    }
  }
}
