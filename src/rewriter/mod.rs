//! # Rewriter Module
//!
//! This module contains the core read, substitute, and write-back loop that
//! swaps one license header for another across a set of files.
//!
//! The module is organized into submodules:
//! - [`file_io`] - File reading and atomic write-back
//!
//! The [`Rewriter`] struct is the main entry point: it consumes a list of
//! already-enumerated file paths and returns one report per file. Files
//! never affect each other; a file that fails to read or write is recorded
//! and the rest of the run continues.

mod file_io;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub use file_io::{FileError, FileIO};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::diff::DiffManager;
use crate::info_log;
use crate::pattern::HeaderPattern;
use crate::report::FileReport;
use crate::templates::HeaderTemplate;

/// Configuration for creating a Rewriter instance.
pub struct RewriterConfig {
  /// Compiled matcher for the current header
  pub pattern: HeaderPattern,
  /// The new header, inserted literally in place of each match
  pub replacement: HeaderTemplate,
  /// When true, report pending changes without writing anything
  pub dry_run: bool,
  /// Optional diff rendering of pending or applied changes
  pub diff_manager: Option<DiffManager>,
}

impl RewriterConfig {
  /// Creates a new RewriterConfig with required fields and defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// RewriterConfig {
  ///     dry_run: true,
  ///     ..RewriterConfig::new(pattern, replacement)
  /// }
  /// ```
  pub fn new(pattern: HeaderPattern, replacement: HeaderTemplate) -> Self {
    Self {
      pattern,
      replacement,
      dry_run: false,
      diff_manager: None,
    }
  }
}

/// Rewriter for swapping license headers across files.
///
/// The `Rewriter` is responsible for:
/// - Reading each file fresh at processing time
/// - Substituting the first header match with the new header
/// - Skipping the write when nothing changed, so unmatched files keep their
///   content and metadata byte for byte
/// - Writing changed files atomically (stage and rename)
/// - Collecting a report entry for every file, including failures
///
/// It never enumerates files itself; callers hand it the final list.
pub struct Rewriter {
  /// Compiled matcher for the current header
  pattern: HeaderPattern,

  /// The new header text
  replacement: String,

  /// Whether to report pending changes instead of writing them
  dry_run: bool,

  /// Manager for handling diff creation and rendering
  diff_manager: DiffManager,
}

impl Rewriter {
  /// Batch size for processing files to reduce overhead.
  const BATCH_SIZE: usize = 8;

  /// Creates a new rewriter with the specified configuration.
  pub fn new(config: RewriterConfig) -> Self {
    let diff_manager = config.diff_manager.unwrap_or_else(|| DiffManager::new(false, None));

    Self {
      pattern: config.pattern,
      replacement: config.replacement.text().to_string(),
      dry_run: config.dry_run,
      diff_manager,
    }
  }

  /// Whether this rewriter runs in dry-run mode.
  pub const fn is_dry_run(&self) -> bool {
    self.dry_run
  }

  /// Rewrites the header in every file of the list.
  ///
  /// Files are processed in fixed-size batches in parallel; the returned
  /// reports are in input order regardless of scheduling. Per-file failures
  /// are recorded in the reports, never propagated.
  ///
  /// # Parameters
  ///
  /// * `files` - The files to process, already enumerated and filtered
  ///
  /// # Returns
  ///
  /// One [`FileReport`] per input file.
  pub fn run(&self, files: &[PathBuf]) -> Vec<FileReport> {
    if files.is_empty() {
      debug!("No files to rewrite");
      return Vec::new();
    }

    let start = std::time::Instant::now();

    let batches: Vec<Vec<PathBuf>> = files.chunks(Self::BATCH_SIZE).map(|chunk| chunk.to_vec()).collect();
    debug!(
      "Rewriting {} files in {} batches (batch size: {})",
      files.len(),
      batches.len(),
      Self::BATCH_SIZE
    );

    let batch_results: Vec<Vec<FileReport>> = batches
      .into_par_iter()
      .map(|batch| self.rewrite_batch(batch))
      .collect();

    let mut reports = Vec::with_capacity(files.len());
    for batch_reports in batch_results {
      reports.extend(batch_reports);
    }

    debug!("Processed {} files in {}ms", reports.len(), start.elapsed().as_millis());

    reports
  }

  /// Process one batch of files, returning a report per file.
  fn rewrite_batch(&self, files: Vec<PathBuf>) -> Vec<FileReport> {
    let mut batch_reports = Vec::with_capacity(files.len());

    for path in files {
      batch_reports.push(self.rewrite_single_file(&path));
    }

    batch_reports
  }

  /// Process a single file: read, substitute once, write back if changed.
  fn rewrite_single_file(&self, path: &Path) -> FileReport {
    let content = match FileIO::read_full_content(path) {
      Ok(content) => content,
      Err(err) => {
        trace!("Read failed for {}: {}", path.display(), err);
        return FileReport::read_failed(path.to_path_buf(), err.detail());
      }
    };

    match self.pattern.replace_first(&content, &self.replacement) {
      Cow::Borrowed(_) => {
        trace!("No header match in: {}", path.display());
        FileReport::unchanged(path.to_path_buf())
      }
      Cow::Owned(new_content) => {
        if new_content == content {
          // The matched header is already canonical. Skipping the write
          // keeps the mtime untouched and makes repeat runs no-ops.
          trace!("Header already canonical in: {}", path.display());
          return FileReport::unchanged(path.to_path_buf());
        }

        if let Err(e) = self.diff_manager.display_diff(path, &content, &new_content) {
          eprintln!("Warning: Failed to display diff for {}: {}", path.display(), e);
        }

        if self.dry_run {
          info_log!("Would rewrite: {}", path.display());
          return FileReport::replaced(path.to_path_buf());
        }

        match FileIO::write_atomic(path, &new_content) {
          Ok(()) => {
            info_log!("Rewrote header in: {}", path.display());
            FileReport::replaced(path.to_path_buf())
          }
          Err(err) => {
            trace!("Write failed for {}: {}", path.display(), err);
            FileReport::write_failed(path.to_path_buf(), err.detail())
          }
        }
      }
    }
  }
}
