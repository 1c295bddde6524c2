//! # Report Module
//!
//! This module provides functionality for generating reports of a rewrite
//! run in machine-readable formats (JSON, CSV).
//!
//! It captures the outcome for every file the run looked at, including files
//! whose header did not match and files that failed to read or write, and
//! can output this information in the requested format.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Outcome of one file for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// What happened to the file
  pub action: FileAction,
  /// Extra context: skip reason or error message
  #[serde(skip_serializing_if = "Option::is_none")]
  pub detail: Option<String>,
}

impl FileReport {
  /// The header was replaced (or is pending replacement in dry-run mode).
  pub const fn replaced(path: PathBuf) -> Self {
    Self {
      path,
      action: FileAction::Replaced,
      detail: None,
    }
  }

  /// The pattern did not match, or the replacement was byte-identical;
  /// the file was not written.
  pub const fn unchanged(path: PathBuf) -> Self {
    Self {
      path,
      action: FileAction::Unchanged,
      detail: None,
    }
  }

  /// The file was excluded before its content was inspected.
  pub const fn skipped(path: PathBuf, reason: String) -> Self {
    Self {
      path,
      action: FileAction::Skipped,
      detail: Some(reason),
    }
  }

  /// The file could not be read.
  pub const fn read_failed(path: PathBuf, error: String) -> Self {
    Self {
      path,
      action: FileAction::ReadFailed,
      detail: Some(error),
    }
  }

  /// The rewritten content could not be written back.
  pub const fn write_failed(path: PathBuf, error: String) -> Self {
    Self {
      path,
      action: FileAction::WriteFailed,
      detail: Some(error),
    }
  }

  /// Whether this report records a read or write failure.
  pub const fn is_failure(&self) -> bool {
    matches!(self.action, FileAction::ReadFailed | FileAction::WriteFailed)
  }
}

/// Possible outcomes for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
  /// Header was replaced (or needs replacing in dry-run mode)
  Replaced,
  /// No matching header, or replacement produced identical content
  Unchanged,
  /// File was excluded by an ignore rule before inspection
  Skipped,
  /// File could not be read
  #[serde(rename = "read-failed")]
  ReadFailed,
  /// Rewritten content could not be written back
  #[serde(rename = "write-failed")]
  WriteFailed,
}

impl std::fmt::Display for FileAction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FileAction::Replaced => write!(f, "Replaced"),
      FileAction::Unchanged => write!(f, "Unchanged"),
      FileAction::Skipped => write!(f, "Skipped"),
      FileAction::ReadFailed => write!(f, "Read failed"),
      FileAction::WriteFailed => write!(f, "Write failed"),
    }
  }
}

/// Serializes paths as display strings so reports stay readable, where the
/// derived `PathBuf` impl would reject non-UTF-8 paths outright.
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.collect_str(&path.display())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    String::deserialize(deserializer).map(PathBuf::from)
  }
}

/// Machine-readable report flavors the CLI can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// One `{summary, files}` JSON document
  Json,
  /// Row-per-file CSV with a trailing summary block
  Csv,
}

/// Writes the per-file reports and run summary to a file.
pub struct ReportGenerator<'a> {
  format: ReportFormat,
  output_path: &'a std::path::Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(format: ReportFormat, output_path: &'a std::path::Path) -> Self {
    Self { format, output_path }
  }

  /// Renders the report in the configured format and writes it out.
  ///
  /// # Errors
  ///
  /// Returns an error when the report cannot be serialized or the output
  /// file cannot be written.
  pub fn generate(&self, files: &[FileReport], summary: &RunSummary) -> Result<()> {
    let content = match self.format {
      ReportFormat::Json => Self::generate_json(files, summary)?,
      ReportFormat::Csv => Self::generate_csv(files, summary),
    };

    fs::write(self.output_path, content)
      .with_context(|| format!("failed to write report to {}", self.output_path.display()))
  }

  fn generate_json(files: &[FileReport], summary: &RunSummary) -> Result<String> {
    let report = serde_json::json!({
      "summary": summary,
      "files": files,
    });

    Ok(serde_json::to_string_pretty(&report)?)
  }

  fn generate_csv(files: &[FileReport], summary: &RunSummary) -> String {
    let mut csv = String::new();

    csv.push_str("file_path,action,detail\n");

    for file in files {
      // Commas inside fields would break the row, so they are URL-escaped.
      let path = file.path.to_string_lossy().replace(',', "%2C");
      let detail = file
        .detail
        .as_deref()
        .map(|d| d.replace(',', "%2C"))
        .unwrap_or_default();

      csv.push_str(&format!("{},{},{}\n", path, file.action, detail));
    }

    csv.push_str("\n# Summary\n");
    csv.push_str(&format!("Total files,{}\n", summary.total_files));
    csv.push_str(&format!("Headers replaced,{}\n", summary.files_replaced));
    csv.push_str(&format!("Files unchanged,{}\n", summary.files_unchanged));
    csv.push_str(&format!("Files skipped,{}\n", summary.files_skipped));
    csv.push_str(&format!("Files failed,{}\n", summary.files_failed));
    csv.push_str(&format!(
      "Processing time (seconds),{:.2}\n",
      summary.processing_time.as_secs_f64()
    ));
    csv.push_str(&format!("Generated on,{}\n", Local::now().format("%Y-%m-%d %H:%M:%S")));

    csv
  }
}

/// Summary of one rewrite run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
  /// Total number of files the run looked at
  pub total_files: usize,
  /// Number of headers replaced (or pending in dry-run mode)
  pub files_replaced: usize,
  /// Number of files left unchanged (no match or identical content)
  pub files_unchanged: usize,
  /// Number of files excluded by ignore rules
  pub files_skipped: usize,
  /// Number of files that failed to read or write
  pub files_failed: usize,
  /// Wall-clock duration of the run; serialized via the seconds field
  #[serde(skip_serializing)]
  pub processing_time: std::time::Duration,
  /// `processing_time` as fractional seconds, for report consumers
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
  /// Unix timestamp of when the summary was built
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<i64>,
}

impl RunSummary {
  /// An all-zero summary carrying just the timing and timestamp.
  pub fn new(processing_time: std::time::Duration) -> Self {
    Self {
      total_files: 0,
      files_replaced: 0,
      files_unchanged: 0,
      files_skipped: 0,
      files_failed: 0,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      timestamp: Some(Local::now().timestamp()),
    }
  }

  /// Tallies a report list into per-action counts.
  pub fn from_reports(files: &[FileReport], processing_time: std::time::Duration) -> Self {
    let mut summary = Self::new(processing_time);

    summary.total_files = files.len();

    for file in files {
      match file.action {
        FileAction::Replaced => summary.files_replaced += 1,
        FileAction::Unchanged => summary.files_unchanged += 1,
        FileAction::Skipped => summary.files_skipped += 1,
        FileAction::ReadFailed | FileAction::WriteFailed => summary.files_failed += 1,
      }
    }

    summary
  }

  /// Whether any file failed to read or write.
  pub const fn has_failures(&self) -> bool {
    self.files_failed > 0
  }
}
