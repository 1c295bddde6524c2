//! # Collector Module
//!
//! Enumeration of candidate files for a rewrite run. Roots may be files or
//! directories: directories are walked recursively and gated on a
//! case-insensitive extension set, while explicitly named files are taken
//! as-is. Symlinks are never followed. The result is sorted and
//! deduplicated, so overlapping roots ("src" and "src/main.rs") yield each
//! file once and runs are deterministic.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;
use walkdir::WalkDir;

/// File enumeration for the rewriter.
///
/// The `FileCollector` handles:
/// - Walking directory roots recursively
/// - Filtering walked files on an extension set
/// - Accepting explicitly named files regardless of extension
pub struct FileCollector {
  /// Lowercased extensions without the leading dot
  extensions: BTreeSet<String>,
}

impl FileCollector {
  /// Creates a new FileCollector for the given extension set.
  ///
  /// Extensions are matched case-insensitively; a leading dot is accepted
  /// and stripped, so "hpp", ".hpp" and "HPP" are all the same gate.
  pub fn new(extensions: &[String]) -> Self {
    let extensions = extensions
      .iter()
      .map(|ext| ext.trim_start_matches('.').to_lowercase())
      .collect();

    Self { extensions }
  }

  /// Whether any extensions are configured.
  pub fn has_extensions(&self) -> bool {
    !self.extensions.is_empty()
  }

  /// Collects all candidate files under the given roots.
  ///
  /// # Parameters
  ///
  /// * `roots` - File or directory paths; directories require a non-empty
  ///   extension set
  ///
  /// # Returns
  ///
  /// A sorted, deduplicated list of file paths.
  ///
  /// # Errors
  ///
  /// Returns an error if a root does not exist, or if a directory root is
  /// given without any configured extensions.
  pub fn collect(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for root in roots {
      let metadata =
        std::fs::symlink_metadata(root).with_context(|| format!("Cannot access path: {}", root.display()))?;

      if metadata.file_type().is_symlink() {
        debug!("Skipping symlink root: {}", root.display());
        continue;
      }

      if metadata.is_file() {
        // Explicitly named files bypass the extension gate
        files.insert(root.clone());
      } else if metadata.is_dir() {
        if self.extensions.is_empty() {
          bail!(
            "No file extensions configured; cannot scan directory: {}",
            root.display()
          );
        }
        self.collect_directory(root, &mut files);
      } else {
        debug!("Skipping special file: {}", root.display());
      }
    }

    Ok(files.into_iter().collect())
  }

  /// Walks one directory, inserting matching files into the set.
  fn collect_directory(&self, dir: &Path, files: &mut BTreeSet<PathBuf>) {
    debug!("Scanning directory: {}", dir.display());
    let start_time = std::time::Instant::now();
    let before = files.len();

    for entry in WalkDir::new(dir).follow_links(false) {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          eprintln!("Error reading directory entry: {}", e);
          continue;
        }
      };

      // Symlinked files report their own file type here and fall through
      if !entry.file_type().is_file() {
        continue;
      }

      if self.matches_extension(entry.path()) {
        files.insert(entry.into_path());
      }
    }

    debug!(
      "Found {} files under {} in {}ms",
      files.len() - before,
      dir.display(),
      start_time.elapsed().as_millis()
    );
  }

  /// Checks a path against the configured extension set.
  pub fn matches_extension(&self, path: &Path) -> bool {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()))
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, "content\n").expect("write file");
  }

  #[test]
  fn test_collect_filters_on_extension() {
    let temp_dir = TempDir::new().expect("create temp dir");
    touch(&temp_dir.path().join("a.hpp"));
    touch(&temp_dir.path().join("b.cpp"));
    touch(&temp_dir.path().join("notes.md"));

    let collector = FileCollector::new(&["hpp".to_string(), "cpp".to_string()]);
    let files = collector.collect(&[temp_dir.path().to_path_buf()]).expect("collect");

    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.extension().is_some_and(|e| e != "md")));
  }

  #[test]
  fn test_collect_recurses_and_sorts() {
    let temp_dir = TempDir::new().expect("create temp dir");
    touch(&temp_dir.path().join("src/z.rs"));
    touch(&temp_dir.path().join("src/nested/a.rs"));
    touch(&temp_dir.path().join("b.rs"));

    let collector = FileCollector::new(&["rs".to_string()]);
    let files = collector.collect(&[temp_dir.path().to_path_buf()]).expect("collect");

    assert_eq!(files.len(), 3);
    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted, "output should already be sorted");
  }

  #[test]
  fn test_extension_match_is_case_insensitive() {
    let temp_dir = TempDir::new().expect("create temp dir");
    touch(&temp_dir.path().join("LEGACY.HPP"));

    let collector = FileCollector::new(&["hpp".to_string()]);
    let files = collector.collect(&[temp_dir.path().to_path_buf()]).expect("collect");

    assert_eq!(files.len(), 1);
  }

  #[test]
  fn test_leading_dot_in_extension_is_accepted() {
    let collector = FileCollector::new(&[".rs".to_string()]);
    assert!(collector.matches_extension(Path::new("main.rs")));
  }

  #[test]
  fn test_explicit_file_bypasses_extension_gate() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("Makefile");
    touch(&path);

    let collector = FileCollector::new(&["rs".to_string()]);
    let files = collector.collect(&[path.clone()]).expect("collect");

    assert_eq!(files, vec![path]);
  }

  #[test]
  fn test_overlapping_roots_deduplicate() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let file = temp_dir.path().join("src/main.rs");
    touch(&file);

    let collector = FileCollector::new(&["rs".to_string()]);
    let files = collector
      .collect(&[temp_dir.path().to_path_buf(), file.clone()])
      .expect("collect");

    assert_eq!(files, vec![file]);
  }

  #[test]
  fn test_missing_root_is_an_error() {
    let collector = FileCollector::new(&["rs".to_string()]);
    let err = collector
      .collect(&[PathBuf::from("/nonexistent/tree")])
      .expect_err("missing root should fail");
    assert!(err.to_string().contains("/nonexistent/tree"));
  }

  #[test]
  fn test_directory_without_extensions_is_an_error() {
    let temp_dir = TempDir::new().expect("create temp dir");

    let collector = FileCollector::new(&[]);
    let result = collector.collect(&[temp_dir.path().to_path_buf()]);
    assert!(result.is_err());
  }

  #[cfg(unix)]
  #[test]
  fn test_symlinks_are_skipped() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let target = temp_dir.path().join("real.rs");
    touch(&target);
    let link = temp_dir.path().join("link.rs");
    std::os::unix::fs::symlink(&target, &link).expect("create symlink");

    let collector = FileCollector::new(&["rs".to_string()]);
    let files = collector.collect(&[temp_dir.path().to_path_buf()]).expect("collect");

    assert_eq!(files, vec![target]);
  }
}
