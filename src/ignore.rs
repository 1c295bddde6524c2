//! # Ignore Module
//!
//! This module contains functionality for excluding files from a rewrite
//! run before their content is inspected.
//!
//! It supports:
//! - Command-line glob patterns (`--ignore`)
//! - A `.relicenseignore` file at the workspace root (gitignore-style
//!   pattern matching)
//!
//! Excluded files are reported as skipped together with the rule family
//! that excluded them.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::verbose_log;

/// Name of the per-workspace ignore file.
pub const IGNORE_FILENAME: &str = ".relicenseignore";

/// Decides which collected files are excluded from the run.
///
/// Two rule families feed the decision: `--ignore` globs from the command
/// line and, once loaded, the workspace `.relicenseignore` file.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
///
/// use relicense::ignore::IgnoreManager;
///
/// # fn main() -> anyhow::Result<()> {
/// let manager = IgnoreManager::new(vec!["**/*.json".to_string()])?;
/// assert!(manager.is_ignored(Path::new("src/config.json")));
/// assert!(!manager.is_ignored(Path::new("src/main.rs")));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct IgnoreManager {
  /// Compiled `--ignore` globs, expanded per [`expand_cli_pattern`]
  cli_glob_set: GlobSet,

  /// Gitignore matcher for the workspace `.relicenseignore` file
  gitignore: Option<Gitignore>,

  /// Workspace root used for `.relicenseignore` matching
  root_dir: Option<PathBuf>,
}

/// Expands one `--ignore` value into the glob variants it stands for.
///
/// Users write ignore flags the way they write gitignore lines, so a single
/// value has to cover several glob spellings: `vendor/` means the directory
/// and its contents at any depth, a bare `vendor` could name a directory or
/// a file, and a real glob additionally gets an any-depth variant so it
/// still hits absolute paths.
fn expand_cli_pattern(pattern: &str) -> Vec<String> {
  // Windows separators are normalized so one flag value works everywhere.
  let pattern = pattern.replace('\\', "/");

  if let Some(dir) = pattern.strip_suffix('/') {
    return vec![
      dir.to_string(),
      format!("{}/**", dir),
      format!("**/{}/**", dir),
      format!("**/{}", dir),
    ];
  }

  if !pattern.contains('*') && !pattern.contains('?') {
    return vec![
      pattern.clone(),
      format!("**/{}", pattern),
      format!("{}/**", pattern),
      format!("**/{}/**", pattern),
    ];
  }

  let mut variants = vec![pattern.clone()];
  if !pattern.starts_with("**/") {
    variants.push(format!("**/{}", pattern));
  }
  variants
}

impl IgnoreManager {
  /// Compiles the `--ignore` patterns into a matcher.
  ///
  /// # Errors
  ///
  /// Returns an error naming the offending pattern if any value does not
  /// compile as a glob.
  pub fn new(cli_patterns: Vec<String>) -> Result<Self> {
    let mut builder = GlobSetBuilder::new();

    for pattern in &cli_patterns {
      for variant in expand_cli_pattern(pattern) {
        let glob = Glob::new(&variant).with_context(|| format!("invalid glob pattern '{}'", pattern))?;
        builder.add(glob);
      }
    }

    let cli_glob_set = builder.build().context("failed to compile ignore globs")?;

    Ok(Self {
      cli_glob_set,
      gitignore: None,
      root_dir: None,
    })
  }

  /// Loads the `.relicenseignore` file from the workspace root, if present.
  ///
  /// A missing file is not an error; the manager simply keeps matching on
  /// command-line patterns alone.
  ///
  /// # Errors
  ///
  /// Returns an error if the file exists but cannot be read, or contains an
  /// invalid pattern.
  pub fn load_ignore_file(&mut self, workspace_root: &Path) -> Result<()> {
    let ignore_path = workspace_root.join(IGNORE_FILENAME);
    if !ignore_path.exists() {
      verbose_log!("ignore: no {} in {}", IGNORE_FILENAME, workspace_root.display());
      return Ok(());
    }

    verbose_log!("ignore: reading {}", ignore_path.display());
    let content =
      fs::read_to_string(&ignore_path).with_context(|| format!("failed to read {}", ignore_path.display()))?;

    let mut builder = GitignoreBuilder::new(workspace_root);
    for line in content.lines() {
      if !line.trim().is_empty() && !line.trim().starts_with('#') {
        builder
          .add_line(None, line)
          .with_context(|| format!("invalid pattern in {}: '{}'", ignore_path.display(), line))?;
      }
    }

    self.gitignore = Some(builder.build().context("failed to compile the ignore file")?);
    self.root_dir = Some(workspace_root.to_path_buf());

    Ok(())
  }

  /// Checks if a file should be ignored, and why.
  ///
  /// Returns `Some(reason)` naming the rule family that excluded the file,
  /// or `None` if the file should be processed. The reason text ends up in
  /// reports, next to the skipped path.
  pub fn ignored_reason(&self, path: &Path) -> Option<String> {
    if self.cli_glob_set.is_match(path) {
      verbose_log!("ignore: {} (cli pattern)", path.display());
      return Some("matches ignore pattern".to_string());
    }

    // Gitignore matching wants paths relative to the root the file was
    // built against, so relative inputs are joined to it first.
    if let Some(ref gitignore) = self.gitignore
      && let Some(ref root_dir) = self.root_dir
    {
      let path = if path.is_absolute() {
        Cow::Borrowed(path)
      } else {
        Cow::Owned(root_dir.join(path))
      };
      if let Ok(rel_path) = path.strip_prefix(root_dir)
        && gitignore.matched_path_or_any_parents(rel_path, false).is_ignore()
      {
        verbose_log!("ignore: {} ({} pattern)", path.display(), IGNORE_FILENAME);
        return Some(format!("matches {} pattern", IGNORE_FILENAME));
      }
    }

    None
  }

  /// Whether any rule family excludes `path`.
  pub fn is_ignored(&self, path: &Path) -> bool {
    self.ignored_reason(path).is_some()
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_expansion_covers_directory_and_bare_names() {
    assert_eq!(expand_cli_pattern("vendor/"), vec!["vendor", "vendor/**", "**/vendor/**", "**/vendor"]);
    assert_eq!(expand_cli_pattern("vendor"), vec!["vendor", "**/vendor", "vendor/**", "**/vendor/**"]);
    assert_eq!(expand_cli_pattern("*.min.js"), vec!["*.min.js", "**/*.min.js"]);
    assert_eq!(expand_cli_pattern("**/gen/*.rs"), vec!["**/gen/*.rs"]);
  }

  #[test]
  fn test_glob_pattern_matches_anywhere() {
    let manager = IgnoreManager::new(vec!["*.generated.rs".to_string()]).expect("build manager");
    assert!(manager.is_ignored(Path::new("api.generated.rs")));
    assert!(manager.is_ignored(Path::new("src/deep/api.generated.rs")));
    assert!(!manager.is_ignored(Path::new("src/api.rs")));
  }

  #[test]
  fn test_directory_pattern_matches_contents() {
    let manager = IgnoreManager::new(vec!["target/".to_string()]).expect("build manager");
    assert!(manager.is_ignored(Path::new("target/debug/build.rs")));
    assert!(manager.is_ignored(Path::new("crates/a/target/x.rs")));
    assert!(!manager.is_ignored(Path::new("src/target.rs")));
  }

  #[test]
  fn test_plain_name_matches_directory_and_file() {
    let manager = IgnoreManager::new(vec!["vendor".to_string()]).expect("build manager");
    assert!(manager.is_ignored(Path::new("vendor")));
    assert!(manager.is_ignored(Path::new("vendor/lib.rs")));
    assert!(manager.is_ignored(Path::new("third_party/vendor/lib.rs")));
  }

  #[test]
  fn test_invalid_pattern_is_an_error() {
    let result = IgnoreManager::new(vec!["[".to_string()]);
    assert!(result.is_err());
  }

  #[test]
  fn test_ignore_file_patterns_apply() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(IGNORE_FILENAME), "generated/\n*.pb.cc\n").expect("write ignore file");

    let mut manager = IgnoreManager::new(vec![]).expect("build manager");
    manager.load_ignore_file(temp_dir.path()).expect("load ignore file");

    assert!(manager.is_ignored(&temp_dir.path().join("generated/api.cpp")));
    assert!(manager.is_ignored(&temp_dir.path().join("src/api.pb.cc")));
    assert!(!manager.is_ignored(&temp_dir.path().join("src/api.cpp")));
  }

  #[test]
  fn test_missing_ignore_file_is_fine() {
    let temp_dir = TempDir::new().expect("create temp dir");

    let mut manager = IgnoreManager::new(vec![]).expect("build manager");
    manager.load_ignore_file(temp_dir.path()).expect("missing file is a no-op");

    assert!(!manager.is_ignored(&temp_dir.path().join("src/main.rs")));
  }

  #[test]
  fn test_reason_names_the_rule_family() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(IGNORE_FILENAME), "docs/\n").expect("write ignore file");

    let mut manager = IgnoreManager::new(vec!["*.min.js".to_string()]).expect("build manager");
    manager.load_ignore_file(temp_dir.path()).expect("load ignore file");

    let cli_reason = manager.ignored_reason(Path::new("site/app.min.js")).expect("cli match");
    assert!(cli_reason.contains("ignore pattern"));

    let file_reason = manager
      .ignored_reason(&temp_dir.path().join("docs/readme.html"))
      .expect("ignore-file match");
    assert!(file_reason.contains(IGNORE_FILENAME));
  }
}
