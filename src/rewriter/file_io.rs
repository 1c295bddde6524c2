//! # File I/O Module
//!
//! Reading and atomic write-back for the rewriter. Failures are typed per
//! file so a failed read stays distinguishable from a failed write all the
//! way into reports; neither kind aborts a run.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Error type for per-file operations.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
  /// The file could not be read, or its content is not valid UTF-8.
  #[error("Failed to read '{path}': {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// The rewritten content could not be persisted. The original file is
  /// left untouched.
  #[error("Failed to write '{path}': {source}")]
  Write { path: PathBuf, source: std::io::Error },
}

impl FileError {
  /// The path of the file the operation failed on.
  pub fn path(&self) -> &Path {
    match self {
      Self::Read { path, .. } | Self::Write { path, .. } => path,
    }
  }

  /// The underlying I/O error message, without the path prefix.
  ///
  /// Report entries already carry the path; repeating it in the detail
  /// column would only add noise.
  pub fn detail(&self) -> String {
    match self {
      Self::Read { source, .. } | Self::Write { source, .. } => source.to_string(),
    }
  }
}

/// File I/O operations for the rewriter.
///
/// This struct provides static methods for reading files and atomically
/// replacing their content.
pub struct FileIO;

impl FileIO {
  /// Read the complete file content as UTF-8 text.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to read
  ///
  /// # Errors
  ///
  /// Returns [`FileError::Read`] when the file cannot be opened or its
  /// content is not valid UTF-8.
  pub fn read_full_content(path: &Path) -> Result<String, FileError> {
    fs::read_to_string(path).map_err(|source| FileError::Read {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Atomically replace the content of `path`.
  ///
  /// The new content is staged in a temporary file in the same directory,
  /// the original file's permissions are copied onto the stage, and the
  /// stage is renamed over the destination. A failure at any step leaves the
  /// original file exactly as it was.
  ///
  /// # Parameters
  ///
  /// * `path` - Path of an existing file to replace
  /// * `content` - The full new content
  ///
  /// # Errors
  ///
  /// Returns [`FileError::Write`] when staging, permission transfer, or the
  /// final rename fails.
  pub fn write_atomic(path: &Path, content: &str) -> Result<(), FileError> {
    let dir = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let mut stage = NamedTempFile::new_in(dir).map_err(|source| FileError::Write {
      path: path.to_path_buf(),
      source,
    })?;

    stage.write_all(content.as_bytes()).map_err(|source| FileError::Write {
      path: path.to_path_buf(),
      source,
    })?;

    // Temp files are created 0600; carry over the original mode so the
    // rewrite does not change who can read the file.
    let permissions = fs::metadata(path)
      .map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
      })?
      .permissions();
    stage
      .as_file()
      .set_permissions(permissions)
      .map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
      })?;

    stage.persist(path).map_err(|e| FileError::Write {
      path: path.to_path_buf(),
      source: e.error,
    })?;

    Ok(())
  }
}
