//! # Templates Module
//!
//! Loading of header templates. A run is driven by two templates: the
//! *current* header (compiled into a [`HeaderPattern`](crate::pattern::HeaderPattern))
//! and the *new* header (inserted literally in its place). Templates are
//! normalized once at the load boundary, so the matcher and the rewriter
//! always see LF line endings and no trailing whitespace.
//!
//! ## Example
//!
//! ```rust
//! use relicense::pattern::{Anchor, HeaderPattern};
//! use relicense::templates::HeaderTemplate;
//!
//! # fn main() -> anyhow::Result<()> {
//! let old = HeaderTemplate::from_text("// Copyright 2019 Acme Corp.");
//! let new = HeaderTemplate::from_text("// Copyright 2026 Acme Corp.");
//!
//! let pattern = HeaderPattern::compile(old.text(), Anchor::Top)?;
//! let rewritten = pattern.replace_first("// Copyright  2019 Acme Corp.\nfn main() {}\n", new.text());
//! assert!(rewritten.starts_with("// Copyright 2026"));
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::verbose_log;

/// A literal header template.
///
/// Holds the canonical text of one header block. CRLF line endings are
/// normalized to LF and trailing whitespace is trimmed when the template is
/// created; the text inside lines is kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
  text: String,
}

impl HeaderTemplate {
  /// Load a template from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the template file
  ///
  /// # Errors
  ///
  /// Returns an error if the file does not exist, cannot be read, or is not
  /// valid UTF-8.
  pub fn from_file(path: &Path) -> Result<Self> {
    verbose_log!("Loading header template from: {}", path.display());

    let raw =
      fs::read_to_string(path).with_context(|| format!("Failed to read header template file: {}", path.display()))?;

    Ok(Self::from_text(&raw))
  }

  /// Create a template from a string, applying the same normalization as
  /// [`from_file`](Self::from_file).
  pub fn from_text(raw: &str) -> Self {
    let text = raw.replace("\r\n", "\n").trim_end().to_string();
    Self { text }
  }

  /// The normalized template text.
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Whether the template contains no non-whitespace characters.
  ///
  /// An empty *current* template cannot be compiled into a pattern; an empty
  /// *new* template is legal and means "remove the matched header".
  pub fn is_empty(&self) -> bool {
    self.text.trim().is_empty()
  }
}
