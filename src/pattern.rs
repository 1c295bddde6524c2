//! # Header Pattern Module
//!
//! Compiles a literal license header into a whitespace-tolerant matcher.
//! Every non-whitespace token from the template must appear literally in the
//! file (regex metacharacters such as `*`, `(`, `)`, `.` and `<` are
//! escaped), while any run of whitespace in the template matches any run of
//! whitespace in the file. This lets one pattern recognize headers that
//! drifted apart in indentation, blank lines, or line endings.

use std::borrow::Cow;

use regex::{NoExpand, Regex};
use serde::Deserialize;

/// Where in a file a header match may begin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
  /// The header must be the first thing in the file. A whitespace-only
  /// prefix (blank lines, indentation) is absorbed into the match, so the
  /// replacement also normalizes leading blank lines away.
  #[default]
  Top,

  /// The first occurrence anywhere in the file is matched.
  Anywhere,
}

/// Error type for pattern compilation.
///
/// Compilation failure is fatal for a run: without a usable pattern no file
/// can be processed, so callers abort before touching any file.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
  /// The template contained no non-whitespace characters.
  #[error("header template is empty or whitespace-only")]
  EmptyTemplate,

  /// The generated expression was rejected by the regex engine.
  #[error("failed to compile header pattern: {source}")]
  Compile { source: regex::Error },
}

/// A compiled, whitespace-tolerant matcher for one header template.
///
/// Construction happens once per run; matching and replacement reuse the
/// compiled expression. The pattern never performs file I/O.
#[derive(Debug, Clone)]
pub struct HeaderPattern {
  regex: Regex,
  anchor: Anchor,
  token_count: usize,
}

impl HeaderPattern {
  /// Compile a literal header template into a matcher.
  ///
  /// The template is tokenized on whitespace; each token is escaped so it
  /// matches literally, and tokens are joined by "any whitespace run".
  /// Leading and trailing whitespace in the template carries no meaning.
  ///
  /// # Arguments
  ///
  /// * `template` - The current header text, exactly as it appears in files
  ///   (up to whitespace variation)
  /// * `anchor` - Where a match may begin (top of file or anywhere)
  ///
  /// # Errors
  ///
  /// Returns [`PatternError::EmptyTemplate`] when the template collapses to
  /// nothing, or [`PatternError::Compile`] when the regex engine rejects the
  /// generated expression (for example its compiled size limit).
  pub fn compile(template: &str, anchor: Anchor) -> Result<Self, PatternError> {
    let tokens: Vec<String> = template.split_whitespace().map(regex::escape).collect();
    if tokens.is_empty() {
      return Err(PatternError::EmptyTemplate);
    }

    let token_count = tokens.len();
    let body = tokens.join(r"\s+");
    let expression = match anchor {
      Anchor::Top => format!(r"\A\s*{body}"),
      Anchor::Anywhere => body,
    };

    let regex = Regex::new(&expression).map_err(|source| PatternError::Compile { source })?;

    Ok(Self {
      regex,
      anchor,
      token_count,
    })
  }

  /// Check whether the pattern matches anywhere in `content`, honoring the
  /// anchor mode.
  pub fn is_match(&self, content: &str) -> bool {
    self.regex.is_match(content)
  }

  /// Replace the first match in `content` with `replacement`.
  ///
  /// The replacement is inserted literally; `$` and `\` in the new header
  /// are never interpreted as capture references. Returns
  /// `Cow::Borrowed(content)` when the pattern does not match, so callers
  /// can distinguish "no match" from "replaced" without a second scan.
  pub fn replace_first<'a>(&self, content: &'a str, replacement: &str) -> Cow<'a, str> {
    self.regex.replacen(content, 1, NoExpand(replacement))
  }

  /// The anchor mode this pattern was compiled with.
  pub const fn anchor(&self) -> Anchor {
    self.anchor
  }

  /// Number of non-whitespace tokens in the compiled template.
  pub const fn token_count(&self) -> usize {
    self.token_count
  }
}
