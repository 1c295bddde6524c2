//! # Configuration Module
//!
//! Repository-level defaults from a `.relicense.toml` file, so template
//! paths, the extension set, ignore patterns, and the anchoring mode live
//! next to the code instead of being repeated on every invocation.
//!
//! The file is found via `--config`, the `RELICENSE_CONFIG` environment
//! variable, or the workspace root, in that order. Command-line flags
//! always win over config values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::pattern::Anchor;
use crate::verbose_log;

/// File name probed for in the workspace root.
pub const DEFAULT_CONFIG_FILENAME: &str = ".relicense.toml";

/// Environment variable that points at a config file explicitly.
pub const CONFIG_ENV_VAR: &str = "RELICENSE_CONFIG";

/// Main configuration struct for relicense.
///
/// This struct is loaded from a `.relicense.toml` file and carries defaults
/// for everything a run needs besides the paths to process.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Config {
  /// Path to the template holding the current header text.
  #[serde(default, rename = "old-template")]
  pub old_template: Option<PathBuf>,

  /// Path to the template holding the new header text.
  #[serde(default, rename = "new-template")]
  pub new_template: Option<PathBuf>,

  /// File extensions to process when scanning directories.
  /// Entries are matched case-insensitively; a leading dot is optional.
  #[serde(default)]
  pub extensions: Vec<String>,

  /// Glob patterns for files to skip.
  #[serde(default)]
  pub ignore: Vec<String>,

  /// Where a header match may begin ("top" or "anywhere").
  #[serde(default)]
  pub anchor: Option<Anchor>,
}

/// Ways loading a config file can fail. All of them abort the run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("cannot read config file '{path}': {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("config file '{path}' is not valid TOML: {source}")]
  Parse { path: PathBuf, source: toml::de::Error },

  /// A configuration value is invalid.
  #[error("invalid config value for '{field}': {message}")]
  Invalid { field: String, message: String },
}

impl Config {
  /// Reads and parses the config file at `path`, then validates it.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("reading config file {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Rejects list entries that are empty or whitespace-only. Those are
  /// almost always an editing accident and would otherwise match nothing
  /// (or, for ignore patterns, everything).
  fn validate(&self) -> Result<(), ConfigError> {
    if self.extensions.iter().any(|ext| ext.trim().is_empty()) {
      return Err(ConfigError::Invalid {
        field: "extensions".to_string(),
        message: "entries cannot be empty".to_string(),
      });
    }

    if self.ignore.iter().any(|pattern| pattern.trim().is_empty()) {
      return Err(ConfigError::Invalid {
        field: "ignore".to_string(),
        message: "entries cannot be empty".to_string(),
      });
    }

    Ok(())
  }
}

/// Picks the config file to use, if any.
///
/// Probes, in order: the `--config` flag value, the `RELICENSE_CONFIG`
/// environment variable, then `.relicense.toml` in the workspace root. An
/// explicit flag that points at a missing file ends the search rather than
/// silently falling through to a different file.
pub fn discover_config_path(explicit_path: Option<&Path>, workspace_root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("config: using {} (--config)", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("config: --config path {} does not exist", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("config: using {} (from {})", path.display(), CONFIG_ENV_VAR);
      return Some(path);
    }
    verbose_log!("config: {} points at missing path {}", CONFIG_ENV_VAR, env_path);
  }

  let workspace_config = workspace_root.join(DEFAULT_CONFIG_FILENAME);
  if workspace_config.exists() {
    verbose_log!("config: using {}", workspace_config.display());
    return Some(workspace_config);
  }

  verbose_log!("config: no file found");
  None
}

/// Discovers and loads the config file, honoring `--no-config`.
///
/// Returns `Ok(None)` when discovery is disabled or finds nothing; a file
/// that exists but fails to load is an error, never ignored.
pub fn load_config(explicit_path: Option<&Path>, workspace_root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("config: discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, workspace_root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
