#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Header text the fixture files start out with.
pub const OLD_HEADER: &str = concat!(
  "/*\n",
  " * This file is part of AcmeLib.\n",
  " *\n",
  " * AcmeLib is free software: you can redistribute it and/or modify\n",
  " * it under the terms of the GNU General Public License\n",
  " * (<http://www.gnu.org/licenses/>).\n",
  " */",
);

/// Header text the fixture files should end up with.
pub const NEW_HEADER: &str = concat!(
  "/*\n",
  " * This file is part of AcmeLib.\n",
  " *\n",
  " * SPDX-License-Identifier: Apache-2.0\n",
  " */",
);

/// Writes the old and new header templates into `dir` and returns their
/// paths.
pub fn write_templates(dir: &Path) -> Result<(PathBuf, PathBuf)> {
  let old_path = dir.join("old_header.txt");
  let new_path = dir.join("new_header.txt");
  fs::write(&old_path, OLD_HEADER)?;
  fs::write(&new_path, NEW_HEADER)?;
  Ok((old_path, new_path))
}

/// Builds file content carrying the old header above `body`.
pub fn source_with_header(body: &str) -> String {
  format!("{}\n\n{}", OLD_HEADER, body)
}

/// Creates a source file under `dir` carrying the old header above `body`.
/// Intermediate directories in `name` are created as needed.
pub fn write_source(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
  let path = dir.join(name);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, source_with_header(body))?;
  Ok(path)
}
