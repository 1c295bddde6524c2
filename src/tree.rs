//! # Tree Printing Module
//!
//! This module pretty-prints the set of files a run would touch as a tree,
//! similar to the Unix `tree` command. `--plan-tree` uses it to preview a
//! run without rewriting anything.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Render a list of file paths as a tree rooted at `base_path`.
///
/// Paths are shown relative to `base_path` when provided, duplicates are
/// collapsed, and a directory/file count summary is appended.
///
/// # Parameters
///
/// * `files` - A slice of file paths to display
/// * `base_path` - The base path to display as the root (if provided, paths
///   will be shown relative to it)
///
/// # Returns
///
/// A string containing the tree representation.
pub fn render_tree(files: &[PathBuf], base_path: Option<&Path>) -> String {
  if files.is_empty() {
    return "(no files)\n".to_string();
  }

  let mut entries: Vec<Vec<String>> = files
    .iter()
    .map(|file| {
      let relative = match base_path {
        Some(base) => file.strip_prefix(base).unwrap_or(file),
        None => file.as_path(),
      };
      relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect()
    })
    .collect();
  entries.sort();
  entries.dedup();

  let mut lines = Vec::new();
  lines.push(match base_path {
    Some(base) => base.display().to_string(),
    None => ".".to_string(),
  });

  // Tracks, per depth, whether the node currently being descended through
  // was the last child of its parent. Each level contributes either a
  // "│   " or "    " column to the prefix of deeper lines.
  let mut last_stack: Vec<bool> = Vec::new();
  let mut previous: &[String] = &[];

  for (index, entry) in entries.iter().enumerate() {
    let shared = shared_prefix_len(previous, entry);

    // Sorted order guarantees every component up to `shared` was already
    // printed for an earlier entry; only the divergent tail is new.
    for depth in shared..entry.len() {
      let is_last = is_last_child(&entries, index, depth);

      last_stack.truncate(depth);
      let mut line = String::new();
      for was_last in &last_stack {
        line.push_str(if *was_last { "    " } else { "│   " });
      }
      line.push_str(if is_last { "└── " } else { "├── " });
      line.push_str(&entry[depth]);
      lines.push(line);

      last_stack.push(is_last);
    }

    previous = entry;
  }

  let file_count = entries.len();
  let dir_count = count_directories(&entries);
  let dir_word = if dir_count == 1 { "directory" } else { "directories" };
  let file_word = if file_count == 1 { "file" } else { "files" };

  lines.push(String::new()); // Empty line before summary
  lines.push(format!("{} {}, {} {}", dir_count, dir_word, file_count, file_word));

  lines.join("\n")
}

/// Length of the longest common leading run of components.
fn shared_prefix_len(a: &[String], b: &[String]) -> usize {
  a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Whether the node `entries[index][depth]` is the last child of its parent.
///
/// Entries sharing a parent prefix are contiguous in the sorted list, so the
/// scan stops as soon as the parent's block ends.
fn is_last_child(entries: &[Vec<String>], index: usize, depth: usize) -> bool {
  let parent = &entries[index][..depth];
  let name = &entries[index][depth];

  for later in &entries[index + 1..] {
    if later.len() <= depth || &later[..depth] != parent {
      break;
    }
    if &later[depth] != name {
      return false;
    }
  }

  true
}

/// Count the distinct directories spanned by the entries.
fn count_directories(entries: &[Vec<String>]) -> usize {
  let mut seen: HashSet<&[String]> = HashSet::new();
  for entry in entries {
    for depth in 1..entry.len() {
      seen.insert(&entry[..depth]);
    }
  }
  seen.len()
}
