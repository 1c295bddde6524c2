//! # relicense
//!
//! A tool that swaps one license header for another across a source tree.
//!
//! `relicense` takes the exact text of the current header and the exact text of its
//! replacement, finds the first occurrence of the old header in each file regardless of
//! whitespace layout, and rewrites it in place. Files that do not contain the old header
//! are left byte for byte untouched, so runs are idempotent and safe to repeat.
//!
//! ## Features
//!
//! * Recursively scan directories and rewrite headers in files matching an extension list
//! * Whitespace-tolerant matching, so reflowed or re-indented headers still match
//! * Dry-run mode (default) that reports pending changes without writing
//! * Atomic writes: changed files are staged to a temp file and renamed into place
//! * Ignore patterns and a `.relicenseignore` file to exclude files or directories
//! * Diff preview, JSON/CSV run reports, and a plan-tree view of the candidate set
//!
//! ## Usage as a Library
//!
//! This crate can be used as a library in your Rust projects:
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! use relicense::pattern::{Anchor, HeaderPattern};
//! use relicense::rewriter::{Rewriter, RewriterConfig};
//! use relicense::templates::HeaderTemplate;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Load the header being replaced and its replacement
//!     let old_header = HeaderTemplate::from_file(Path::new("OLD_HEADER.txt"))?;
//!     let new_header = HeaderTemplate::from_file(Path::new("NEW_HEADER.txt"))?;
//!
//!     // Compile the old header into a whitespace-tolerant matcher
//!     let pattern = HeaderPattern::compile(old_header.text(), Anchor::Top)?;
//!
//!     // Rewrite in place
//!     let rewriter = Rewriter::new(RewriterConfig::new(pattern, new_header));
//!     let reports = rewriter.run(&[PathBuf::from("src/main.c")]);
//!
//!     for report in &reports {
//!         println!("{}: {}", report.path.display(), report.action);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`pattern`] - Whitespace-tolerant header matching
//! * [`rewriter`] - Core functionality for rewriting files
//! * [`templates`] - Header template loading and normalization
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`pattern`]: crate::pattern
//! [`rewriter`]: crate::rewriter
//! [`templates`]: crate::templates
//! [`logging`]: crate::logging

pub mod cli;
pub mod collector;
pub mod config;
pub mod diff;
pub mod ignore;
pub mod logging;
pub mod output;
pub mod pattern;
pub mod report;
pub mod rewriter;
pub mod templates;
pub mod tree;
