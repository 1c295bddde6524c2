//! # Rewrite Command
//!
//! This module implements the header rewrite command. This is the default
//! command when no subcommand is specified: it loads the old and new header
//! templates, collects the candidate files, and hands them to the rewriter.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::collector::FileCollector;
use crate::config::load_config;
use crate::diff::DiffManager;
use crate::ignore::IgnoreManager;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  CategorizedReports, print_blank_line, print_failed_files, print_hint, print_nothing_to_do, print_replaced_files,
  print_skipped_files, print_start_message, print_summary,
};
use crate::pattern::{Anchor, HeaderPattern};
use crate::report::{FileReport, ReportFormat, ReportGenerator, RunSummary};
use crate::rewriter::{Rewriter, RewriterConfig};
use crate::templates::HeaderTemplate;
use crate::tree::render_tree;

/// Flags and positionals accepted by a rewrite run.
#[derive(Args, Debug, Default)]
pub struct RewriteArgs {
  /// Files or directories to process. Directories are scanned recursively
  /// for the configured extensions.
  #[arg(required = false)]
  pub paths: Vec<PathBuf>,

  /// Plan tree mode: show a tree of files that would be processed without
  /// inspecting file contents
  #[arg(long, short = 't')]
  pub plan_tree: bool,

  /// Path to config file (default: .relicense.toml in the working directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Skip config file discovery even if a config file is present
  #[arg(long)]
  pub no_config: bool,

  /// Dry run mode: only report which files would change (default)
  #[arg(long, group = "mode", hide = true)]
  pub dry_run: bool,

  /// Modify mode: rewrite headers in place
  #[arg(
    long,
    group = "mode",
    help = "Modify mode: rewrite headers in place

[default: --dry-run]"
  )]
  pub modify: bool,

  /// Show diff of changes on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Save diff of changes to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// File holding the header text to search for
  #[arg(long, value_name = "FILE")]
  pub old_header: Option<PathBuf>,

  /// File holding the header text to insert. An empty file deletes the old
  /// header instead of replacing it.
  #[arg(long, value_name = "FILE")]
  pub new_header: Option<PathBuf>,

  /// Match the old header anywhere in a file instead of only at the top
  #[arg(long)]
  pub anywhere: bool,

  /// Glob patterns for files to skip (repeatable)
  #[arg(long, short = 'i')]
  pub ignore: Vec<String>,

  /// Only process files with these extensions when scanning directories
  /// (repeatable, case-insensitive)
  #[arg(long = "ext", value_name = "EXT")]
  pub extensions: Vec<String>,

  /// Increase diagnostic verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Quiet mode: print nothing but the affected file paths
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// When to color output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Generate a JSON report of the run and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Generate a CSV report of the run and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,
}

impl RewriteArgs {
  /// Checks constraints clap cannot express on its own.
  ///
  /// `paths` stays optional at the clap level so `--help` works bare, but a
  /// real run needs at least one path.
  fn validate(&self) -> Result<(), String> {
    if self.paths.is_empty() {
      return Err("Missing required argument: <PATHS>...".to_string());
    }
    Ok(())
  }
}

/// Entry point of a rewrite run; drives the whole pipeline.
pub fn run_rewrite(args: RewriteArgs) -> Result<()> {
  if let Err(e) = args.validate() {
    eprintln!("ERROR: {e}");
    process::exit(1);
  }

  init_tracing(args.quiet, args.verbose);
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let workspace_root = std::env::current_dir().context("failed to get current directory")?;

  let config = load_config(args.config.as_deref(), &workspace_root, args.no_config)?;
  if config.is_some() {
    debug!("applying defaults from the config file");
  }
  let config = config.unwrap_or_default();

  // CLI flags win over config values
  let old_header_path = resolve_template_path(args.old_header.as_deref(), config.old_template.as_deref(), &workspace_root);
  let new_header_path = resolve_template_path(args.new_header.as_deref(), config.new_template.as_deref(), &workspace_root);

  let extensions = if args.extensions.is_empty() {
    config.extensions
  } else {
    args.extensions.clone()
  };

  // Ignore patterns from the config file and the command line both apply
  let mut ignore_patterns = config.ignore;
  ignore_patterns.extend(args.ignore.iter().cloned());

  let collector = FileCollector::new(&extensions);
  let mut ignore_manager = IgnoreManager::new(ignore_patterns)?;
  ignore_manager.load_ignore_file(&workspace_root)?;

  // Plan-tree mode needs no templates, so it branches off before they load
  if args.plan_tree {
    return run_plan_tree(&args.paths, &collector, &ignore_manager, &workspace_root);
  }

  let Some(old_header_path) = old_header_path else {
    eprintln!("ERROR: Missing required argument: --old-header <FILE> (or old-template in the config file)");
    process::exit(1);
  };
  let Some(new_header_path) = new_header_path else {
    eprintln!("ERROR: Missing required argument: --new-header <FILE> (or new-template in the config file)");
    process::exit(1);
  };

  let old_header = HeaderTemplate::from_file(&old_header_path)?;
  let new_header = HeaderTemplate::from_file(&new_header_path)?;

  let anchor = if args.anywhere {
    Anchor::Anywhere
  } else {
    config.anchor.unwrap_or_default()
  };

  let pattern = HeaderPattern::compile(old_header.text(), anchor)
    .with_context(|| format!("failed to compile header pattern from {}", old_header_path.display()))?;

  // A replacement that still matches the pattern defeats idempotence: the
  // next run would rewrite every file all over again.
  if !new_header.is_empty() && pattern.is_match(new_header.text()) {
    eprintln!("Warning: the new header still matches the old header pattern; repeat runs will keep rewriting files");
  }

  // Dry run unless --modify was given (the flags are a clap group)
  let modify_mode = args.modify && !args.dry_run;

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff);
  diff_manager.init()?;

  // Collect candidates, then split off the ones the ignore rules exclude
  let candidates = collector.collect(&args.paths)?;
  debug!("collected {} candidate files", candidates.len());

  let mut files = Vec::new();
  let mut skipped_reports = Vec::new();
  for path in candidates {
    match ignore_manager.ignored_reason(&path) {
      Some(reason) => skipped_reports.push(FileReport::skipped(path, reason)),
      None => files.push(path),
    }
  }

  print_start_message(files.len(), modify_mode);

  if files.is_empty() {
    print_blank_line();
    print_nothing_to_do();
    return Ok(());
  }

  let start_time = Instant::now();

  let rewriter = Rewriter::new(RewriterConfig {
    dry_run: !modify_mode,
    diff_manager: Some(diff_manager),
    ..RewriterConfig::new(pattern, new_header)
  });
  let mut file_reports = rewriter.run(&files);

  let elapsed = start_time.elapsed();

  file_reports.extend(skipped_reports);

  let summary = RunSummary::from_reports(&file_reports, elapsed);
  let categorized = CategorizedReports::from_reports(&file_reports);

  print_blank_line();

  if categorized.replaced.is_empty() && !summary.has_failures() {
    print_nothing_to_do();
  } else {
    if !categorized.replaced.is_empty() {
      print_replaced_files(&categorized.replaced, Some(&workspace_root), modify_mode);
    }
    if !categorized.failed.is_empty() {
      if !categorized.replaced.is_empty() {
        print_blank_line();
      }
      print_failed_files(&categorized.failed, Some(&workspace_root));
    }
  }
  print_skipped_files(&categorized.skipped, Some(&workspace_root));

  print_blank_line();
  print_summary(&summary, modify_mode);

  if !modify_mode && !categorized.replaced.is_empty() {
    print_blank_line();
    print_hint("Run with --modify to write these changes.");
  }

  if let Some(ref output_path) = args.report_json {
    write_report(ReportFormat::Json, "JSON", output_path, &file_reports, &summary);
  }
  if let Some(ref output_path) = args.report_csv {
    write_report(ReportFormat::Csv, "CSV", output_path, &file_reports, &summary);
  }

  // Exit non-zero when files failed, or when a dry run found changes that
  // still need to be written
  if summary.has_failures() || (!modify_mode && !categorized.replaced.is_empty()) {
    process::exit(1);
  }

  Ok(())
}

/// Writes one run report, downgrading failures to a console note.
///
/// A report that cannot be written should not turn a successful rewrite run
/// into a failed one.
fn write_report(format: ReportFormat, label: &str, output_path: &Path, files: &[FileReport], summary: &RunSummary) {
  let generator = ReportGenerator::new(format, output_path);
  if let Err(e) = generator.generate(files, summary) {
    eprintln!("Error generating {} report: {}", label, e);
  } else {
    info_log!("Generated {} report at {}", label, output_path.display());
  }
}

/// Pick the CLI-provided template path, falling back to the config value.
///
/// Relative config paths resolve against the workspace root so a run started
/// from a subdirectory still finds the templates named in the config file.
/// CLI paths are taken as typed.
fn resolve_template_path(cli: Option<&Path>, config: Option<&Path>, workspace_root: &Path) -> Option<PathBuf> {
  match (cli, config) {
    (Some(path), _) => Some(path.to_path_buf()),
    (None, Some(path)) if path.is_relative() => Some(workspace_root.join(path)),
    (None, Some(path)) => Some(path.to_path_buf()),
    (None, None) => None,
  }
}

/// Run in plan-tree mode: show a tree of files that would be processed.
fn run_plan_tree(
  paths: &[PathBuf],
  collector: &FileCollector,
  ignore_manager: &IgnoreManager,
  workspace_root: &Path,
) -> Result<()> {
  let candidates = collector.collect(paths)?;
  let files: Vec<PathBuf> = candidates
    .into_iter()
    .filter(|path| !ignore_manager.is_ignored(path))
    .collect();

  let tree_output = render_tree(&files, Some(workspace_root));
  println!("{}", tree_output);

  Ok(())
}
