//! # CLI Module
//!
//! Argument parsing and the driver for a rewrite run. Arguments live on a
//! flattened [`RewriteArgs`] so `relicense ...` and `relicense rewrite ...`
//! accept the same flags; the subcommand form exists for future verbs.

mod rewrite;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
pub use rewrite::{RewriteArgs, run_rewrite};

const HELP_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold());

/// Command line surface of the tool.
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = HELP_STYLES,
  after_help = "Examples:
  # Preview which files still carry the old header
  relicense --old-header OLD_HEADER.txt --new-header NEW_HEADER.txt --ext rs src/

  # Rewrite headers in place
  relicense --modify --old-header OLD_HEADER.txt --new-header NEW_HEADER.txt --ext cpp --ext h src/ include/

  # Show a diff of the pending changes without writing anything
  relicense --show-diff --old-header OLD_HEADER.txt --new-header NEW_HEADER.txt --ext py scripts/

  # Save the diff to a file
  relicense --save-diff changes.diff --old-header OLD_HEADER.txt --new-header NEW_HEADER.txt --ext rs src/

  # Match the old header anywhere in a file, not only at the top
  relicense --anywhere --old-header OLD_HEADER.txt --new-header NEW_HEADER.txt --ext c src/

  # Ignore specific files or patterns
  relicense --ignore \"**/vendor/**\" --ignore \"*.gen.rs\" --old-header OLD_HEADER.txt --new-header NEW_HEADER.txt --ext rs .

  # Generate a JSON report of the run
  relicense --report-json report.json --old-header OLD_HEADER.txt --new-header NEW_HEADER.txt --ext rs src/
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  #[command(flatten)]
  pub rewrite_args: RewriteArgs,
}

/// Subcommand verbs; rewriting is also reachable without one.
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Rewrite license headers in source files (default)
  Rewrite(RewriteArgs),
}

impl Cli {
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// The rewrite arguments, from the subcommand when given, else top-level.
  pub fn get_rewrite_args(self) -> RewriteArgs {
    match self.command {
      Some(Command::Rewrite(args)) => args,
      None => self.rewrite_args,
    }
  }
}
