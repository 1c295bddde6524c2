use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Process-wide output volume, interpreted by the logging macros.
///
/// Stored as the discriminant of [`OutputMode`]; starts at `Normal`.
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }

  fn current() -> Self {
    Self::from_u8(OUTPUT_MODE.load(Ordering::SeqCst))
  }
}

/// When to emit ANSI color codes, settable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Color when the stream is a terminal, plain otherwise
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Apply this color mode process-wide.
  ///
  /// owo-colors keeps the override state itself; `Auto` clears any previous
  /// override and falls back to per-stream TTY detection.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

/// Initializes the global `tracing` subscriber.
///
/// Diagnostics go to stderr so they never mix with the report output on
/// stdout. The default level follows the CLI flags (`error` when quiet,
/// then warn/info/debug/trace as `-v` is repeated); an explicit `RUST_LOG`
/// environment variable wins over both.
///
/// Safe to call more than once; only the first call installs a subscriber.
///
/// # Parameters
///
/// * `quiet` - Whether quiet mode was requested
/// * `verbosity` - Number of `-v` flags on the command line
pub fn init_tracing(quiet: bool, verbosity: u8) {
  let default_level = if quiet {
    "error"
  } else {
    match verbosity {
      0 => "warn",
      1 => "info",
      2 => "debug",
      _ => "trace",
    }
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Switches the process into verbose mode.
///
/// Turns on [`verbose_log!`](crate::verbose_log) output for the rest of the
/// run. Verbose and quiet are mutually exclusive at the CLI layer, so the
/// last caller wins here.
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

/// Whether [`verbose_log!`](crate::verbose_log) output is currently on.
pub fn is_verbose() -> bool {
  OutputMode::current() == OutputMode::Verbose
}

/// Whether stdout should be reduced to bare result lines.
pub fn is_quiet() -> bool {
  OutputMode::current() == OutputMode::Quiet
}
