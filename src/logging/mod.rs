//! # Logging Module
//!
//! Console output plumbing with a strict stream split: results go to stdout,
//! everything else goes to stderr. Scripts can pipe stdout (summaries, file
//! lists, bare paths in quiet mode) while `tracing` diagnostics, verbose
//! notes, and diff previews stay on stderr.
//!
//! Three knobs control what is emitted:
//! - quiet mode silences [`info_log!`] entirely,
//! - verbose mode turns on [`verbose_log!`],
//! - [`ColorMode`] decides whether either stream gets ANSI colors.
//!
//! ## Example
//!
//! ```rust
//! use relicense::logging::{ColorMode, set_verbose};
//! use relicense::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! // Stderr, only because verbose mode is on.
//! verbose_log!("considering {}", "src/app.c");
//!
//! // Stdout, suppressed only by quiet mode.
//! info_log!("Rewrote header in: {}", "src/app.c");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Prints a diagnostic line to stderr when verbose mode is on.
///
/// Accepts the same format arguments as [`eprintln!`]. When verbose mode is
/// off (the default) the line is dropped without evaluating the formatting.
#[macro_export]
macro_rules! verbose_log {
  ($($arg:tt)*) => {
    if $crate::logging::is_verbose() {
      eprintln!($($arg)*);
    }
  };
}

/// Prints a result line to stdout unless quiet mode is on.
///
/// Accepts the same format arguments as [`println!`]. This is the channel
/// for user-facing progress and summary text; quiet mode reduces stdout to
/// the bare file lists printed elsewhere.
#[macro_export]
macro_rules! info_log {
  ($($arg:tt)*) => {
    if !$crate::logging::is_quiet() {
      $crate::logging::print_info_log(&format!($($arg)*));
    }
  };
}

/// Writes one [`info_log!`] line to stdout, colored when the stream allows.
///
/// Public only because the macro expands to a call into this module; not
/// meant to be called directly.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
