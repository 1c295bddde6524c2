//! # relicense
//!
//! A tool that swaps one license header for another across a source tree.

use anyhow::Result;
use relicense::cli::{Cli, run_rewrite};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_rewrite(cli.get_rewrite_args())
}
