//! # nmrpro
//!
//! Command-line front end for the `nmrpro` spectrum model.
//!
//! ## Usage
//!
//! ```bash
//! # Process a synthetic FID with the built-in recipe
//! nmrpro demo
//!
//! # Use a recipe and settings file
//! nmrpro -v demo --recipe recipes/1d.toml --config nmrpro.toml
//!
//! # Check a recipe
//! nmrpro recipe recipes/1d.toml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
