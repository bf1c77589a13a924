use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nmrpro::spectrum::Recipe;

mod config;
mod demo;

/// nmrpro - NMR processing with a replayable history
#[derive(Parser)]
#[command(name = "nmrpro")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a synthetic 1D FID and print a summary
    Demo {
        /// Number of complex points
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Sweep width in Hz
        #[arg(long)]
        sweep_width: Option<f64>,

        /// Observe frequency in MHz
        #[arg(long)]
        observe: Option<f64>,

        /// Carrier offset in Hz
        #[arg(long)]
        carrier: Option<f64>,

        /// Processing recipe (TOML)
        #[arg(short = 'r', long, value_name = "FILE")]
        recipe: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Validate a processing recipe and print its steps as JSON
    Recipe {
        /// Recipe file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Demo {
            size,
            sweep_width,
            observe,
            carrier,
            recipe,
            config,
        } => {
            let overrides = demo::DemoOverrides {
                size,
                sweep_width,
                observe,
                carrier,
                recipe,
            };
            demo::run(demo::DemoSettings::resolve(overrides, config.as_deref())?)
        }
        Commands::Recipe { file } => {
            let recipe = Recipe::from_file(&file)
                .with_context(|| format!("Failed to load recipe: {}", file.display()))?;
            println!("{}", serde_json::to_string_pretty(&recipe.steps)?);
            Ok(())
        }
    }
}
