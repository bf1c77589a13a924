//! TOML configuration file support.
//!
//! Demo settings can live in a config file instead of CLI flags:
//!
//! ```toml
//! # nmrpro.toml
//! [demo]
//! size = 256
//! sweep_width = 8000.0
//! observe = 600.13
//! carrier = 2820.0
//! recipe = "recipes/1d.toml"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for nmrpro.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Demo-specific settings.
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Configuration for the demo command.
#[derive(Debug, Default, Deserialize)]
pub struct DemoConfig {
    /// Number of complex points in the synthetic FID.
    pub size: Option<usize>,

    /// Sweep width in Hz.
    pub sweep_width: Option<f64>,

    /// Observe frequency in MHz.
    pub observe: Option<f64>,

    /// Carrier offset in Hz.
    pub carrier: Option<f64>,

    /// Processing recipe applied to the FID.
    pub recipe: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
