//! Processing recipes: named operation lists stored as TOML.
//!
//! ```toml
//! [[step]]
//! name = "apodize"
//! op = "exponential_apodization"
//! line_broadening = 1.0
//!
//! [[step]]
//! name = "ft"
//! op = "forward_fourier"
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use super::{Operation, Spectrum, SpectrumError};

/// Errors that can occur while loading or applying a recipe
#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    /// I/O error reading the recipe file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Recipe is not valid TOML or names an unknown operation
    #[error("invalid recipe: {0}")]
    Parse(#[from] toml::de::Error),

    /// Recipe could not be written as TOML
    #[error("failed to serialize recipe: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Applying a step failed
    #[error("spectrum error: {0}")]
    Spectrum(#[from] SpectrumError),
}

/// One named step of a [`Recipe`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    /// History step name
    pub name: String,
    /// The operation
    #[serde(flatten)]
    pub operation: Operation,
}

/// Ordered list of named operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Steps in application order
    #[serde(rename = "step", default)]
    pub steps: Vec<RecipeStep>,
}

impl Recipe {
    /// Empty recipe
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a step at the end
    pub fn with_step(mut self, name: impl Into<String>, operation: Operation) -> Self {
        self.steps.push(RecipeStep {
            name: name.into(),
            operation,
        });
        self
    }

    /// Load a recipe from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RecipeError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String, RecipeError> {
        Ok(toml::to_string(self)?)
    }

    /// Append every step to the spectrum's history, in order
    pub fn apply_to(&self, spectrum: &Spectrum) -> Result<Spectrum, RecipeError> {
        let mut current = spectrum.clone();
        for step in &self.steps {
            debug!("Applying recipe step '{}' ({})", step.name, step.operation);
            current = current.apply(step.operation.clone(), &step.name)?;
        }
        Ok(current)
    }
}

impl FromStr for Recipe {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
