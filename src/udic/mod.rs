//! # Metadata Descriptor
//!
//! A [`Udic`] describes the acquisition and domain state of every dimension of
//! a spectrum, plus a little provenance (source format and name).
//!
//! Descriptors are plain values. Once a descriptor is bound to a
//! [`TaggedArray`](crate::array::TaggedArray) it is only ever read; every
//! change (transpose, domain flip, dropping the imaginary part) produces a
//! new descriptor through one of the `with_*` methods.
//!
//! ## Storage convention
//!
//! The `complex` flag of the **last** dimension means the samples are stored
//! as complex values. On any other dimension it means real and imaginary
//! rows are interleaved along that axis (hypercomplex layout).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

#[cfg(test)]
mod tests;

/// Errors raised when a descriptor breaks its own invariants
#[derive(Debug, thiserror::Error)]
pub enum UdicError {
    /// A descriptor must describe at least one dimension
    #[error("descriptor has no dimensions")]
    Empty,

    /// Exactly one of `freq`/`time` must be set
    #[error("dimension {0} must be flagged as exactly one of time or frequency domain")]
    DomainFlags(usize),

    /// Every dimension holds at least one sample
    #[error("dimension {0} has zero size")]
    ZeroSize(usize),

    /// Dimension index past `ndim`
    #[error("dimension {index} out of range for a {ndim}-dimensional descriptor")]
    DimensionOutOfRange {
        /// Requested dimension
        index: usize,
        /// Number of dimensions in the descriptor
        ndim: usize,
    },

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Instrument format a spectrum was ingested from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginalFormat {
    /// Bruker TopSpin acquisition directory
    Bruker,
    /// NMRPipe file
    Pipe,
}

impl fmt::Display for OriginalFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginalFormat::Bruker => write!(f, "Bruker"),
            OriginalFormat::Pipe => write!(f, "Pipe"),
        }
    }
}

/// Time or frequency domain of a single dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// Free induction decay, sampled in time
    Time,
    /// Fourier transformed
    Frequency,
}

/// Acquisition attributes of one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionInfo {
    /// Number of samples along this axis
    pub size: usize,

    /// Whether the dimension carries a real/imaginary pair
    pub complex: bool,

    /// Frequency-domain flag (exclusive with `time`)
    pub freq: bool,

    /// Time-domain flag (exclusive with `freq`)
    pub time: bool,

    /// Sweep width in Hz
    pub sw: f64,

    /// Observe frequency in MHz
    pub obs: f64,

    /// Carrier offset in Hz
    pub car: f64,

    /// Nucleus label (e.g. "1H", "13C")
    #[serde(default)]
    pub label: String,
}

impl DimensionInfo {
    /// Create a dimension in the given domain with an empty label
    pub fn new(size: usize, complex: bool, domain: Domain, sw: f64, obs: f64, car: f64) -> Self {
        Self {
            size,
            complex,
            freq: domain == Domain::Frequency,
            time: domain == Domain::Time,
            sw,
            obs,
            car,
            label: String::new(),
        }
    }

    /// Builder-style label setter
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Domain of this dimension. `freq` wins if both flags are (wrongly) set.
    pub fn domain(&self) -> Domain {
        if self.freq {
            Domain::Frequency
        } else {
            Domain::Time
        }
    }

    /// Set both domain flags consistently
    pub fn set_domain(&mut self, domain: Domain) {
        self.freq = domain == Domain::Frequency;
        self.time = domain == Domain::Time;
    }
}

/// Per-dimension and global metadata of a spectrum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Udic {
    /// Per-dimension entries, axis order
    dims: Vec<DimensionInfo>,

    /// Format the data was ingested from, if any
    pub original_format: Option<OriginalFormat>,

    /// Provenance name (usually the source path)
    #[serde(rename = "Name", default)]
    pub name: String,
}

impl Udic {
    /// Create a descriptor from its dimensions.
    ///
    /// The dimension list is validated; see [`Udic::validate`].
    pub fn new(dims: Vec<DimensionInfo>) -> Result<Self, UdicError> {
        let udic = Self {
            dims,
            original_format: None,
            name: String::new(),
        };
        udic.validate()?;
        Ok(udic)
    }

    /// Tag the descriptor with its provenance
    pub fn with_provenance(mut self, format: OriginalFormat, name: impl Into<String>) -> Self {
        self.original_format = Some(format);
        self.name = name.into();
        self
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// All dimension entries
    pub fn dims(&self) -> &[DimensionInfo] {
        &self.dims
    }

    /// Dimension entry, if `index < ndim`
    pub fn get(&self, index: usize) -> Option<&DimensionInfo> {
        self.dims.get(index)
    }

    /// Entry of the last (directly detected) dimension
    pub fn last(&self) -> &DimensionInfo {
        // validate() rejects empty descriptors
        &self.dims[self.dims.len() - 1]
    }

    /// Sizes of every dimension, axis order
    pub fn sizes(&self) -> Vec<usize> {
        self.dims.iter().map(|d| d.size).collect()
    }

    /// Check the structural invariants: at least one dimension, non-zero sizes
    /// and exactly one domain flag per dimension.
    pub fn validate(&self) -> Result<(), UdicError> {
        if self.dims.is_empty() {
            return Err(UdicError::Empty);
        }
        for (i, dim) in self.dims.iter().enumerate() {
            if dim.size == 0 {
                return Err(UdicError::ZeroSize(i));
            }
            if dim.freq == dim.time {
                return Err(UdicError::DomainFlags(i));
            }
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), UdicError> {
        if index >= self.dims.len() {
            return Err(UdicError::DimensionOutOfRange {
                index,
                ndim: self.dims.len(),
            });
        }
        Ok(())
    }

    /// Copy with one dimension entry replaced
    pub fn with_dimension(&self, index: usize, info: DimensionInfo) -> Result<Self, UdicError> {
        self.check_index(index)?;
        let mut copy = self.clone();
        copy.dims[index] = info;
        copy.validate()?;
        Ok(copy)
    }

    /// Copy with two dimension entries exchanged
    pub fn swapped(&self, a: usize, b: usize) -> Result<Self, UdicError> {
        self.check_index(a)?;
        self.check_index(b)?;
        let mut copy = self.clone();
        copy.dims.swap(a, b);
        Ok(copy)
    }

    /// Copy with the `complex` flag of one dimension changed
    pub fn with_complex(&self, index: usize, complex: bool) -> Result<Self, UdicError> {
        self.check_index(index)?;
        let mut copy = self.clone();
        copy.dims[index].complex = complex;
        Ok(copy)
    }

    /// Copy with the domain of one dimension changed
    pub fn with_domain(&self, index: usize, domain: Domain) -> Result<Self, UdicError> {
        self.check_index(index)?;
        let mut copy = self.clone();
        copy.dims[index].set_domain(domain);
        Ok(copy)
    }

    /// Copy with every dimension size replaced by `shape`.
    ///
    /// The shape must have exactly `ndim` entries.
    pub fn with_sizes(&self, shape: &[usize]) -> Result<Self, UdicError> {
        if shape.len() != self.dims.len() {
            return Err(UdicError::DimensionOutOfRange {
                index: shape.len(),
                ndim: self.dims.len(),
            });
        }
        let mut copy = self.clone();
        for (dim, &size) in copy.dims.iter_mut().zip(shape) {
            dim.size = size;
        }
        copy.validate()?;
        Ok(copy)
    }

    /// Per dimension, whether it is currently in the time domain
    pub fn is_time_domain(&self) -> Vec<bool> {
        self.dims.iter().map(|d| d.time).collect()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, UdicError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, UdicError> {
        let udic: Self = serde_json::from_str(json)?;
        udic.validate()?;
        Ok(udic)
    }
}

impl Index<usize> for Udic {
    type Output = DimensionInfo;

    fn index(&self, index: usize) -> &Self::Output {
        &self.dims[index]
    }
}
