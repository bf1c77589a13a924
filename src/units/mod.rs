//! # Coordinate System
//!
//! Index ↔ physical unit conversion, one [`UnitConversion`] per dimension.
//!
//! The conversion follows the usual NMR axis layout: the carrier sits at the
//! centre of the spectrum and the chemical shift decreases with the sample
//! index.
//!
//! ```text
//!   delta = -sw / (size * obs)          ppm per point
//!   first = car / obs - delta * size/2   ppm of point 0
//!   ppm(i) = first + i * delta
//! ```
//!
//! Conversions never clamp: an index or unit value outside the axis is an
//! [`UnitError::InvalidArgument`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::udic::{DimensionInfo, Udic};


/// Errors raised by unit conversion
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    /// Out-of-range index/value, unknown unit or unusable acquisition parameters
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Physical units an axis position can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Chemical shift, parts per million
    Ppm,
    /// Frequency offset in Hz
    Hz,
    /// Sample index
    Points,
    /// Position as a percentage of the axis
    Percent,
    /// Acquisition time in seconds
    Seconds,
    /// Acquisition time in milliseconds
    Milliseconds,
    /// Acquisition time in microseconds
    Microseconds,
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ppm" => Ok(Unit::Ppm),
            "hz" => Ok(Unit::Hz),
            "pts" | "points" => Ok(Unit::Points),
            "%" | "percent" => Ok(Unit::Percent),
            "s" | "sec" | "seconds" => Ok(Unit::Seconds),
            "ms" => Ok(Unit::Milliseconds),
            "us" => Ok(Unit::Microseconds),
            other => Err(UnitError::InvalidArgument(format!("unknown unit '{other}'"))),
        }
    }
}

/// Tolerance, in points, for positions that land a hair outside the axis
const EDGE_TOLERANCE: f64 = 1e-9;

/// Stateless converter for a single dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConversion {
    size: usize,
    complex: bool,
    sw: f64,
    obs: f64,
    car: f64,
    delta: f64,
    first: f64,
}

impl UnitConversion {
    /// Build a converter from `(size, complex, sw, obs, car)`.
    ///
    /// `size` must be at least one, `sw` and `obs` positive and finite.
    pub fn new(size: usize, complex: bool, sw: f64, obs: f64, car: f64) -> Result<Self, UnitError> {
        if size == 0 {
            return Err(UnitError::InvalidArgument("axis size must be at least 1".into()));
        }
        if !(sw.is_finite() && sw > 0.0) {
            return Err(UnitError::InvalidArgument(format!(
                "sweep width must be positive, got {sw}"
            )));
        }
        if !(obs.is_finite() && obs > 0.0) {
            return Err(UnitError::InvalidArgument(format!(
                "observe frequency must be positive, got {obs}"
            )));
        }
        if !car.is_finite() {
            return Err(UnitError::InvalidArgument(format!(
                "carrier must be finite, got {car}"
            )));
        }

        let delta = -sw / (size as f64 * obs);
        let first = car / obs - delta * size as f64 / 2.0;
        Ok(Self {
            size,
            complex,
            sw,
            obs,
            car,
            delta,
            first,
        })
    }

    /// Build a converter from a descriptor entry
    pub fn from_dimension(dim: &DimensionInfo) -> Result<Self, UnitError> {
        Self::new(dim.size, dim.complex, dim.sw, dim.obs, dim.car)
    }

    /// Number of points on the axis
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the axis was built for complex data
    pub fn is_complex(&self) -> bool {
        self.complex
    }

    /// Sweep width (Hz)
    pub fn sw(&self) -> f64 {
        self.sw
    }

    /// Observe frequency (MHz)
    pub fn obs(&self) -> f64 {
        self.obs
    }

    /// Carrier (Hz)
    pub fn car(&self) -> f64 {
        self.car
    }

    fn last_index(&self) -> f64 {
        (self.size - 1) as f64
    }

    fn check_index(&self, index: f64) -> Result<(), UnitError> {
        if !index.is_finite()
            || index < -EDGE_TOLERANCE
            || index > self.last_index() + EDGE_TOLERANCE
        {
            return Err(UnitError::InvalidArgument(format!(
                "index {index} outside axis [0, {}]",
                self.last_index()
            )));
        }
        Ok(())
    }

    /// Convert a (possibly fractional) sample index to `unit`
    pub fn to_unit(&self, index: f64, unit: Unit) -> Result<f64, UnitError> {
        self.check_index(index)?;
        let value = match unit {
            Unit::Ppm => self.first + index * self.delta,
            Unit::Hz => (self.first + index * self.delta) * self.obs,
            Unit::Points => index,
            Unit::Percent => {
                if self.size == 1 {
                    0.0
                } else {
                    index * 100.0 / self.last_index()
                }
            }
            Unit::Seconds => index / self.sw,
            Unit::Milliseconds => index / self.sw * 1e3,
            Unit::Microseconds => index / self.sw * 1e6,
        };
        Ok(value)
    }

    /// Convert a value in `unit` to a (fractional) sample index
    pub fn to_index(&self, value: f64, unit: Unit) -> Result<f64, UnitError> {
        if !value.is_finite() {
            return Err(UnitError::InvalidArgument(format!("non-finite {unit:?} value")));
        }
        let index = match unit {
            Unit::Ppm => (value - self.first) / self.delta,
            Unit::Hz => (value / self.obs - self.first) / self.delta,
            Unit::Points => value,
            Unit::Percent => value * self.last_index() / 100.0,
            Unit::Seconds => value * self.sw,
            Unit::Milliseconds => value * self.sw / 1e3,
            Unit::Microseconds => value * self.sw / 1e6,
        };
        self.check_index(index)?;
        Ok(index)
    }

    /// Chemical shift of the first and last point
    pub fn ppm_limits(&self) -> (f64, f64) {
        (self.first, self.first + self.last_index() * self.delta)
    }

    /// Frequency offset of the first and last point
    pub fn hz_limits(&self) -> (f64, f64) {
        let (lo, hi) = self.ppm_limits();
        (lo * self.obs, hi * self.obs)
    }

    /// Chemical shift of every point
    pub fn ppm_scale(&self) -> Vec<f64> {
        (0..self.size)
            .map(|i| self.first + i as f64 * self.delta)
            .collect()
    }

    /// Frequency offset of every point
    pub fn hz_scale(&self) -> Vec<f64> {
        self.ppm_scale().into_iter().map(|p| p * self.obs).collect()
    }
}

/// One converter per dimension, axis order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    dims: Vec<UnitConversion>,
}

impl CoordinateSystem {
    /// Wrap a list of per-dimension converters
    pub fn new(dims: Vec<UnitConversion>) -> Self {
        Self { dims }
    }

    /// Build from the descriptor's own `(size, complex, sw, obs, car)` fields
    pub fn from_udic(udic: &Udic) -> Result<Self, UnitError> {
        let dims = udic
            .dims()
            .iter()
            .map(UnitConversion::from_dimension)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { dims })
    }

    /// Number of dimensions covered
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Converter of one dimension
    pub fn dimension(&self, dimension: usize) -> Result<&UnitConversion, UnitError> {
        self.dims.get(dimension).ok_or_else(|| {
            UnitError::InvalidArgument(format!(
                "dimension {dimension} out of range for {} dimensions",
                self.dims.len()
            ))
        })
    }

    /// All converters
    pub fn dimensions(&self) -> &[UnitConversion] {
        &self.dims
    }

    /// Convert an index on `dimension` to `unit`
    pub fn to_unit(&self, index: f64, dimension: usize, unit: Unit) -> Result<f64, UnitError> {
        self.dimension(dimension)?.to_unit(index, unit)
    }

    /// Convert a `unit` value on `dimension` to an index
    pub fn to_index(&self, value: f64, dimension: usize, unit: Unit) -> Result<f64, UnitError> {
        self.dimension(dimension)?.to_index(value, unit)
    }

    /// Copy with two dimensions exchanged; use after a transpose
    pub fn swapped(&self, a: usize, b: usize) -> Result<Self, UnitError> {
        self.dimension(a)?;
        self.dimension(b)?;
        let mut dims = self.dims.clone();
        dims.swap(a, b);
        Ok(Self { dims })
    }
}
