//! # Tagged Array
//!
//! A [`TaggedArray`] is an N-dimensional sample buffer ([`Samples`]) bound to
//! exactly one [`Udic`] snapshot. The binding is checked on construction: the
//! buffer rank equals `ndim` and every axis extent equals the descriptor's
//! `size` for that dimension.
//!
//! Derivations (`transpose`, `drop_imaginary`, `real_part`) return new tagged
//! arrays with freshly copied descriptors. `transpose_in_place` is the only
//! mutating operation, and it leaves `self` untouched when it fails.

use ndarray::{ArrayD, IxDyn};
use num_complex::Complex32;
use serde::{Deserialize, Serialize};
use std::mem;

use crate::udic::{Domain, Udic};

mod error;
mod transpose;

#[cfg(test)]
mod tests;

pub use error::ArrayError;
pub use transpose::TransposeMode;

/// Raw sample buffer, real or complex
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    /// Real-valued samples
    Real(ArrayD<f32>),
    /// Complex samples (single precision)
    Complex(ArrayD<Complex32>),
}

impl Samples {
    /// Complex buffer from a flat vector in row-major order
    pub fn complex_from_vec(shape: &[usize], values: Vec<Complex32>) -> Result<Self, ArrayError> {
        Ok(Samples::Complex(ArrayD::from_shape_vec(IxDyn(shape), values)?))
    }

    /// Real buffer from a flat vector in row-major order
    pub fn real_from_vec(shape: &[usize], values: Vec<f32>) -> Result<Self, ArrayError> {
        Ok(Samples::Real(ArrayD::from_shape_vec(IxDyn(shape), values)?))
    }

    /// Axis extents
    pub fn shape(&self) -> &[usize] {
        match self {
            Samples::Real(a) => a.shape(),
            Samples::Complex(a) => a.shape(),
        }
    }

    /// Rank of the buffer
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of samples
    pub fn len(&self) -> usize {
        match self {
            Samples::Real(a) => a.len(),
            Samples::Complex(a) => a.len(),
        }
    }

    /// Whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether samples are complex
    pub fn is_complex(&self) -> bool {
        matches!(self, Samples::Complex(_))
    }

    /// Size of the buffer in bytes
    pub fn nbytes(&self) -> usize {
        match self {
            Samples::Real(a) => a.len() * mem::size_of::<f32>(),
            Samples::Complex(a) => a.len() * mem::size_of::<Complex32>(),
        }
    }

    /// Complex view of the samples; real buffers get a zero imaginary part
    pub fn to_complex(&self) -> ArrayD<Complex32> {
        match self {
            Samples::Real(a) => a.mapv(|v| Complex32::new(v, 0.0)),
            Samples::Complex(a) => a.clone(),
        }
    }

    /// Real part of the samples
    pub fn real(&self) -> ArrayD<f32> {
        match self {
            Samples::Real(a) => a.clone(),
            Samples::Complex(a) => a.mapv(|v| v.re),
        }
    }

    /// Complex buffer, if the samples are complex
    pub fn as_complex(&self) -> Option<&ArrayD<Complex32>> {
        match self {
            Samples::Complex(a) => Some(a),
            Samples::Real(_) => None,
        }
    }

    /// Real buffer, if the samples are real
    pub fn as_real(&self) -> Option<&ArrayD<f32>> {
        match self {
            Samples::Real(a) => Some(a),
            Samples::Complex(_) => None,
        }
    }

    /// Multiply every sample by `factor`
    pub fn scaled(&self, factor: f32) -> Samples {
        match self {
            Samples::Real(a) => Samples::Real(a * factor),
            Samples::Complex(a) => Samples::Complex(a.mapv(|v| v * factor)),
        }
    }
}

/// Serialized form used by [`TaggedArray`]'s serde impls: shape plus flat values
#[derive(Serialize, Deserialize)]
struct SamplesRepr {
    shape: Vec<usize>,
    real: Vec<f32>,
    imag: Option<Vec<f32>>,
}

impl From<&Samples> for SamplesRepr {
    fn from(samples: &Samples) -> Self {
        match samples {
            Samples::Real(a) => Self {
                shape: a.shape().to_vec(),
                real: a.iter().copied().collect(),
                imag: None,
            },
            Samples::Complex(a) => Self {
                shape: a.shape().to_vec(),
                real: a.iter().map(|c| c.re).collect(),
                imag: Some(a.iter().map(|c| c.im).collect()),
            },
        }
    }
}

impl TryFrom<SamplesRepr> for Samples {
    type Error = ArrayError;

    fn try_from(repr: SamplesRepr) -> Result<Self, Self::Error> {
        match repr.imag {
            None => Samples::real_from_vec(&repr.shape, repr.real),
            Some(imag) => {
                if imag.len() != repr.real.len() {
                    return Err(ArrayError::LayoutMismatch(format!(
                        "{} real values but {} imaginary values",
                        repr.real.len(),
                        imag.len()
                    )));
                }
                let values = repr
                    .real
                    .into_iter()
                    .zip(imag)
                    .map(|(re, im)| Complex32::new(re, im))
                    .collect();
                Samples::complex_from_vec(&repr.shape, values)
            }
        }
    }
}

impl Serialize for Samples {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SamplesRepr::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Samples {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = SamplesRepr::deserialize(deserializer)?;
        Samples::try_from(repr).map_err(serde::de::Error::custom)
    }
}

/// Sample buffer bound to a metadata descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedArray {
    samples: Samples,
    udic: Udic,
}

impl TaggedArray {
    /// Bind `samples` to `udic`.
    ///
    /// Fails with [`ArrayError::RankMismatch`] or [`ArrayError::ShapeMismatch`]
    /// when the buffer does not match the descriptor.
    pub fn new(samples: Samples, udic: Udic) -> Result<Self, ArrayError> {
        udic.validate()?;
        if samples.ndim() != udic.ndim() {
            return Err(ArrayError::RankMismatch {
                array: samples.ndim(),
                descriptor: udic.ndim(),
            });
        }
        let sizes = udic.sizes();
        if samples.shape() != sizes.as_slice() {
            return Err(ArrayError::ShapeMismatch {
                array: samples.shape().to_vec(),
                descriptor: sizes,
            });
        }
        Ok(Self { samples, udic })
    }

    /// Bind `samples` to `udic` after resizing the descriptor to the buffer
    /// shape. Rank must still match.
    pub fn resized(samples: Samples, udic: &Udic) -> Result<Self, ArrayError> {
        if samples.ndim() != udic.ndim() {
            return Err(ArrayError::RankMismatch {
                array: samples.ndim(),
                descriptor: udic.ndim(),
            });
        }
        let udic = udic.with_sizes(samples.shape())?;
        Self::new(samples, udic)
    }

    /// The sample buffer
    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    /// The bound descriptor
    pub fn udic(&self) -> &Udic {
        &self.udic
    }

    /// Split into buffer and descriptor
    pub fn into_parts(self) -> (Samples, Udic) {
        (self.samples, self.udic)
    }

    /// Axis extents
    pub fn shape(&self) -> &[usize] {
        self.samples.shape()
    }

    /// Rank
    pub fn ndim(&self) -> usize {
        self.samples.ndim()
    }

    /// Size of the buffer in bytes
    pub fn nbytes(&self) -> usize {
        self.samples.nbytes()
    }

    /// Same descriptor, new buffer of identical shape
    pub fn with_samples(&self, samples: Samples) -> Result<Self, ArrayError> {
        Self::new(samples, self.udic.clone())
    }

    /// Same buffer, new descriptor
    pub fn with_udic(&self, udic: Udic) -> Result<Self, ArrayError> {
        Self::new(self.samples.clone(), udic)
    }

    /// Every sample multiplied by `factor`; descriptor copied unchanged
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            samples: self.samples.scaled(factor),
            udic: self.udic.clone(),
        }
    }

    /// Per dimension, whether it is in the time domain
    pub fn is_time_domain(&self) -> Vec<bool> {
        self.udic.is_time_domain()
    }

    /// Domain of the last (direct) dimension
    pub fn direct_domain(&self) -> Domain {
        self.udic.last().domain()
    }

    /// Drop the imaginary part of the last dimension.
    ///
    /// The last dimension's `complex` flag is cleared in a copied descriptor;
    /// real buffers keep their values.
    pub fn drop_imaginary(&self) -> Result<Self, ArrayError> {
        let last = self.udic.ndim() - 1;
        let udic = self.udic.with_complex(last, false)?;
        Self::new(Samples::Real(self.samples.real()), udic)
    }
}

impl<'de> Deserialize<'de> for TaggedArray {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            samples: Samples,
            udic: Udic,
        }
        let raw = Raw::deserialize(deserializer)?;
        TaggedArray::new(raw.samples, raw.udic).map_err(serde::de::Error::custom)
    }
}
