//! Built-in processing steps.
//!
//! Every [`Operation`] acts on the last (direct) dimension unless stated
//! otherwise, and is serializable so a processing recipe can be stored as
//! TOML or JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::history::Transform;
use super::SpectrumError;
use crate::array::{Samples, TaggedArray, TransposeMode};
use crate::processing::{ops, Processor};
use crate::udic::Domain;

/// A serializable processing step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Return the input unchanged
    Identity,
    /// Multiply every sample
    Scale {
        /// Multiplier
        factor: f32,
    },
    /// Reverse each lane
    #[serde(alias = "rev")]
    Reverse,
    /// Circular shift of each lane
    #[serde(alias = "cs")]
    CircularShift {
        /// Points to shift by, negative shifts towards lower indices
        points: isize,
    },
    /// Pad each lane with zeros
    ZeroFill {
        /// Target number of points
        size: usize,
    },
    /// Exponential line broadening
    ExponentialApodization {
        /// Line broadening in Hz
        line_broadening: f64,
    },
    /// Zero- and first-order phase correction
    Phase {
        /// Zero-order phase in degrees
        p0: f64,
        /// First-order phase in degrees
        #[serde(default)]
        p1: f64,
    },
    /// Forward Fourier transform
    #[serde(alias = "fft")]
    ForwardFourier,
    /// Inverse Fourier transform
    #[serde(alias = "ifft")]
    InverseFourier,
    /// Transpose the first two dimensions
    Transpose {
        /// Complex layout handling
        #[serde(default)]
        mode: TransposeMode,
    },
    /// Discard the imaginary part of the last dimension
    DropImaginary,
    /// Real part of every dimension (rank ≤ 2)
    RealPart,
}

impl Operation {
    /// Run the step over `data`
    pub fn run(&self, data: &TaggedArray, processor: &dyn Processor) -> Result<TaggedArray, SpectrumError> {
        let last = data.ndim() - 1;
        let result = match self {
            Operation::Identity => data.clone(),
            Operation::Scale { factor } => data.scaled(*factor),
            Operation::Reverse => data.with_samples(match data.samples() {
                Samples::Real(a) => Samples::Real(ops::reverse(a)),
                Samples::Complex(a) => Samples::Complex(ops::reverse(a)),
            })?,
            Operation::CircularShift { points } => data.with_samples(match data.samples() {
                Samples::Real(a) => Samples::Real(ops::circular_shift(a, *points)),
                Samples::Complex(a) => Samples::Complex(ops::circular_shift(a, *points)),
            })?,
            Operation::ZeroFill { size } => {
                let samples = match data.samples() {
                    Samples::Real(a) => Samples::Real(ops::zero_fill(a, *size)?),
                    Samples::Complex(a) => Samples::Complex(ops::zero_fill(a, *size)?),
                };
                TaggedArray::resized(samples, data.udic())?
            }
            Operation::ExponentialApodization { line_broadening } => {
                let sw = data.udic().last().sw;
                let windowed = ops::exponential_window(&data.samples().to_complex(), *line_broadening, sw)?;
                let samples = if data.samples().is_complex() {
                    Samples::Complex(windowed)
                } else {
                    Samples::Real(windowed.mapv(|v| v.re))
                };
                data.with_samples(samples)?
            }
            Operation::Phase { p0, p1 } => {
                let phased = ops::phase(&data.samples().to_complex(), *p0, *p1);
                let udic = data.udic().with_complex(last, true)?;
                TaggedArray::new(Samples::Complex(phased), udic)?
            }
            Operation::ForwardFourier => {
                let spectrum = processor.forward_transform(&data.samples().to_complex())?;
                let udic = data
                    .udic()
                    .with_domain(last, Domain::Frequency)?
                    .with_complex(last, true)?;
                TaggedArray::new(Samples::Complex(spectrum), udic)?
            }
            Operation::InverseFourier => {
                let fid = processor.inverse_transform(&data.samples().to_complex())?;
                let udic = data
                    .udic()
                    .with_domain(last, Domain::Time)?
                    .with_complex(last, true)?;
                TaggedArray::new(Samples::Complex(fid), udic)?
            }
            Operation::Transpose { mode } => data.transpose(*mode, processor)?,
            Operation::DropImaginary => data.drop_imaginary()?,
            Operation::RealPart => data.real_part(processor)?,
        };
        Ok(result)
    }
}

impl Transform for Operation {
    fn apply(&self, data: &TaggedArray, processor: &dyn Processor) -> Result<TaggedArray, SpectrumError> {
        self.run(data, processor)
    }

    fn describe(&self) -> String {
        self.to_string()
    }

    fn operation(&self) -> Option<&Operation> {
        Some(self)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Identity => write!(f, "identity"),
            Operation::Scale { factor } => write!(f, "scale({factor})"),
            Operation::Reverse => write!(f, "reverse"),
            Operation::CircularShift { points } => write!(f, "circular_shift({points})"),
            Operation::ZeroFill { size } => write!(f, "zero_fill({size})"),
            Operation::ExponentialApodization { line_broadening } => {
                write!(f, "exponential_apodization({line_broadening} Hz)")
            }
            Operation::Phase { p0, p1 } => write!(f, "phase({p0}, {p1})"),
            Operation::ForwardFourier => write!(f, "forward_fourier"),
            Operation::InverseFourier => write!(f, "inverse_fourier"),
            Operation::Transpose { mode } => write!(f, "transpose({mode:?})"),
            Operation::DropImaginary => write!(f, "drop_imaginary"),
            Operation::RealPart => write!(f, "real_part"),
        }
    }
}
