//! # Numeric Processing Primitives
//!
//! The spectrum model never computes a Fourier transform or a hypercomplex
//! transpose itself: it calls a [`Processor`]. The trait is the seam to the
//! numerical library; [`FftProcessor`] is the default implementation built
//! on `rustfft`.
//!
//! ## Conventions
//!
//! Every primitive acts on the **last** axis, the directly detected
//! dimension, and returns a freshly allocated array.
//!
//! | Primitive | Effect |
//! |-----------|--------|
//! | `forward_transform` | FFT of every last-axis lane, zero frequency centred |
//! | `inverse_transform` | inverse of `forward_transform`, normalised by `1/n` |
//! | `hypercomplex_transpose` | transpose of 2D data complex in both dimensions |
//! | `complex_to_real_interleave` | `a+ib` → `a, b` along the last axis |
//! | `real_interleave_to_complex` | `a, b` → `a+ib` along the last axis |
//! | `remove_digital_filter` | undo the Bruker oversampling filter delay |

use ndarray::ArrayD;
use num_complex::Complex32;
use std::fmt;

use crate::params::ParameterDictionary;

mod error;
mod fft;
pub mod layout;
pub mod ops;

#[cfg(test)]
mod tests;

pub use error::ProcessingError;
pub use fft::{fft_last_axis, ifft_last_axis, FftProcessor};

/// Numeric transform interface consumed by the spectrum model
pub trait Processor: Send + Sync + fmt::Debug {
    /// Forward Fourier transform along the last axis
    fn forward_transform(&self, data: &ArrayD<Complex32>) -> Result<ArrayD<Complex32>, ProcessingError>;

    /// Inverse Fourier transform along the last axis
    fn inverse_transform(&self, data: &ArrayD<Complex32>) -> Result<ArrayD<Complex32>, ProcessingError>;

    /// Hypercomplex transpose of 2D data
    fn hypercomplex_transpose(
        &self,
        data: &ArrayD<Complex32>,
    ) -> Result<ArrayD<Complex32>, ProcessingError> {
        layout::hypercomplex_transpose(data)
    }

    /// Split complex samples into interleaved real/imaginary values
    fn complex_to_real_interleave(&self, data: &ArrayD<Complex32>) -> Result<ArrayD<f32>, ProcessingError> {
        layout::complex_to_interleaved(data)
    }

    /// Pair interleaved real/imaginary values into complex samples
    fn real_interleave_to_complex(&self, data: &ArrayD<f32>) -> Result<ArrayD<Complex32>, ProcessingError> {
        layout::interleaved_to_complex(data)
    }

    /// Remove the group delay introduced by Bruker's digital filter.
    ///
    /// With `post_proc` the wrapped filter artefact at the end of each FID is
    /// cut off, shortening the last axis.
    fn remove_digital_filter(
        &self,
        dic: &ParameterDictionary,
        data: &ArrayD<Complex32>,
        post_proc: bool,
    ) -> Result<ArrayD<Complex32>, ProcessingError> {
        fft::remove_digital_filter(dic, data, post_proc)
    }
}
