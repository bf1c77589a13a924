//! Hypercomplex-aware transpose and real-part extraction.
//!
//! For 2D data the storage convention decides how a transpose must treat the
//! buffer:
//!
//! | dim 0 complex | dim 1 complex | buffer | result |
//! |---|---|---|---|
//! | yes | yes | complex `(2m, n)` | hypercomplex transpose, complex `(2n, m)` |
//! | yes | no | real `(2m, n)` | transpose, pair rows: complex `(n, m)` |
//! | no | yes | complex `(m, n)` | split samples, transpose: real `(2n, m)` |
//! | no | no | real `(m, n)` | plain transpose |
//!
//! Ranks above two swap the first two axes only; interleaving never involves
//! the last axis there, so a plain axis swap keeps the layout.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{ArrayError, Samples, TaggedArray};
use crate::processing::{layout, Processor};

/// How a transpose treats complex layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransposeMode {
    /// Choose from the descriptor's `complex` flags
    #[default]
    Auto,
    /// Force a hypercomplex transpose
    Hyper,
    /// Plain axis swap, no reinterpretation
    NoHyper,
}

impl TaggedArray {
    /// Transpose the first two dimensions into a new tagged array.
    ///
    /// Rank-1 arrays are returned unchanged. The two leading descriptor
    /// entries are swapped in a copied descriptor whose sizes follow the new
    /// buffer shape.
    pub fn transpose(&self, mode: TransposeMode, processor: &dyn Processor) -> Result<Self, ArrayError> {
        if self.ndim() < 2 {
            return Ok(self.clone());
        }
        let samples = self.transposed_samples(mode, processor)?;
        let udic = self.udic.swapped(0, 1)?;
        TaggedArray::resized(samples, &udic)
    }

    /// Transpose in place. On error `self` is left untouched.
    pub fn transpose_in_place(
        &mut self,
        mode: TransposeMode,
        processor: &dyn Processor,
    ) -> Result<(), ArrayError> {
        if self.ndim() < 2 {
            return Ok(());
        }
        *self = self.transpose(mode, processor)?;
        Ok(())
    }

    fn transposed_samples(&self, mode: TransposeMode, processor: &dyn Processor) -> Result<Samples, ArrayError> {
        if self.ndim() > 2 || mode == TransposeMode::NoHyper {
            return Ok(match &self.samples {
                Samples::Real(a) => Samples::Real(layout::swap_leading_axes(a)?),
                Samples::Complex(a) => Samples::Complex(layout::swap_leading_axes(a)?),
            });
        }

        let first = self.udic[0].complex;
        let second = self.udic[1].complex;
        debug!(
            "Transposing {:?} data (complex flags {first}/{second}, mode {mode:?})",
            self.shape()
        );

        if mode == TransposeMode::Hyper || (first && second) {
            let data = match &self.samples {
                Samples::Complex(a) => a.clone(),
                Samples::Real(_) if mode == TransposeMode::Hyper => self.samples.to_complex(),
                Samples::Real(_) => {
                    return Err(ArrayError::LayoutMismatch(
                        "hypercomplex transpose needs complex samples".into(),
                    ))
                }
            };
            return Ok(Samples::Complex(processor.hypercomplex_transpose(&data)?));
        }

        match (&self.samples, first, second) {
            (Samples::Real(a), true, false) => {
                let transposed = layout::swap_leading_axes(a)?;
                Ok(Samples::Complex(processor.real_interleave_to_complex(&transposed)?))
            }
            (Samples::Complex(a), false, true) => {
                let interleaved = processor.complex_to_real_interleave(a)?;
                Ok(Samples::Real(layout::swap_leading_axes(&interleaved)?))
            }
            (Samples::Real(a), false, false) => Ok(Samples::Real(layout::swap_leading_axes(a)?)),
            (samples, first, second) => Err(ArrayError::LayoutMismatch(format!(
                "{} samples do not fit complex flags {first}/{second}",
                if samples.is_complex() { "complex" } else { "real" }
            ))),
        }
    }

    /// True real part of the data: `drop_imaginary → transpose →
    /// drop_imaginary → transpose`.
    ///
    /// The second drop reaches the real component of the first dimension,
    /// which only becomes the last axis after a transpose. On rank-1 data the
    /// transposes are no-ops. Defined for rank ≤ 2 only.
    pub fn real_part(&self, processor: &dyn Processor) -> Result<Self, ArrayError> {
        if self.ndim() > 2 {
            return Err(ArrayError::UnsupportedRank {
                operation: "real_part",
                rank: self.ndim(),
            });
        }
        self.drop_imaginary()?
            .transpose(TransposeMode::Auto, processor)?
            .drop_imaginary()?
            .transpose(TransposeMode::Auto, processor)
    }
}
