//! Array layout primitives: complex/interleaved conversion and transposes.

use ndarray::{ArrayD, Axis, IxDyn};
use num_complex::Complex32;

use super::ProcessingError;

fn last_axis<T>(data: &ArrayD<T>) -> Result<usize, ProcessingError> {
    match data.ndim() {
        0 => Err(ProcessingError::UnsupportedRank {
            expected: "rank >= 1",
            actual: 0,
        }),
        n => Ok(n - 1),
    }
}

/// `a+ib` → `a, b` along the last axis, doubling its length
pub fn complex_to_interleaved(data: &ArrayD<Complex32>) -> Result<ArrayD<f32>, ProcessingError> {
    let last = last_axis(data)?;
    let mut shape = data.shape().to_vec();
    shape[last] *= 2;

    let mut out = ArrayD::<f32>::zeros(IxDyn(&shape));
    for (src, mut dst) in data
        .lanes(Axis(last))
        .into_iter()
        .zip(out.lanes_mut(Axis(last)))
    {
        for (k, c) in src.iter().enumerate() {
            dst[2 * k] = c.re;
            dst[2 * k + 1] = c.im;
        }
    }
    Ok(out)
}

/// `a, b` → `a+ib` along the last axis, halving its length
pub fn interleaved_to_complex(data: &ArrayD<f32>) -> Result<ArrayD<Complex32>, ProcessingError> {
    let last = last_axis(data)?;
    let len = data.shape()[last];
    if len % 2 != 0 {
        return Err(ProcessingError::OddInterleave(len));
    }
    let mut shape = data.shape().to_vec();
    shape[last] = len / 2;

    let mut out = ArrayD::<Complex32>::zeros(IxDyn(&shape));
    for (src, mut dst) in data
        .lanes(Axis(last))
        .into_iter()
        .zip(out.lanes_mut(Axis(last)))
    {
        for (k, c) in dst.iter_mut().enumerate() {
            *c = Complex32::new(src[2 * k], src[2 * k + 1]);
        }
    }
    Ok(out)
}

/// Plain exchange of the first two axes, returned in standard layout
pub fn swap_leading_axes<T: Clone>(data: &ArrayD<T>) -> Result<ArrayD<T>, ProcessingError> {
    if data.ndim() < 2 {
        return Err(ProcessingError::UnsupportedRank {
            expected: "rank >= 2",
            actual: data.ndim(),
        });
    }
    let mut view = data.view();
    view.swap_axes(0, 1);
    Ok(view.as_standard_layout().into_owned())
}

/// Transpose of 2D data that is complex in both dimensions.
///
/// Input rows alternate real/imaginary parts of the first dimension while each
/// sample is complex in the second; the output keeps that convention for the
/// swapped dimensions, so `(2m, n)` becomes `(2n, m)`.
pub fn hypercomplex_transpose(data: &ArrayD<Complex32>) -> Result<ArrayD<Complex32>, ProcessingError> {
    if data.ndim() != 2 {
        return Err(ProcessingError::UnsupportedRank {
            expected: "rank 2",
            actual: data.ndim(),
        });
    }
    let interleaved = complex_to_interleaved(data)?;
    let transposed = swap_leading_axes(&interleaved)?;
    interleaved_to_complex(&transposed)
}
