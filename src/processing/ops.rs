//! Lane-wise operations on the last axis.
//!
//! These back the built-in processing steps (see
//! [`Operation`](crate::spectrum::Operation)).

use ndarray::{ArrayD, Axis, IxDyn};
use num_complex::Complex32;
use std::f64::consts::PI;

use super::ProcessingError;

/// Run `f` over every last-axis lane, writing lanes of `new_len` points.
///
/// `f` receives the source lane and a destination buffer of `new_len` points
/// pre-filled with `T::default()`.
pub fn map_lanes<T, F>(data: &ArrayD<T>, new_len: usize, mut f: F) -> ArrayD<T>
where
    T: Clone + Default,
    F: FnMut(&[T], &mut [T]),
{
    if data.ndim() == 0 {
        return data.clone();
    }
    let last = data.ndim() - 1;
    let mut shape = data.shape().to_vec();
    shape[last] = new_len;

    let mut out = ArrayD::<T>::default(IxDyn(&shape));
    let mut src_buf: Vec<T> = Vec::with_capacity(data.shape()[last]);
    let mut dst_buf: Vec<T> = vec![T::default(); new_len];

    for (src, mut dst) in data
        .lanes(Axis(last))
        .into_iter()
        .zip(out.lanes_mut(Axis(last)))
    {
        src_buf.clear();
        src_buf.extend(src.iter().cloned());
        dst_buf.iter_mut().for_each(|v| *v = T::default());
        f(&src_buf, &mut dst_buf);
        for (d, v) in dst.iter_mut().zip(dst_buf.iter()) {
            *d = v.clone();
        }
    }
    out
}

fn last_len<T>(data: &ArrayD<T>) -> usize {
    data.shape().last().copied().unwrap_or(0)
}

/// Reverse every last-axis lane
pub fn reverse<T: Clone + Default>(data: &ArrayD<T>) -> ArrayD<T> {
    map_lanes(data, last_len(data), |src, dst| {
        dst.clone_from_slice(src);
        dst.reverse();
    })
}

/// Circular shift of every lane; positive `points` shift towards higher indices
pub fn circular_shift<T: Clone + Default>(data: &ArrayD<T>, points: isize) -> ArrayD<T> {
    let n = last_len(data);
    if n == 0 {
        return data.clone();
    }
    let shift = points.rem_euclid(n as isize) as usize;
    map_lanes(data, n, |src, dst| {
        dst.clone_from_slice(src);
        dst.rotate_right(shift);
    })
}

/// Pad every lane with zeros up to `size` points
pub fn zero_fill<T: Clone + Default>(data: &ArrayD<T>, size: usize) -> Result<ArrayD<T>, ProcessingError> {
    let n = last_len(data);
    if size < n {
        return Err(ProcessingError::InvalidParameter(format!(
            "zero fill target {size} is smaller than the current {n} points"
        )));
    }
    Ok(map_lanes(data, size, |src, dst| {
        dst[..src.len()].clone_from_slice(src);
    }))
}

/// Zero- and first-order phase correction, angles in degrees.
///
/// Point `k` of an `n`-point lane is rotated by `p0 + p1 * k / n`.
pub fn phase(data: &ArrayD<Complex32>, p0: f64, p1: f64) -> ArrayD<Complex32> {
    let n = last_len(data);
    let factors: Vec<Complex32> = (0..n)
        .map(|k| {
            let angle = (p0 + p1 * k as f64 / n as f64) * PI / 180.0;
            Complex32::new(angle.cos() as f32, angle.sin() as f32)
        })
        .collect();
    map_lanes(data, n, |src, dst| {
        for ((d, s), f) in dst.iter_mut().zip(src).zip(&factors) {
            *d = *s * *f;
        }
    })
}

/// Exponential apodization: point `k` is scaled by `exp(-pi * lb * k / sw)`
pub fn exponential_window(
    data: &ArrayD<Complex32>,
    line_broadening: f64,
    sw: f64,
) -> Result<ArrayD<Complex32>, ProcessingError> {
    if !(sw.is_finite() && sw > 0.0) {
        return Err(ProcessingError::InvalidParameter(format!(
            "sweep width must be positive, got {sw}"
        )));
    }
    let n = last_len(data);
    let window: Vec<f32> = (0..n)
        .map(|k| (-PI * line_broadening * k as f64 / sw).exp() as f32)
        .collect();
    Ok(map_lanes(data, n, |src, dst| {
        for ((d, s), w) in dst.iter_mut().zip(src).zip(&window) {
            *d = *s * *w;
        }
    }))
}
