use log::debug;
use ndarray::{ArrayD, Axis, Slice};
use num_complex::Complex32;
use rustfft::FftPlanner;
use std::f64::consts::PI;

use super::ops::map_lanes;
use super::{ProcessingError, Processor};
use crate::params::ParameterDictionary;

/// Default [`Processor`] backed by `rustfft`
#[derive(Debug, Clone, Copy, Default)]
pub struct FftProcessor;

impl FftProcessor {
    /// Create the processor
    pub fn new() -> Self {
        Self
    }
}

impl Processor for FftProcessor {
    fn forward_transform(&self, data: &ArrayD<Complex32>) -> Result<ArrayD<Complex32>, ProcessingError> {
        Ok(fft_last_axis(data))
    }

    fn inverse_transform(&self, data: &ArrayD<Complex32>) -> Result<ArrayD<Complex32>, ProcessingError> {
        Ok(ifft_last_axis(data))
    }
}

fn lane_len(data: &ArrayD<Complex32>) -> usize {
    data.shape().last().copied().unwrap_or(0)
}

/// FFT of every last-axis lane with the zero frequency moved to the centre
pub fn fft_last_axis(data: &ArrayD<Complex32>) -> ArrayD<Complex32> {
    let n = lane_len(data);
    if n == 0 {
        return data.clone();
    }
    let fft = FftPlanner::<f32>::new().plan_fft_forward(n);
    map_lanes(data, n, |src, dst| {
        dst.copy_from_slice(src);
        fft.process(dst);
        dst.rotate_right(n / 2);
    })
}

/// Inverse of [`fft_last_axis`], normalised so the round trip is lossless
pub fn ifft_last_axis(data: &ArrayD<Complex32>) -> ArrayD<Complex32> {
    let n = lane_len(data);
    if n == 0 {
        return data.clone();
    }
    let ifft = FftPlanner::<f32>::new().plan_fft_inverse(n);
    let scale = 1.0 / n as f32;
    map_lanes(data, n, |src, dst| {
        dst.copy_from_slice(src);
        dst.rotate_left(n / 2);
        ifft.process(dst);
        dst.iter_mut().for_each(|v| *v *= scale);
    })
}

/// Advance every FID by the filter group delay (in points) using a linear
/// phase ramp in the frequency domain.
pub(super) fn remove_digital_filter(
    dic: &ParameterDictionary,
    data: &ArrayD<Complex32>,
    post_proc: bool,
) -> Result<ArrayD<Complex32>, ProcessingError> {
    let group_delay = dic
        .f64_at(&["acqus", "GRPDLY"])
        .filter(|g| *g > 0.0)
        .ok_or_else(|| ProcessingError::MissingFilterParameter("acqus.GRPDLY".into()))?;

    let n = lane_len(data);
    if n == 0 {
        return Ok(data.clone());
    }
    debug!("Removing digital filter: group delay {group_delay} points over {n}-point FIDs");

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n);
    let ifft = planner.plan_fft_inverse(n);
    let ramp: Vec<Complex32> = (0..n)
        .map(|k| {
            let signed = if k < (n + 1) / 2 {
                k as f64
            } else {
                k as f64 - n as f64
            };
            let angle = 2.0 * PI * signed * group_delay / n as f64;
            Complex32::new(angle.cos() as f32, angle.sin() as f32)
        })
        .collect();
    let scale = 1.0 / n as f32;

    let shifted = map_lanes(data, n, |src, dst| {
        dst.copy_from_slice(src);
        fft.process(dst);
        for (v, r) in dst.iter_mut().zip(&ramp) {
            *v = *v * *r;
        }
        ifft.process(dst);
        dst.iter_mut().for_each(|v| *v *= scale);
    });

    if !post_proc {
        return Ok(shifted);
    }
    let keep = n.saturating_sub(group_delay.floor() as usize).max(1);
    let last = data.ndim() - 1;
    Ok(shifted
        .slice_axis(Axis(last), Slice::from(0..keep))
        .to_owned())
}
