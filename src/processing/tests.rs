use super::*;
use ndarray::{ArrayD, IxDyn};
use num_complex::Complex32;
use serde_json::json;

fn complex_2d(rows: usize, cols: usize) -> ArrayD<Complex32> {
    ArrayD::from_shape_fn(IxDyn(&[rows, cols]), |idx| {
        Complex32::new((idx[0] * 10 + idx[1]) as f32, -((idx[0] * 10 + idx[1]) as f32))
    })
}

fn fid(n: usize) -> ArrayD<Complex32> {
    ArrayD::from_shape_fn(IxDyn(&[n]), |idx| {
        let t = idx[0] as f32;
        Complex32::new((0.7 * t).cos(), (0.7 * t).sin()) * (-0.05 * t).exp()
    })
}

fn assert_close(a: &ArrayD<Complex32>, b: &ArrayD<Complex32>, tol: f32) {
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).norm() < tol, "{x} != {y}");
    }
}

#[test]
fn test_interleave_roundtrip_shapes() {
    let data = complex_2d(2, 3);
    let ri = layout::complex_to_interleaved(&data).unwrap();
    assert_eq!(ri.shape(), &[2, 6]);
    assert_eq!(ri[[1, 2]], 11.0);
    assert_eq!(ri[[1, 3]], -11.0);

    let back = layout::interleaved_to_complex(&ri).unwrap();
    assert_eq!(back, data);
}

#[test]
fn test_odd_interleave_rejected() {
    let data = ArrayD::<f32>::zeros(IxDyn(&[2, 5]));
    assert!(matches!(
        layout::interleaved_to_complex(&data),
        Err(ProcessingError::OddInterleave(5))
    ));
}

#[test]
fn test_hypercomplex_transpose_shape_and_involution() {
    let data = complex_2d(4, 3);
    let once = layout::hypercomplex_transpose(&data).unwrap();
    assert_eq!(once.shape(), &[6, 2]);

    let twice = layout::hypercomplex_transpose(&once).unwrap();
    assert_eq!(twice, data);
}

#[test]
fn test_hypercomplex_transpose_needs_rank_two() {
    let data = fid(8);
    assert!(matches!(
        layout::hypercomplex_transpose(&data),
        Err(ProcessingError::UnsupportedRank { actual: 1, .. })
    ));
}

#[test]
fn test_fft_roundtrip() {
    let data = fid(16);
    let spectrum = fft_last_axis(&data);
    let back = ifft_last_axis(&spectrum);
    assert_close(&back, &data, 1e-5);
}

#[test]
fn test_fft_centres_zero_frequency() {
    // constant signal: all energy in the zero-frequency bin
    let data = ArrayD::from_elem(IxDyn(&[8]), Complex32::new(1.0, 0.0));
    let spectrum = fft_last_axis(&data);
    assert!((spectrum[[4]].re - 8.0).abs() < 1e-5);
    assert!(spectrum[[0]].norm() < 1e-5);
}

#[test]
fn test_fft_acts_on_each_row() {
    let row = fid(8);
    let mut rows = ArrayD::<Complex32>::zeros(IxDyn(&[2, 8]));
    for r in 0..2 {
        for k in 0..8 {
            rows[[r, k]] = row[[k]];
        }
    }
    let spectrum = fft_last_axis(&rows);
    let single = fft_last_axis(&row);
    for k in 0..8 {
        assert!((spectrum[[1, k]] - single[[k]]).norm() < 1e-5);
    }
}

#[test]
fn test_reverse_and_circular_shift() {
    let data = ArrayD::from_shape_vec(IxDyn(&[5]), vec![0.0f32, 1.0, 2.0, 3.0, 4.0]).unwrap();
    let reversed = ops::reverse(&data);
    assert_eq!(reversed.as_slice().unwrap(), &[4.0, 3.0, 2.0, 1.0, 0.0]);

    let shifted = ops::circular_shift(&data, 2);
    assert_eq!(shifted.as_slice().unwrap(), &[3.0, 4.0, 0.0, 1.0, 2.0]);

    let back = ops::circular_shift(&data, -7);
    assert_eq!(back.as_slice().unwrap(), &[2.0, 3.0, 4.0, 0.0, 1.0]);
}

#[test]
fn test_zero_fill_pads_only() {
    let data = fid(4);
    let filled = ops::zero_fill(&data, 8).unwrap();
    assert_eq!(filled.shape(), &[8]);
    assert_eq!(filled[[3]], data[[3]]);
    assert_eq!(filled[[7]], Complex32::new(0.0, 0.0));

    assert!(ops::zero_fill(&data, 2).is_err());
}

#[test]
fn test_zero_order_phase() {
    let data = ArrayD::from_elem(IxDyn(&[4]), Complex32::new(1.0, 0.0));
    let rotated = ops::phase(&data, 90.0, 0.0);
    for v in rotated.iter() {
        assert!((v - Complex32::new(0.0, 1.0)).norm() < 1e-6);
    }
}

#[test]
fn test_exponential_window_decays() {
    let data = ArrayD::from_elem(IxDyn(&[8]), Complex32::new(1.0, 0.0));
    let windowed = ops::exponential_window(&data, 10.0, 1000.0).unwrap();
    assert_eq!(windowed[[0]], Complex32::new(1.0, 0.0));
    assert!(windowed[[7]].re < windowed[[1]].re);
    assert!(ops::exponential_window(&data, 10.0, 0.0).is_err());
}

#[test]
fn test_digital_filter_integer_delay_is_a_shift() {
    let data = fid(16);
    let dic = ParameterDictionary::from_value(json!({ "acqus": { "GRPDLY": 3.0 } })).unwrap();
    let processor = FftProcessor::new();

    let advanced = processor.remove_digital_filter(&dic, &data, false).unwrap();
    assert_eq!(advanced.shape(), &[16]);
    for k in 0..13 {
        assert!((advanced[[k]] - data[[k + 3]]).norm() < 1e-4);
    }

    let truncated = processor.remove_digital_filter(&dic, &data, true).unwrap();
    assert_eq!(truncated.shape(), &[13]);
}

#[test]
fn test_digital_filter_needs_group_delay() {
    let data = fid(8);
    let dic = ParameterDictionary::new();
    assert!(matches!(
        FftProcessor::new().remove_digital_filter(&dic, &data, true),
        Err(ProcessingError::MissingFilterParameter(_))
    ));
}
