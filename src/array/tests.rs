use super::*;
use crate::processing::FftProcessor;
use crate::udic::{DimensionInfo, Domain};

fn dim(size: usize, complex: bool) -> DimensionInfo {
    DimensionInfo::new(size, complex, Domain::Time, 1000.0, 500.0, 0.0)
}

/// Hypercomplex 2D buffer: `rows` interleaved real/imaginary rows of `cols`
/// complex samples. Value encodes its position so transposes can be checked.
fn hypercomplex(rows: usize, cols: usize) -> TaggedArray {
    let values = (0..rows * cols)
        .map(|i| Complex32::new(i as f32, -(i as f32) - 0.5))
        .collect();
    let samples = Samples::complex_from_vec(&[rows, cols], values).unwrap();
    let udic = Udic::new(vec![dim(rows, true), dim(cols, true)]).unwrap();
    TaggedArray::new(samples, udic).unwrap()
}

#[test]
fn test_new_checks_rank_and_shape() {
    let samples = Samples::real_from_vec(&[4], vec![0.0; 4]).unwrap();
    let two_d = Udic::new(vec![dim(2, false), dim(2, false)]).unwrap();
    assert!(matches!(
        TaggedArray::new(samples.clone(), two_d),
        Err(ArrayError::RankMismatch { array: 1, descriptor: 2 })
    ));

    let wrong_size = Udic::new(vec![dim(8, false)]).unwrap();
    assert!(matches!(
        TaggedArray::new(samples, wrong_size),
        Err(ArrayError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_samples_accessors() {
    let samples = Samples::complex_from_vec(&[2, 2], vec![Complex32::new(1.0, 2.0); 4]).unwrap();
    assert!(samples.is_complex());
    assert_eq!(samples.len(), 4);
    assert_eq!(samples.nbytes(), 32);
    assert_eq!(samples.real().iter().copied().collect::<Vec<_>>(), vec![1.0; 4]);
    assert!(samples.as_real().is_none());
    assert!(Samples::real_from_vec(&[3], vec![0.0; 2]).is_err());
}

#[test]
fn test_drop_imaginary_copies_descriptor() {
    let data = hypercomplex(4, 3);
    let real = data.drop_imaginary().unwrap();

    assert!(!real.samples().is_complex());
    assert!(!real.udic()[1].complex);
    assert!(real.udic()[0].complex);
    // source keeps its flags
    assert!(data.udic()[1].complex);
    assert_eq!(real.shape(), data.shape());
}

#[test]
fn test_rank_one_transpose_is_identity() {
    let samples = Samples::complex_from_vec(&[8], vec![Complex32::new(1.0, 1.0); 8]).unwrap();
    let data = TaggedArray::new(samples, Udic::new(vec![dim(8, true)]).unwrap()).unwrap();
    let processor = FftProcessor::new();
    assert_eq!(data.transpose(TransposeMode::Auto, &processor).unwrap(), data);
}

#[test]
fn test_hypercomplex_transpose_swaps_descriptor() {
    let mut data = hypercomplex(4, 3);
    let udic = data
        .udic()
        .with_dimension(0, dim(4, true).with_label("15N"))
        .unwrap();
    data = data.with_udic(udic).unwrap();

    let processor = FftProcessor::new();
    let transposed = data.transpose(TransposeMode::Auto, &processor).unwrap();

    assert_eq!(transposed.shape(), &[6, 2]);
    assert!(transposed.samples().is_complex());
    assert_eq!(transposed.udic()[1].label, "15N");
    assert_eq!(transposed.udic().sizes(), vec![6, 2]);

    let back = transposed.transpose(TransposeMode::Auto, &processor).unwrap();
    assert_eq!(back, data);
}

#[test]
fn test_leading_complex_only_pairs_rows() {
    // 4 real rows = 2 complex rows along dim 0, 3 real columns
    let samples = Samples::real_from_vec(&[4, 3], (0..12).map(|v| v as f32).collect()).unwrap();
    let udic = Udic::new(vec![dim(4, true), dim(3, false)]).unwrap();
    let data = TaggedArray::new(samples, udic).unwrap();

    let transposed = data
        .transpose(TransposeMode::Auto, &FftProcessor::new())
        .unwrap();
    assert_eq!(transposed.shape(), &[3, 2]);
    let values = transposed.samples().as_complex().unwrap();
    // column 0: rows 0/1 form the first complex point, rows 2/3 the second
    assert_eq!(values[[0, 0]], Complex32::new(0.0, 3.0));
    assert_eq!(values[[0, 1]], Complex32::new(6.0, 9.0));
    assert!(transposed.udic()[1].complex);
    assert!(!transposed.udic()[0].complex);
}

#[test]
fn test_auto_rejects_real_buffer_flagged_hypercomplex() {
    let samples = Samples::real_from_vec(&[2, 2], vec![0.0; 4]).unwrap();
    let udic = Udic::new(vec![dim(2, true), dim(2, true)]).unwrap();
    let data = TaggedArray::new(samples, udic).unwrap();
    assert!(matches!(
        data.transpose(TransposeMode::Auto, &FftProcessor::new()),
        Err(ArrayError::LayoutMismatch(_))
    ));
}

#[test]
fn test_nohyper_is_plain_swap() {
    let data = hypercomplex(4, 3);
    let transposed = data
        .transpose(TransposeMode::NoHyper, &FftProcessor::new())
        .unwrap();
    assert_eq!(transposed.shape(), &[3, 4]);
    let src = data.samples().as_complex().unwrap();
    let dst = transposed.samples().as_complex().unwrap();
    assert_eq!(dst[[2, 1]], src[[1, 2]]);
}

#[test]
fn test_transpose_in_place_square_real() {
    let samples = Samples::real_from_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let udic = Udic::new(vec![dim(2, false), dim(2, false).with_label("1H")]).unwrap();
    let mut data = TaggedArray::new(samples, udic).unwrap();

    data.transpose_in_place(TransposeMode::Auto, &FftProcessor::new())
        .unwrap();
    let values: Vec<f32> = data.samples().as_real().unwrap().iter().copied().collect();
    assert_eq!(values, vec![1.0, 3.0, 2.0, 4.0]);
    assert_eq!(data.udic()[0].label, "1H");
}

#[test]
fn test_transpose_in_place_matches_copy() {
    let mut data = hypercomplex(4, 3);
    let copy = data.transpose(TransposeMode::Auto, &FftProcessor::new()).unwrap();

    data.transpose_in_place(TransposeMode::Auto, &FftProcessor::new())
        .unwrap();
    assert_eq!(data.shape(), &[6, 2]);
    assert_eq!(data, copy);
}

#[test]
fn test_transpose_in_place_failure_leaves_data() {
    let samples = Samples::real_from_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let udic = Udic::new(vec![dim(2, true), dim(2, true)]).unwrap();
    let mut data = TaggedArray::new(samples, udic).unwrap();
    let before = data.clone();

    assert!(data
        .transpose_in_place(TransposeMode::Auto, &FftProcessor::new())
        .is_err());
    assert_eq!(data, before);
}

#[test]
fn test_real_part_of_hypercomplex_2d() {
    let data = hypercomplex(4, 3);
    let real = data.real_part(&FftProcessor::new()).unwrap();

    assert_eq!(real.shape(), &[2, 3]);
    assert!(!real.samples().is_complex());
    assert!(!real.udic()[0].complex);
    assert!(!real.udic()[1].complex);

    // real rows (0 and 2) of the original, real part of every sample
    let src = data.samples().as_complex().unwrap();
    let dst = real.samples().as_real().unwrap();
    for col in 0..3 {
        assert_eq!(dst[[0, col]], src[[0, col]].re);
        assert_eq!(dst[[1, col]], src[[2, col]].re);
    }
}

#[test]
fn test_real_part_of_1d_is_single_drop() {
    let samples =
        Samples::complex_from_vec(&[4], (0..4).map(|i| Complex32::new(i as f32, 1.0)).collect())
            .unwrap();
    let data = TaggedArray::new(samples, Udic::new(vec![dim(4, true)]).unwrap()).unwrap();
    let processor = FftProcessor::new();
    assert_eq!(
        data.real_part(&processor).unwrap(),
        data.drop_imaginary().unwrap()
    );
}

#[test]
fn test_real_part_rejects_rank_three() {
    let samples = Samples::real_from_vec(&[2, 2, 2], vec![0.0; 8]).unwrap();
    let udic = Udic::new(vec![dim(2, false), dim(2, false), dim(2, false)]).unwrap();
    let data = TaggedArray::new(samples, udic).unwrap();
    assert!(matches!(
        data.real_part(&FftProcessor::new()),
        Err(ArrayError::UnsupportedRank { rank: 3, .. })
    ));
}

#[test]
fn test_json_snapshot_roundtrip() {
    let data = hypercomplex(2, 2);
    let json = serde_json::to_string(&data).unwrap();
    let restored: TaggedArray = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, data);
}
