//! Property tests for history replay and hypercomplex transposes
//!
//! Append order, replay idempotence, the absent-reference fallback, transpose
//! involution and the descriptor invariant are checked over generated step
//! sequences and buffers.

use nmrpro::prelude::*;
use proptest::prelude::*;

fn fid(values: Vec<(f32, f32)>) -> TaggedArray {
    let n = values.len();
    let samples = Samples::complex_from_vec(
        &[n],
        values.into_iter().map(|(re, im)| Complex32::new(re, im)).collect(),
    )
    .unwrap();
    let dim = DimensionInfo::new(n, true, Domain::Time, 1000.0, 500.0, 0.0);
    TaggedArray::new(samples, Udic::new(vec![dim]).unwrap()).unwrap()
}

fn hypercomplex(rows: usize, cols: usize, values: &[f32]) -> TaggedArray {
    let data = (0..rows * cols)
        .map(|i| Complex32::new(values[i % values.len()], values[(i * 7 + 3) % values.len()]))
        .collect();
    let samples = Samples::complex_from_vec(&[rows, cols], data).unwrap();
    let dims = vec![
        DimensionInfo::new(rows, true, Domain::Time, 2000.0, 60.0, 0.0).with_label("15N"),
        DimensionInfo::new(cols, true, Domain::Time, 8000.0, 600.0, 0.0).with_label("1H"),
    ];
    TaggedArray::new(samples, Udic::new(dims).unwrap()).unwrap()
}

fn shape_preserving_op() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Identity),
        Just(Operation::Reverse),
        (-4.0f32..4.0).prop_map(|factor| Operation::Scale { factor }),
        (-12isize..12).prop_map(|points| Operation::CircularShift { points }),
        (-180.0f64..180.0, -90.0f64..90.0).prop_map(|(p0, p1)| Operation::Phase { p0, p1 }),
        (0.0f64..5.0).prop_map(|line_broadening| Operation::ExponentialApodization { line_broadening }),
    ]
}

fn samples_strategy() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((-100.0f32..100.0, -100.0f32..100.0), 2..32)
}

proptest! {
    /// Applying steps one by one equals running them in order over the original
    #[test]
    fn test_append_order_determinism(
        values in samples_strategy(),
        ops in prop::collection::vec(shape_preserving_op(), 1..6),
    ) {
        let original = fid(values);
        let mut spectrum = Spectrum::new(original.clone(), None).unwrap();
        for (i, op) in ops.iter().enumerate() {
            spectrum = spectrum.apply(op.clone(), &format!("step{i}")).unwrap();
        }

        let processor = FftProcessor::new();
        let mut expected = original;
        for op in &ops {
            expected = op.run(&expected, &processor).unwrap();
        }
        prop_assert_eq!(spectrum.data(), &expected);
        prop_assert_eq!(spectrum.history().len(), ops.len() + 1);
    }

    /// Recompute reproduces the materialized data bit for bit
    #[test]
    fn test_replay_idempotence(
        values in samples_strategy(),
        ops in prop::collection::vec(shape_preserving_op(), 0..5),
    ) {
        let mut spectrum = Spectrum::new(fid(values), None).unwrap();
        for (i, op) in ops.into_iter().enumerate() {
            spectrum = spectrum.apply(op, &format!("s{i}")).unwrap();
        }
        let recomputed = spectrum.recompute().unwrap();
        prop_assert_eq!(recomputed.data(), spectrum.data());

        let manual = spectrum
            .history()
            .replay(spectrum.original_data(), &FftProcessor::new(), spectrum.history().len())
            .unwrap();
        prop_assert_eq!(&manual, spectrum.data());
    }

    /// Inserting relative to an absent step behaves like a plain append
    #[test]
    fn test_absent_reference_fallback(
        values in samples_strategy(),
        op in shape_preserving_op(),
        before in any::<bool>(),
    ) {
        let spectrum = Spectrum::new(fid(values), None)
            .unwrap()
            .apply(Operation::Scale { factor: 0.5 }, "gain")
            .unwrap();
        let fallback = if before {
            spectrum.apply_before(op.clone(), "x", "missing").unwrap()
        } else {
            spectrum.apply_at(op.clone(), "x", "missing").unwrap()
        };
        let appended = spectrum.apply(op, "x").unwrap();

        prop_assert_eq!(fallback.history().names(), appended.history().names());
        prop_assert_eq!(fallback.data(), appended.data());
    }

    /// Transposing hypercomplex data twice restores values and descriptor
    #[test]
    fn test_transpose_involution(
        half_rows in 1usize..5,
        cols in 1usize..6,
        values in prop::collection::vec(-1000.0f32..1000.0, 1..16),
    ) {
        let data = hypercomplex(half_rows * 2, cols, &values);
        let spectrum = Spectrum::new(data, None).unwrap();

        let once = spectrum.transpose(TransposeMode::Auto).unwrap();
        prop_assert_eq!(once.shape(), &[cols * 2, half_rows][..]);
        let twice = once.transpose(TransposeMode::Auto).unwrap();

        prop_assert_eq!(twice.shape(), spectrum.shape());
        prop_assert_eq!(twice.data(), spectrum.data());
        prop_assert_eq!(twice.udic(), spectrum.udic());
    }

    /// Every produced descriptor matches its buffer
    #[test]
    fn test_descriptor_matches_buffer(
        half_rows in 1usize..4,
        cols in 2usize..8,
        extra in 0usize..8,
        transpose_first in any::<bool>(),
    ) {
        let values: Vec<f32> = (0..7).map(|v| v as f32).collect();
        let mut spectrum = Spectrum::new(hypercomplex(half_rows * 2, cols, &values), None).unwrap();
        let transpose = Operation::Transpose { mode: TransposeMode::Auto };
        if transpose_first {
            spectrum = spectrum.apply(transpose, "tp").unwrap();
        }
        let size = spectrum.shape()[1] + extra;
        spectrum = spectrum
            .apply(Operation::ZeroFill { size }, "zf")
            .unwrap()
            .apply(Operation::ForwardFourier, "ft")
            .unwrap();

        for view in [spectrum.clone(), spectrum.real_part().unwrap()] {
            let udic = view.udic();
            prop_assert_eq!(udic.ndim(), udic.dims().len());
            prop_assert_eq!(udic.ndim(), view.data().ndim());
            prop_assert_eq!(udic.sizes(), view.shape().to_vec());
        }
    }

    /// A frequency view replays to its own data and stays a frequency view
    /// through history edits
    #[test]
    fn test_view_layer_survives_replay(
        values in samples_strategy(),
        op in shape_preserving_op(),
    ) {
        let spectrum = Spectrum::new(fid(values), None).unwrap();
        let freq = spectrum.freq_domain().unwrap();
        let recomputed = freq.recompute().unwrap();
        prop_assert_eq!(recomputed.data(), freq.data());

        let edited = freq.apply(op, "edit").unwrap();
        prop_assert_eq!(edited.is_time_domain(), vec![false]);
        prop_assert_eq!(edited.view_layer(), freq.view_layer());
    }
}
