use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nmrpro::prelude::*;

fn fid(n: usize) -> TaggedArray {
    let values = (0..n)
        .map(|k| Complex32::from_polar((-(k as f32) / n as f32).exp(), 0.3 * k as f32))
        .collect();
    let samples = Samples::complex_from_vec(&[n], values).unwrap();
    let udic = Udic::new(vec![DimensionInfo::new(n, true, Domain::Time, 8000.0, 600.0, 0.0)]).unwrap();
    TaggedArray::new(samples, udic).unwrap()
}

fn plane(rows: usize, cols: usize) -> TaggedArray {
    let values = (0..rows * cols)
        .map(|i| Complex32::new((i % 17) as f32, (i % 5) as f32))
        .collect();
    let samples = Samples::complex_from_vec(&[rows, cols], values).unwrap();
    let udic = Udic::new(vec![
        DimensionInfo::new(rows, true, Domain::Time, 2000.0, 60.0, 0.0),
        DimensionInfo::new(cols, true, Domain::Time, 8000.0, 600.0, 0.0),
    ])
    .unwrap();
    TaggedArray::new(samples, udic).unwrap()
}

fn processed_1d(n: usize) -> Spectrum {
    Spectrum::new(fid(n), None)
        .unwrap()
        .apply(Operation::ExponentialApodization { line_broadening: 1.0 }, "em")
        .unwrap()
        .apply(Operation::ZeroFill { size: n * 2 }, "zf")
        .unwrap()
        .apply(Operation::ForwardFourier, "ft")
        .unwrap()
        .apply(Operation::Phase { p0: 30.0, p1: 10.0 }, "ph")
        .unwrap()
}

/// Full history replay of a typical 1D pipeline
fn bench_recompute_1d(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute_1d");

    for n in [1024, 8192, 32768] {
        let spectrum = processed_1d(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &spectrum, |b, spectrum| {
            b.iter(|| black_box(spectrum.recompute().unwrap()))
        });
    }

    group.finish();
}

/// Inserting a step near the start forces the tail to replay
fn bench_insert_early_step(c: &mut Criterion) {
    let spectrum = processed_1d(8192);
    c.bench_function("insert_before_zero_fill", |b| {
        b.iter(|| {
            black_box(
                spectrum
                    .apply_before(Operation::Scale { factor: 2.0 }, "gain", "zf")
                    .unwrap(),
            )
        })
    });
}

/// Hypercomplex transpose of 2D planes
fn bench_transpose_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("hypercomplex_transpose");

    for size in [64, 256, 512] {
        let spectrum = Spectrum::new(plane(size * 2, size), None).unwrap();
        group.throughput(Throughput::Elements((size * size * 2) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &spectrum, |b, spectrum| {
            b.iter(|| black_box(spectrum.transpose(TransposeMode::Auto).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recompute_1d, bench_insert_early_step, bench_transpose_2d);
criterion_main!(benches);
