use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use rs_spectral_fft::spectral::{Autocorrelation, Bispectrum, CwtFrame, ShiftStack};
use rs_spectral_fft::{FourierTransform, ParallelFft, ScalarFft};

fn signal(len: usize) -> Vec<f32> {
    (0..len).map(|i| (i as f32 * 0.013).sin() * (i as f32 * 0.0007).cos()).collect()
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward");
    for n in [1024usize, 4096, 16384] {
        let input = signal(2 * n);
        let mut output = vec![0.0; 2 * n];

        let scalar = ScalarFft::new(n).unwrap();
        group.bench_with_input(BenchmarkId::new("scalar", n), &n, |b, _| {
            b.iter(|| scalar.transform(black_box(&input), &mut output).unwrap())
        });

        let parallel = ParallelFft::flat(n).unwrap();
        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |b, _| {
            b.iter(|| parallel.transform(black_box(&input), &mut output).unwrap())
        });
    }
    group.finish();
}

fn bench_analyses(c: &mut Criterion) {
    let n = 4096;
    let frame = signal(n);

    let mut acf = Autocorrelation::new(ScalarFft::new(n).unwrap());
    let mut lags = vec![0.0; n];
    c.bench_function("acf_4096", |b| {
        b.iter(|| acf.process(black_box(&frame), &mut lags).unwrap())
    });

    let mut stack = ShiftStack::new(ScalarFft::new(n).unwrap(), 4).unwrap();
    let mut complex = vec![0.0; 2 * n];
    rs_spectral_fft::buffer::expand(&frame, &mut complex).unwrap();
    let mut power = vec![0.0; 4 * n];
    c.bench_function("shift_stack_4096x4", |b| {
        b.iter(|| stack.power(black_box(&complex), &mut power).unwrap())
    });

    let samples = signal(1 << 16);
    let mut cwt = CwtFrame::prepare(&samples, 8192, 4096, 400.0, 10.0).unwrap();
    let mut row = vec![0.0; 4096];
    c.bench_function("cwt_row", |b| b.iter(|| cwt.row(black_box(100.0), &mut row).unwrap()));

    let bispectrum = Bispectrum::new(64).unwrap();
    let wave = signal(64);
    let mut surface = vec![0.0; 64 * 64];
    c.bench_function("triple_correlation_64", |b| {
        b.iter(|| bispectrum.triple_correlation(black_box(&wave), &mut surface).unwrap())
    });
}

criterion_group!(benches, bench_engines, bench_analyses);
criterion_main!(benches);
